//! REST API helpers for communicating with the song backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, authorized with the
//! stored bearer token when one exists.
//! Server-side (SSR): stubs returning `ApiError::Unavailable` since these
//! endpoints are only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as `ApiError`; the page that issued the call decides
//! what to show. Listing pending suggestions degrades to an empty list.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use super::types::LoginResponse;
use super::types::{LoginRequest, NewSong, NewSuggestion, RegisterRequest, Song, SongUpdate, Suggestion};
use crate::util::credentials::{self, CredentialStore, StoreError};
#[cfg(feature = "hydrate")]
use crate::util::format::rank_songs;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::format::sort_pending_first;

const LOGIN_PATH: &str = "auth/login";
const REGISTER_PATH: &str = "auth/register";
const SONGS_PATH: &str = "v1/songs";
const INSERT_SONG_PATH: &str = "v1/admin/insert-song";
const ADMIN_SONGS_PATH: &str = "v1/admin/songs";
const SUGGESTIONS_PATH: &str = "v1/suggestion-songs";
const ADMIN_SUGGESTIONS_PATH: &str = "v1/admin/suggestion-songs";

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The response decoded but lacks required content.
    #[error("invalid response: {0}")]
    InvalidResponse(&'static str),

    /// Credentials could not be persisted.
    #[error("credential storage failed: {0}")]
    Storage(#[from] StoreError),

    /// Called outside the browser.
    #[error("not available on server")]
    Unavailable,
}

#[cfg(any(test, feature = "hydrate"))]
fn suggestion_action_path(id: i64, action: &str) -> String {
    format!("{ADMIN_SUGGESTIONS_PATH}/{id}/{action}")
}

#[cfg(any(test, feature = "hydrate"))]
fn authorization_header(store: &dyn CredentialStore) -> Option<String> {
    credentials::bearer_token(store).map(|token| format!("Bearer {token}"))
}

/// Reject a login response that carries no token.
#[cfg(any(test, feature = "hydrate"))]
fn accept_login(resp: LoginResponse) -> Result<LoginResponse, ApiError> {
    if resp.access_token.is_empty() {
        return Err(ApiError::InvalidResponse("login response has no access token"));
    }
    Ok(resp)
}

/// Pull the suggestion list out of a payload that is either a bare array or
/// an object wrapping the array in one of its fields.
#[cfg(any(test, feature = "hydrate"))]
fn decode_suggestions(payload: serde_json::Value) -> Result<Vec<Suggestion>, ApiError> {
    let list = match payload {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(fields) => fields
            .into_iter()
            .find_map(|(_, v)| match v {
                serde_json::Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or(ApiError::InvalidResponse("no suggestion list in response"))?,
        _ => return Err(ApiError::InvalidResponse("no suggestion list in response")),
    };
    let mut suggestions = list
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Suggestion>, _>>()
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    sort_pending_first(&mut suggestions);
    Ok(suggestions)
}

#[cfg(feature = "hydrate")]
mod http {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::{ApiError, authorization_header};
    use crate::config;
    use crate::util::credentials::CredentialStore;

    pub(super) fn get(path: &str, store: &dyn CredentialStore) -> RequestBuilder {
        authorize(Request::get(&config::api_url(path)), store)
    }

    pub(super) fn post(path: &str, store: &dyn CredentialStore) -> RequestBuilder {
        authorize(Request::post(&config::api_url(path)), store)
    }

    pub(super) fn put(path: &str, store: &dyn CredentialStore) -> RequestBuilder {
        authorize(Request::put(&config::api_url(path)), store)
    }

    pub(super) fn delete(path: &str, store: &dyn CredentialStore) -> RequestBuilder {
        authorize(Request::delete(&config::api_url(path)), store)
    }

    fn authorize(builder: RequestBuilder, store: &dyn CredentialStore) -> RequestBuilder {
        match authorization_header(store) {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    /// Send `builder`, with `body` as JSON when given, and require a 2xx status.
    pub(super) async fn send<B: Serialize>(
        label: &str,
        builder: RequestBuilder,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let sent = match body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| ApiError::Transport(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let resp = sent.map_err(|e| {
            log::error!("{label}: request failed: {e}");
            ApiError::Transport(e.to_string())
        })?;
        if !resp.ok() {
            log::error!("{label}: {} responded {}", resp.url(), resp.status());
            return Err(ApiError::Status { status: resp.status() });
        }
        Ok(resp)
    }

    pub(super) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Body type for requests that send none.
    pub(super) const NO_BODY: Option<&()> = None;
}

/// Log in via `POST auth/login` and persist the returned token and role.
///
/// The caller refreshes the auth session afterwards.
///
/// # Errors
///
/// Returns an error if the request fails, the response has no token, or the
/// credentials cannot be stored.
pub async fn login(store: &dyn CredentialStore, request: &LoginRequest) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = http::send("login", http::post(LOGIN_PATH, store), Some(request)).await?;
        let body = accept_login(http::decode::<LoginResponse>(resp).await?)?;
        credentials::persist_login(store, &body.access_token, body.role.as_deref().unwrap_or_default())?;
        log::info!("logged in");
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, request, LOGIN_PATH);
        Err(ApiError::Unavailable)
    }
}

/// Create an account via `POST auth/register`. Does not log in.
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn register(store: &dyn CredentialStore, request: &RegisterRequest) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http::send("register", http::post(REGISTER_PATH, store), Some(request)).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, request, REGISTER_PATH);
        Err(ApiError::Unavailable)
    }
}

/// Log out locally by dropping the stored credentials.
///
/// The caller then marks the session logged out.
pub fn logout(store: &dyn CredentialStore) {
    credentials::clear_login(store);
    log::info!("logged out");
}

/// Fetch all songs from `GET v1/songs`, most viewed first.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a song list.
pub async fn fetch_songs(store: &dyn CredentialStore) -> Result<Vec<Song>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = http::send("fetch songs", http::get(SONGS_PATH, store), http::NO_BODY).await?;
        let mut songs: Vec<Song> = http::decode(resp).await?;
        rank_songs(&mut songs);
        Ok(songs)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, SONGS_PATH);
        Err(ApiError::Unavailable)
    }
}

/// Add a song by link via `POST v1/admin/insert-song` (admin only).
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn create_song(store: &dyn CredentialStore, song: &NewSong) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http::send("create song", http::post(INSERT_SONG_PATH, store), Some(song)).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, song, INSERT_SONG_PATH);
        Err(ApiError::Unavailable)
    }
}

/// Replace a song via `PUT v1/admin/songs` (admin only).
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn update_song(store: &dyn CredentialStore, song: &SongUpdate) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http::send("update song", http::put(ADMIN_SONGS_PATH, store), Some(song)).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, song, ADMIN_SONGS_PATH);
        Err(ApiError::Unavailable)
    }
}

/// Delete a song via `DELETE v1/admin/songs` with an `{id}` body (admin only).
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn delete_song(store: &dyn CredentialStore, id: i64) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "id": id });
        http::send("delete song", http::delete(ADMIN_SONGS_PATH, store), Some(&body)).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, id, ADMIN_SONGS_PATH);
        Err(ApiError::Unavailable)
    }
}

/// Submit a suggestion via `POST v1/suggestion-songs`.
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn create_suggestion(store: &dyn CredentialStore, suggestion: &NewSuggestion) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http::send("create suggestion", http::post(SUGGESTIONS_PATH, store), Some(suggestion)).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, suggestion, SUGGESTIONS_PATH);
        Err(ApiError::Unavailable)
    }
}

/// Fetch suggestions for moderation from `GET v1/admin/suggestion-songs`,
/// pending ones first. Any failure is logged and yields an empty list.
pub async fn fetch_pending_suggestions(store: &dyn CredentialStore) -> Vec<Suggestion> {
    #[cfg(feature = "hydrate")]
    {
        let result = async {
            let resp = http::send("fetch suggestions", http::get(ADMIN_SUGGESTIONS_PATH, store), http::NO_BODY).await?;
            decode_suggestions(http::decode(resp).await?)
        }
        .await;
        result.unwrap_or_else(|e| {
            log::error!("loading pending suggestions failed: {e}");
            Vec::new()
        })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, ADMIN_SUGGESTIONS_PATH);
        Vec::new()
    }
}

/// Approve a suggestion via `POST v1/admin/suggestion-songs/{id}/approve`.
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn approve_suggestion(store: &dyn CredentialStore, id: i64) -> Result<(), ApiError> {
    moderate_suggestion(store, id, "approve").await
}

/// Reject a suggestion via `POST v1/admin/suggestion-songs/{id}/reject`.
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn reject_suggestion(store: &dyn CredentialStore, id: i64) -> Result<(), ApiError> {
    moderate_suggestion(store, id, "reject").await
}

async fn moderate_suggestion(store: &dyn CredentialStore, id: i64, action: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let path = suggestion_action_path(id, action);
        http::send(action, http::post(&path, store), http::NO_BODY).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, id, action);
        Err(ApiError::Unavailable)
    }
}
