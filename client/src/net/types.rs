//! Wire DTOs for the song backend's REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON (`viewCount`, `access_token`).
//! Suggestion payloads have been served under several field spellings, so
//! `Suggestion` accepts each known alias.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Role sent with every self-service registration.
pub const DEFAULT_REGISTER_ROLE: &str = "user";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login body. `access_token` defaults to empty so a response that
/// omits it decodes and is then rejected explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn user(name: String, email: String, password: String) -> Self {
        Self { name, email, password, role: DEFAULT_REGISTER_ROLE.to_owned() }
    }
}

/// A ranked song as listed by `v1/songs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub link: String,
}

/// Full replacement body for `PUT v1/admin/songs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongUpdate {
    pub id: i64,
    pub title: String,
    pub view_count: u64,
    pub link: String,
    pub image: String,
}

impl From<&Song> for SongUpdate {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id,
            title: song.title.clone(),
            view_count: song.view_count,
            link: song.link.clone(),
            image: song.image.clone(),
        }
    }
}

/// Body for `POST v1/admin/insert-song`; the backend resolves the metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewSong {
    pub link: String,
}

/// Moderation state of a suggestion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    #[serde(other)]
    Other,
}

/// Body for `POST v1/suggestion-songs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewSuggestion {
    pub title: String,
    pub link: String,
    pub status: SuggestionStatus,
}

impl NewSuggestion {
    pub fn pending(title: String, link: String) -> Self {
        Self { title, link, status: SuggestionStatus::Pending }
    }
}

/// A user-submitted suggestion awaiting or past moderation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default, alias = "youtubeLink")]
    pub link: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub status: SuggestionStatus,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl Suggestion {
    pub fn is_pending(&self) -> bool {
        self.status == SuggestionStatus::Pending
    }
}
