//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthContext` is the reactive face of the auth session: components read the
//! mirrored `AuthState` signal and call through to the session for refreshes
//! and overrides. Route components apply identical redirect behavior through
//! `install_access_redirect`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthSession, AuthState};
use crate::state::auth_channel::{AuthChannel, SubscriberId, default_deferrer};
use crate::util::credentials::{self, CredentialStore};

/// Copyable handle to the page's auth session.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    session: StoredValue<Rc<AuthSession>, LocalStorage>,
    channel: StoredValue<Rc<AuthChannel>, LocalStorage>,
}

impl AuthContext {
    /// Build an unhydrated session over the build's default store and mirror
    /// its state into a signal.
    pub fn new() -> Self {
        Self::with_parts(credentials::default_store(), AuthChannel::new(default_deferrer()))
    }

    /// Same as [`AuthContext::new`] over an explicit store and channel.
    pub fn with_parts(store: Rc<dyn CredentialStore>, channel: Rc<AuthChannel>) -> Self {
        let session = AuthSession::new(store, Rc::clone(&channel));
        let state = RwSignal::new(session.state());
        session.watch(move |next| state.set(next));
        Self {
            state,
            session: StoredValue::new_local(session),
            channel: StoredValue::new_local(channel),
        }
    }

    /// Register `listener` for auth change notifications. It runs on a later
    /// tick after any view of the session refreshes or is overridden.
    ///
    /// Returns `None` once the owning reactive scope has been disposed.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Option<SubscriberId> {
        self.channel.try_get_value().map(|channel| channel.subscribe(listener))
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.channel.try_get_value().is_some_and(|channel| channel.unsubscribe(id))
    }

    /// Reactive snapshot of the session flags.
    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn logged_in(&self) -> bool {
        self.state.get().logged_in
    }

    pub fn is_admin(&self) -> bool {
        self.state.get().is_admin
    }

    pub fn hydrated(&self) -> bool {
        self.state.get().hydrated
    }

    pub fn hydrate(&self) -> bool {
        self.session().is_some_and(|s| s.hydrate())
    }

    pub fn refresh(&self) -> bool {
        self.session().is_some_and(|s| s.refresh())
    }

    pub fn check_auth_status(&self) -> bool {
        self.session().is_some_and(|s| s.check_auth_status())
    }

    pub fn set_logged_in(&self, value: bool) {
        if let Some(session) = self.session() {
            session.set_logged_in(value);
        }
    }

    pub fn on_storage_change(&self, key: Option<&str>) -> bool {
        self.session().is_some_and(|s| s.on_storage_change(key))
    }

    /// Credential store backing the session, for login/logout flows and API
    /// authorization.
    pub fn store(&self) -> Rc<dyn CredentialStore> {
        self.session()
            .map_or_else(credentials::default_store, |s| s.store())
    }

    fn session(&self) -> Option<Rc<AuthSession>> {
        self.session.try_get_value()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the page's auth session and provide it as context.
pub fn provide_auth_context() -> AuthContext {
    let auth = AuthContext::new();
    provide_context(auth);
    auth
}

/// The auth context provided by the root component.
///
/// # Panics
///
/// Panics when called outside the tree rooted at `App`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Hydrate the session after mount and follow credential changes made in
/// other tabs. Does nothing during server rendering.
pub fn install_auth_sync(auth: AuthContext) {
    Effect::new(move || {
        auth.hydrate();
    });

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::storage, move |ev| {
            auth.on_storage_change(ev.key().as_deref());
        });
        on_cleanup(move || handle.remove());
    }
}

/// Who may stay on a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Only visitors who are not logged in (login/registration).
    Guest,
    /// Any logged-in user.
    Member,
    /// Logged-in administrators.
    Admin,
}

/// Where a visitor with `state` should be sent for a route requiring `access`.
///
/// Nothing redirects before hydration, when the flags are not yet meaningful.
pub fn guard_redirect(state: AuthState, access: Access) -> Option<&'static str> {
    if !state.hydrated {
        return None;
    }
    match access {
        Access::Guest => state.logged_in.then_some("/"),
        Access::Member => (!state.logged_in).then_some("/login"),
        Access::Admin if !state.logged_in => Some("/login"),
        Access::Admin => (!state.is_admin).then_some("/"),
    }
}

/// Redirect whenever the session state stops satisfying `access`.
pub fn install_access_redirect<F>(auth: AuthContext, access: Access, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = guard_redirect(auth.state(), access) {
            navigate(target, NavigateOptions::default());
        }
    });
}
