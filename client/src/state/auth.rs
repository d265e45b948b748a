//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the two persisted credential fields (token present, admin role)
//! into `AuthState` and keeps every session view of the page, and of other
//! tabs, reconciled after login, logout, or a role change.
//!
//! DESIGN
//! ======
//! - Before hydration the session reports logged out whatever the store holds,
//!   so the first client render matches the server render.
//! - One thread-local in-flight flag guards refreshes; a refresh requested
//!   while another is running is dropped, since the running one reads the
//!   latest store values anyway.
//! - Explicit `refresh`/`set_logged_in` post a deferred notification to the
//!   other views. Views resync quietly on receipt, so an exchange of
//!   notifications ends after one round.
//! - Nothing here returns an error; store failures read as logged out.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::auth_channel::{AuthChannel, SubscriberId};
use crate::util::credentials::{self, CredentialStore};

/// Authentication flags exposed to the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub logged_in: bool,
    pub is_admin: bool,
    pub hydrated: bool,
}

/// Coarse session phase derived from [`AuthState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Unhydrated,
    LoggedOut,
    User,
    Admin,
}

impl AuthState {
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        match (self.hydrated, self.logged_in, self.is_admin) {
            (false, _, _) => AuthPhase::Unhydrated,
            (true, false, _) => AuthPhase::LoggedOut,
            (true, true, false) => AuthPhase::User,
            (true, true, true) => AuthPhase::Admin,
        }
    }
}

thread_local! {
    static REFRESH_IN_FLIGHT: Cell<bool> = const { Cell::new(false) };
}

/// Holds the in-flight flag for the duration of one refresh.
struct RefreshGuard;

impl RefreshGuard {
    fn acquire() -> Option<Self> {
        REFRESH_IN_FLIGHT.with(|flag| {
            if flag.get() {
                None
            } else {
                flag.set(true);
                Some(Self)
            }
        })
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        REFRESH_IN_FLIGHT.with(|flag| flag.set(false));
    }
}

/// Whether a refresh is currently running on this thread.
pub fn refresh_in_flight() -> bool {
    REFRESH_IN_FLIGHT.with(Cell::get)
}

type Watcher = Rc<dyn Fn(AuthState)>;

/// One view of the auth session.
pub struct AuthSession {
    store: Rc<dyn CredentialStore>,
    channel: Rc<AuthChannel>,
    state: Cell<AuthState>,
    subscription: Cell<Option<SubscriberId>>,
    watchers: RefCell<Vec<Watcher>>,
    this: Weak<AuthSession>,
}

impl AuthSession {
    pub fn new(store: Rc<dyn CredentialStore>, channel: Rc<AuthChannel>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            store,
            channel,
            state: Cell::new(AuthState::default()),
            subscription: Cell::new(None),
            watchers: RefCell::new(Vec::new()),
            this: this.clone(),
        })
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn store(&self) -> Rc<dyn CredentialStore> {
        Rc::clone(&self.store)
    }

    /// Call `watcher` with the new state after every state write.
    pub fn watch(&self, watcher: impl Fn(AuthState) + 'static) {
        self.watchers.borrow_mut().push(Rc::new(watcher));
    }

    /// Mark the session hydrated, start listening for notifications from other
    /// views, and perform the initial refresh. Only the first call has any
    /// effect; it returns the resulting logged-in flag, later calls return the
    /// current one.
    pub fn hydrate(&self) -> bool {
        let current = self.state.get();
        if current.hydrated {
            return current.logged_in;
        }
        self.write(AuthState { hydrated: true, ..current });

        let this = self.this.clone();
        let id = self.channel.subscribe(move || {
            if let Some(session) = this.upgrade() {
                session.resync();
            }
        });
        self.subscription.set(Some(id));
        log::debug!("auth session hydrated");

        self.refresh()
    }

    /// Re-read the credential store and notify the other views.
    ///
    /// Returns the resulting logged-in flag. Before hydration, or while a
    /// refresh is already running, returns the current flag untouched.
    pub fn refresh(&self) -> bool {
        self.reload(true)
    }

    /// Current logged-in flag, refreshed unless a refresh is already running.
    pub fn check_auth_status(&self) -> bool {
        if refresh_in_flight() {
            return self.state.get().logged_in;
        }
        self.refresh()
    }

    /// Override the logged-in flag after a known change, ahead of any store
    /// re-read. Logging out also drops admin.
    pub fn set_logged_in(&self, value: bool) {
        let current = self.state.get();
        if !current.hydrated {
            log::debug!("ignoring set_logged_in({value}) before hydration");
            return;
        }
        self.write(AuthState {
            logged_in: value,
            is_admin: value && current.is_admin,
            hydrated: true,
        });
        if !refresh_in_flight() {
            self.announce();
        }
    }

    /// React to a storage-change notification from another tab.
    ///
    /// Returns whether a refresh was started.
    pub fn on_storage_change(&self, key: Option<&str>) -> bool {
        if !credentials::is_credential_key(key) || refresh_in_flight() || !self.state.get().hydrated {
            return false;
        }
        log::debug!("credential storage changed ({key:?}), refreshing");
        self.refresh();
        true
    }

    /// Refresh in response to another view's notification, without posting
    /// one of our own.
    fn resync(&self) {
        if !refresh_in_flight() {
            self.reload(false);
        }
    }

    fn reload(&self, announce: bool) -> bool {
        let current = self.state.get();
        if !current.hydrated {
            return current.logged_in;
        }
        let Some(guard) = RefreshGuard::acquire() else {
            log::debug!("refresh already in flight, dropping request");
            return current.logged_in;
        };

        let logged_in = credentials::has_token(&*self.store);
        let is_admin = logged_in && credentials::has_admin_role(&*self.store);
        self.write(AuthState { logged_in, is_admin, hydrated: true });
        drop(guard);

        if announce {
            self.announce();
        }
        logged_in
    }

    fn announce(&self) {
        self.channel.post(self.subscription.get());
    }

    fn write(&self, next: AuthState) {
        self.state.set(next);
        let watchers: Vec<Watcher> = self.watchers.borrow().iter().map(Rc::clone).collect();
        for watcher in watchers {
            watcher(next);
        }
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.channel.unsubscribe(id);
        }
    }
}
