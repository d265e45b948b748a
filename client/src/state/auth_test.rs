use super::*;
use crate::state::auth_channel::TaskQueue;
use crate::util::credentials::{MemoryStore, ROLE_KEY, StoreError, TOKEN_KEY};

struct Fixture {
    store: Rc<MemoryStore>,
    queue: Rc<TaskQueue>,
    channel: Rc<AuthChannel>,
}

impl Fixture {
    fn new() -> Self {
        let queue = Rc::new(TaskQueue::new());
        let channel = AuthChannel::new(queue.clone());
        Self { store: Rc::new(MemoryStore::new()), queue, channel }
    }

    fn session(&self) -> Rc<AuthSession> {
        AuthSession::new(self.store.clone(), self.channel.clone())
    }

    fn login(&self, role: &str) {
        self.store.set(TOKEN_KEY, "t").unwrap();
        self.store.set(ROLE_KEY, role).unwrap();
    }

    fn logout(&self) {
        self.store.remove(TOKEN_KEY).unwrap();
        self.store.remove(ROLE_KEY).unwrap();
    }
}

fn state(logged_in: bool, is_admin: bool, hydrated: bool) -> AuthState {
    AuthState { logged_in, is_admin, hydrated }
}

fn assert_admin_implies_logged_in(session: &AuthSession) {
    let s = session.state();
    assert!(!s.is_admin || s.logged_in, "admin without login: {s:?}");
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_unhydrated_and_logged_out() {
    let s = AuthState::default();
    assert_eq!(s, state(false, false, false));
    assert_eq!(s.phase(), AuthPhase::Unhydrated);
}

#[test]
fn auth_state_phase_tracks_flags() {
    assert_eq!(state(false, false, true).phase(), AuthPhase::LoggedOut);
    assert_eq!(state(true, false, true).phase(), AuthPhase::User);
    assert_eq!(state(true, true, true).phase(), AuthPhase::Admin);
    assert_eq!(state(true, true, false).phase(), AuthPhase::Unhydrated);
}

// =============================================================
// Hydration
// =============================================================

#[test]
fn refresh_before_hydration_ignores_stored_token() {
    let fx = Fixture::new();
    fx.login("ADMIN");
    let session = fx.session();
    assert!(!session.refresh());
    assert!(!session.check_auth_status());
    assert_eq!(session.state(), state(false, false, false));
    assert_eq!(fx.queue.pending(), 0);
}

#[test]
fn set_logged_in_before_hydration_is_ignored() {
    let fx = Fixture::new();
    let session = fx.session();
    session.set_logged_in(true);
    assert_eq!(session.state(), state(false, false, false));
    assert_eq!(fx.queue.pending(), 0);
}

#[test]
fn hydrate_runs_once_and_refreshes() {
    let fx = Fixture::new();
    fx.login("user");
    let session = fx.session();
    assert!(session.hydrate());
    assert_eq!(session.state(), state(true, false, true));
    assert_eq!(fx.channel.subscriber_count(), 1);

    fx.logout();
    assert!(session.hydrate());
    assert_eq!(session.state(), state(true, false, true));
    assert_eq!(fx.channel.subscriber_count(), 1);
}

#[test]
fn mount_then_external_admin_login_via_storage_event() {
    let fx = Fixture::new();
    let session = fx.session();
    assert_eq!(session.state().phase(), AuthPhase::Unhydrated);

    assert!(!session.hydrate());
    assert_eq!(session.state(), state(false, false, true));

    fx.login("ADMIN");
    assert!(session.on_storage_change(Some(TOKEN_KEY)));
    assert_eq!(session.state(), state(true, true, true));
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn refresh_reads_role_case_insensitively() {
    for (role, admin) in [("ADMIN", true), ("admin", true), ("user", false)] {
        let fx = Fixture::new();
        let session = fx.session();
        session.hydrate();
        fx.login(role);
        assert!(session.refresh());
        assert_eq!(session.state(), state(true, admin, true), "role {role}");
    }
}

#[test]
fn refresh_forces_non_admin_without_token() {
    let fx = Fixture::new();
    fx.store.set(ROLE_KEY, "admin").unwrap();
    let session = fx.session();
    assert!(!session.hydrate());
    assert_eq!(session.state(), state(false, false, true));
}

#[test]
fn refresh_degrades_to_logged_out_when_store_fails() {
    let fx = Fixture::new();
    fx.login("admin");
    let session = fx.session();
    assert!(session.hydrate());
    fx.store.set_failing(true);
    assert!(!session.refresh());
    assert_eq!(session.state(), state(false, false, true));
}

#[test]
fn refresh_posts_one_deferred_notification() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    fx.queue.tick();
    session.refresh();
    assert_eq!(fx.queue.pending(), 1);
}

#[test]
fn check_auth_status_refreshes_when_idle() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    fx.login("user");
    assert!(session.check_auth_status());
    assert_eq!(session.state(), state(true, false, true));
}

// =============================================================
// set_logged_in
// =============================================================

#[test]
fn set_logged_in_false_always_drops_admin() {
    let fx = Fixture::new();
    fx.login("ADMIN");
    let session = fx.session();
    session.hydrate();
    assert_eq!(session.state(), state(true, true, true));

    session.set_logged_in(false);
    assert_eq!(session.state(), state(false, false, true));
    assert_admin_implies_logged_in(&session);
}

#[test]
fn set_logged_in_true_keeps_admin_flag() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    session.set_logged_in(true);
    assert_eq!(session.state(), state(true, false, true));
}

#[test]
fn set_logged_in_posts_notification() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    fx.queue.tick();
    session.set_logged_in(true);
    assert_eq!(fx.queue.pending(), 1);
}

// =============================================================
// Cross-view and cross-tab sync
// =============================================================

#[test]
fn other_view_resyncs_after_refresh_notification() {
    let fx = Fixture::new();
    let header = fx.session();
    let page = fx.session();
    header.hydrate();
    page.hydrate();
    fx.queue.tick();

    fx.login("admin");
    page.refresh();
    assert_eq!(header.state(), state(false, false, true));

    fx.queue.tick();
    assert_eq!(header.state(), state(true, true, true));
}

#[test]
fn notification_exchange_settles() {
    let fx = Fixture::new();
    let a = fx.session();
    let b = fx.session();
    a.hydrate();
    b.hydrate();

    let mut ticks = 0;
    while fx.queue.pending() > 0 {
        fx.queue.tick();
        ticks += 1;
        assert!(ticks < 10, "notifications never settled");
    }
    assert_eq!(a.state(), b.state());
}

#[test]
fn refresh_from_listener_runs_once_per_delivery() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    fx.queue.tick();

    let calls = Rc::new(Cell::new(0));
    let calls_cb = calls.clone();
    let weak = Rc::downgrade(&session);
    fx.channel.subscribe(move || {
        calls_cb.set(calls_cb.get() + 1);
        if let Some(s) = weak.upgrade() {
            s.refresh();
        }
    });

    session.refresh();
    fx.login("user");
    fx.queue.tick();
    assert_eq!(calls.get(), 1);
    assert_eq!(session.state(), state(true, false, true));

    // Each delivery schedules at most one more; nothing runs on the caller's stack.
    assert_eq!(fx.queue.pending(), 1);
    fx.queue.tick();
    assert_eq!(calls.get(), 2);
}

#[test]
fn storage_change_for_unrelated_key_is_ignored() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    fx.queue.tick();

    fx.login("admin");
    assert!(!session.on_storage_change(Some("theme")));
    assert_eq!(session.state(), state(false, false, true));
    assert_eq!(fx.queue.pending(), 0);
}

#[test]
fn storage_change_for_role_key_refreshes() {
    let fx = Fixture::new();
    fx.login("user");
    let session = fx.session();
    session.hydrate();

    fx.store.set(ROLE_KEY, "admin").unwrap();
    assert!(session.on_storage_change(Some(ROLE_KEY)));
    assert_eq!(session.state(), state(true, true, true));
}

#[test]
fn storage_clear_logs_out() {
    let fx = Fixture::new();
    fx.login("admin");
    let session = fx.session();
    session.hydrate();

    fx.logout();
    assert!(session.on_storage_change(None));
    assert_eq!(session.state(), state(false, false, true));
}

#[test]
fn storage_change_before_hydration_is_ignored() {
    let fx = Fixture::new();
    fx.login("admin");
    let session = fx.session();
    assert!(!session.on_storage_change(Some(TOKEN_KEY)));
    assert_eq!(session.state(), state(false, false, false));
}

// =============================================================
// Reentrancy
// =============================================================

/// Store that calls back into the session from inside a read.
struct ReentrantStore {
    inner: MemoryStore,
    session: RefCell<Weak<AuthSession>>,
    seen: RefCell<Vec<bool>>,
}

impl CredentialStore for ReentrantStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(session) = self.session.borrow().upgrade() {
            self.seen.borrow_mut().push(session.check_auth_status());
            self.seen.borrow_mut().push(session.refresh());
            assert!(!session.on_storage_change(Some(TOKEN_KEY)));
            session.set_logged_in(true);
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

#[test]
fn reentrant_calls_during_refresh_are_dropped() {
    let queue = Rc::new(TaskQueue::new());
    let channel = AuthChannel::new(queue.clone());
    let store = Rc::new(ReentrantStore {
        inner: MemoryStore::new(),
        session: RefCell::new(Weak::new()),
        seen: RefCell::new(Vec::new()),
    });
    let session = AuthSession::new(store.clone(), channel);
    *store.session.borrow_mut() = Rc::downgrade(&session);

    assert!(!session.hydrate());
    assert!(!refresh_in_flight());
    // Every nested call saw the pre-refresh flag and returned without reading.
    assert!(store.seen.borrow().iter().all(|seen| !seen));
    // The outer refresh wrote last; only its own notification was queued.
    assert_eq!(session.state(), state(false, false, true));
    assert_eq!(queue.pending(), 1);
}

#[test]
fn guard_released_after_refresh() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    assert!(!refresh_in_flight());
    session.refresh();
    assert!(!refresh_in_flight());
}

// =============================================================
// Watchers and teardown
// =============================================================

#[test]
fn watchers_observe_every_write() {
    let fx = Fixture::new();
    fx.login("admin");
    let session = fx.session();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = seen.clone();
    session.watch(move |s| seen_cb.borrow_mut().push(s.phase()));

    session.hydrate();
    session.set_logged_in(false);
    assert_eq!(
        *seen.borrow(),
        vec![AuthPhase::LoggedOut, AuthPhase::Admin, AuthPhase::LoggedOut]
    );
}

#[test]
fn dropping_session_unsubscribes() {
    let fx = Fixture::new();
    let session = fx.session();
    session.hydrate();
    assert_eq!(fx.channel.subscriber_count(), 1);
    drop(session);
    assert_eq!(fx.channel.subscriber_count(), 0);
}
