//! Client-side session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain-Rust state owned by the page and mirrored into Leptos signals by
//! `util::auth`. Nothing here depends on the reactive runtime, so the
//! behavior is unit-testable on native targets.

pub mod auth;
pub mod auth_channel;
