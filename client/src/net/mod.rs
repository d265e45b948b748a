//! Networking modules for the song ranking REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and attaches stored credentials, and `types`
//! defines the wire schema shared by requests and responses.

pub mod api;
pub mod types;
