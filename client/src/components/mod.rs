//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the site chrome and forms while reading the shared
//! auth context provided by `App`.

pub mod header;
pub mod notice;
pub mod pending_suggestions;
pub mod song_list;
pub mod song_manager;
pub mod suggestion_form;
