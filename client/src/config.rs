//! Build-time client configuration.
//!
//! The WASM bundle cannot read the host environment at runtime, so the REST
//! backend location is fixed when the client is compiled:
//!
//! - `SONGBOOK_API_BASE_URL`: backend API root, default `http://127.0.0.1:8000/api`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Backend API root without a trailing slash.
pub fn api_base_url() -> &'static str {
    normalize_base_url(option_env!("SONGBOOK_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
}

fn normalize_base_url(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { DEFAULT_API_BASE_URL } else { trimmed }
}

/// Absolute URL for an API path such as `v1/songs`.
pub fn api_url(path: &str) -> String {
    join_url(api_base_url(), path)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}
