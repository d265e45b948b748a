use super::*;

#[test]
fn normalize_base_url_trims_trailing_slashes() {
    assert_eq!(normalize_base_url("https://api.example.test/api///"), "https://api.example.test/api");
}

#[test]
fn normalize_base_url_falls_back_on_blank() {
    assert_eq!(normalize_base_url("   "), DEFAULT_API_BASE_URL);
    assert_eq!(normalize_base_url("/"), DEFAULT_API_BASE_URL);
}

#[test]
fn join_url_avoids_double_slash() {
    assert_eq!(join_url("http://h/api", "/v1/songs"), "http://h/api/v1/songs");
    assert_eq!(join_url("http://h/api", "auth/login"), "http://h/api/auth/login");
}

#[test]
fn api_url_uses_configured_base() {
    assert!(api_url("v1/songs").starts_with(api_base_url()));
    assert!(api_url("v1/songs").ends_with("/v1/songs"));
}
