use super::*;

#[test]
fn song_reads_camel_case_view_count() {
    let song: Song = serde_json::from_str(
        r#"{"id":3,"title":"Rei do Gado","image":"https://img/3.jpg","viewCount":1250000,"link":"https://youtu.be/x"}"#,
    )
    .unwrap();
    assert_eq!(song.view_count, 1_250_000);
    assert_eq!(song.title, "Rei do Gado");
}

#[test]
fn song_tolerates_missing_optional_fields() {
    let song: Song = serde_json::from_str(r#"{"id":1}"#).unwrap();
    assert_eq!(song.view_count, 0);
    assert!(song.link.is_empty());
}

#[test]
fn song_update_serializes_camel_case() {
    let song = Song {
        id: 9,
        title: "Pagode em Brasília".to_owned(),
        image: String::new(),
        view_count: 42,
        link: "https://youtu.be/y".to_owned(),
    };
    let json = serde_json::to_value(SongUpdate::from(&song)).unwrap();
    assert_eq!(json["viewCount"], 42);
    assert_eq!(json["id"], 9);
}

#[test]
fn login_response_without_token_decodes_empty() {
    let resp: LoginResponse = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
    assert!(resp.access_token.is_empty());
    assert_eq!(resp.role.as_deref(), Some("admin"));
}

#[test]
fn register_request_defaults_to_user_role() {
    let req = RegisterRequest::user("Ana".to_owned(), "a@b.com".to_owned(), "secret1".to_owned());
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["role"], "user");
}

#[test]
fn new_suggestion_is_sent_as_pending() {
    let json = serde_json::to_value(NewSuggestion::pending("T".to_owned(), "L".to_owned())).unwrap();
    assert_eq!(json["status"], "pending");
}

#[test]
fn suggestion_accepts_alternate_field_names() {
    let s: Suggestion = serde_json::from_str(
        r#"{"id":5,"name":"Chico Mineiro","youtubeLink":"https://youtu.be/z","status":"pending","created_at":"2024-05-01T10:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(s.title, "Chico Mineiro");
    assert_eq!(s.link, "https://youtu.be/z");
    assert!(s.is_pending());
    assert_eq!(s.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));
}

#[test]
fn suggestion_unknown_or_missing_status_is_other() {
    let unknown: Suggestion = serde_json::from_str(r#"{"id":1,"status":"archived"}"#).unwrap();
    let missing: Suggestion = serde_json::from_str(r#"{"id":2,"createdAt":"x"}"#).unwrap();
    assert_eq!(unknown.status, SuggestionStatus::Other);
    assert_eq!(missing.status, SuggestionStatus::Other);
    assert_eq!(missing.created_at.as_deref(), Some("x"));
}
