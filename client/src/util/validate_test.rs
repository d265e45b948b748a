use super::*;

#[test]
fn validate_login_trims_email_and_requires_both() {
    assert_eq!(
        validate_login("  a@b.com ", "pw"),
        Ok(LoginRequest { email: "a@b.com".to_owned(), password: "pw".to_owned() })
    );
    assert_eq!(validate_login("   ", "pw"), Err("Por favor, informe email e senha"));
    assert_eq!(validate_login("a@b.com", ""), Err("Por favor, informe email e senha"));
}

#[test]
fn validate_registration_checks_fields_in_order() {
    assert_eq!(validate_registration(" ", "a@b.com", "secret", "secret"), Err("Por favor, informe seu nome"));
    assert_eq!(validate_registration("Ana", "", "secret", "secret"), Err("Por favor, informe seu email"));
    assert_eq!(validate_registration("Ana", "ana", "secret", "secret"), Err("Por favor, informe um email válido"));
    assert_eq!(validate_registration("Ana", "a@b.com", "", ""), Err("Por favor, informe uma senha"));
    assert_eq!(
        validate_registration("Ana", "a@b.com", "12345", "12345"),
        Err("A senha deve ter pelo menos 6 caracteres")
    );
    assert_eq!(validate_registration("Ana", "a@b.com", "123456", "1234567"), Err("As senhas não coincidem"));
}

#[test]
fn validate_registration_builds_user_request() {
    let req = validate_registration(" Ana ", " a@b.com ", "123456", "123456").unwrap();
    assert_eq!(req.name, "Ana");
    assert_eq!(req.email, "a@b.com");
    assert_eq!(req.role, "user");
}

#[test]
fn email_shape_requires_local_part_and_dotted_domain() {
    assert!(is_email_shape("a@b.co"));
    assert!(is_email_shape("first.last@mail.example.com"));
    assert!(!is_email_shape("@b.co"));
    assert!(!is_email_shape("a@b"));
    assert!(!is_email_shape("a@.co"));
    assert!(!is_email_shape("a@b."));
    assert!(!is_email_shape("a@@b.co"));
    assert!(!is_email_shape("a b@c.co"));
}

#[test]
fn youtube_links_are_recognized() {
    assert!(is_youtube_link("https://www.youtube.com/watch?v=abc"));
    assert!(is_youtube_link("http://youtube.com/embed/abc"));
    assert!(is_youtube_link("youtu.be/abc"));
    assert!(is_youtube_link("https://youtu.be/abc"));
}

#[test]
fn non_youtube_links_are_rejected() {
    assert!(!is_youtube_link("https://vimeo.com/123"));
    assert!(!is_youtube_link("https://youtube.com/"));
    assert!(!is_youtube_link("https://notyoutube.com/watch?v=abc"));
    assert!(!is_youtube_link("ftp://youtube.com/watch?v=abc"));
}

#[test]
fn validate_suggestion_reports_first_problem() {
    assert_eq!(validate_suggestion("", "https://youtu.be/x"), Err("Por favor, informe o título da música"));
    assert_eq!(validate_suggestion("Título", "  "), Err("Por favor, informe o link do YouTube"));
    assert_eq!(
        validate_suggestion("Título", "https://example.com"),
        Err("Por favor, informe um link válido do YouTube")
    );
}

#[test]
fn validate_suggestion_builds_pending_request() {
    let s = validate_suggestion(" Boi Soberano ", " https://youtu.be/x ").unwrap();
    assert_eq!(s, NewSuggestion::pending("Boi Soberano".to_owned(), "https://youtu.be/x".to_owned()));
}

#[test]
fn validate_song_link_requires_value() {
    assert_eq!(validate_song_link(" "), Err("Por favor, insira o link da música"));
    assert_eq!(validate_song_link(" https://youtu.be/x "), Ok(NewSong { link: "https://youtu.be/x".to_owned() }));
}
