//! Form input validation shared by the login, registration, suggestion, and
//! admin forms. Each validator trims its inputs and returns either the request
//! body to send or the message to show next to the form.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::types::{LoginRequest, NewSong, NewSuggestion, RegisterRequest};

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Por favor, informe email e senha");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterRequest, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err("Por favor, informe seu nome");
    }
    if email.is_empty() {
        return Err("Por favor, informe seu email");
    }
    if !is_email_shape(email) {
        return Err("Por favor, informe um email válido");
    }
    if password.is_empty() {
        return Err("Por favor, informe uma senha");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("A senha deve ter pelo menos 6 caracteres");
    }
    if password != confirm {
        return Err("As senhas não coincidem");
    }
    Ok(RegisterRequest::user(name.to_owned(), email.to_owned(), password.to_owned()))
}

pub fn validate_title(title: &str) -> Result<String, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Por favor, informe o título da música");
    }
    Ok(title.to_owned())
}

pub fn validate_suggestion(title: &str, link: &str) -> Result<NewSuggestion, &'static str> {
    let title = validate_title(title)?;
    let link = link.trim();
    if link.is_empty() {
        return Err("Por favor, informe o link do YouTube");
    }
    if !is_youtube_link(link) {
        return Err("Por favor, informe um link válido do YouTube");
    }
    Ok(NewSuggestion::pending(title, link.to_owned()))
}

pub fn validate_song_link(link: &str) -> Result<NewSong, &'static str> {
    let link = link.trim();
    if link.is_empty() {
        return Err("Por favor, insira o link da música");
    }
    Ok(NewSong { link: link.to_owned() })
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// A `youtube.com/...` or `youtu.be/...` URL, scheme and `www.` optional.
pub fn is_youtube_link(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    ["youtube.com/", "youtu.be/"]
        .iter()
        .any(|host| rest.strip_prefix(host).is_some_and(|path| !path.is_empty()))
}
