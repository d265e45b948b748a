use super::*;

fn song() -> Song {
    Song {
        id: 3,
        title: "Rei do Gado".to_owned(),
        image: "https://img.youtube.com/vi/x/0.jpg".to_owned(),
        view_count: 42_000,
        link: "https://youtu.be/x".to_owned(),
    }
}

#[test]
fn draft_starts_from_current_values() {
    let draft = SongDraft::from_song(song());
    assert_eq!(draft.title, "Rei do Gado");
    assert_eq!(draft.link, "https://youtu.be/x");
}

#[test]
fn update_keeps_untouched_fields() {
    let mut draft = SongDraft::from_song(song());
    draft.title = "  Pagode em Brasília ".to_owned();
    let update = draft.to_update().unwrap();
    assert_eq!(update.id, 3);
    assert_eq!(update.title, "Pagode em Brasília");
    assert_eq!(update.view_count, 42_000);
    assert_eq!(update.image, "https://img.youtube.com/vi/x/0.jpg");
    assert_eq!(update.link, "https://youtu.be/x");
}

#[test]
fn update_rejects_blank_fields() {
    let mut draft = SongDraft::from_song(song());
    draft.title = " ".to_owned();
    assert_eq!(draft.to_update(), Err("Por favor, informe o título da música"));

    let mut draft = SongDraft::from_song(song());
    draft.link = String::new();
    assert_eq!(draft.to_update(), Err("Por favor, insira o link da música"));
}
