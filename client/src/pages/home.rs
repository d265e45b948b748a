//! Home page: the song ranking and the suggestion form.

use leptos::prelude::*;

use crate::components::song_list::SongList;
use crate::components::suggestion_form::SuggestionForm;
use crate::net::api;
use crate::net::types::Song;
use crate::util::auth::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let songs = RwSignal::new(Vec::<Song>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<&'static str>);

    Effect::new(move || {
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match api::fetch_songs(&*store).await {
                Ok(list) => songs.set(list),
                Err(e) => {
                    log::error!("loading songs failed: {e}");
                    error.set(Some("Erro ao carregar músicas"));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div class="home-page">
            <section class="home-page__suggest">
                <SuggestionForm/>
            </section>
            <section class="home-page__ranking">
                <h1 class="home-page__title">"Tião Carreiro & Pardinho"</h1>
                <h2 class="home-page__subtitle">"Lista de Músicas"</h2>
                <Show when=move || error.get().is_some()>
                    <p class="home-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="home-page__loading">"Carregando..."</p> }
                >
                    <SongList songs=songs/>
                </Show>
            </section>
        </div>
    }
}
