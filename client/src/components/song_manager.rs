//! Admin management of ranked songs: add by link, edit, delete.

#[cfg(test)]
#[path = "song_manager_test.rs"]
mod song_manager_test;

use leptos::prelude::*;

use crate::components::notice::{Notice, NoticeLine};
use crate::net::api;
use crate::net::types::{Song, SongUpdate};
use crate::util::auth::use_auth;
use crate::util::format::format_view_count;
use crate::util::validate::{validate_song_link, validate_title};

/// Song being edited and the values typed so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SongDraft {
    pub(crate) song: Song,
    pub(crate) title: String,
    pub(crate) link: String,
}

impl SongDraft {
    pub(crate) fn from_song(song: Song) -> Self {
        Self { title: song.title.clone(), link: song.link.clone(), song }
    }

    /// Full update body with the edited fields; other fields keep the
    /// song's current values.
    pub(crate) fn to_update(&self) -> Result<SongUpdate, &'static str> {
        let title = validate_title(&self.title)?;
        let link = validate_song_link(&self.link)?.link;
        Ok(SongUpdate { title, link, ..SongUpdate::from(&self.song) })
    }
}

#[component]
pub fn SongManager() -> impl IntoView {
    let auth = use_auth();
    let songs = RwSignal::new(Vec::<Song>::new());
    let loading = RwSignal::new(true);
    let notice = RwSignal::new(None::<Notice>);
    let new_link = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let draft = RwSignal::new(None::<SongDraft>);
    let doomed = RwSignal::new(None::<Song>);

    let reload = move || {
        let store = auth.store();
        loading.set(true);
        leptos::task::spawn_local(async move {
            match api::fetch_songs(&*store).await {
                Ok(list) => songs.set(list),
                Err(e) => {
                    log::error!("loading songs failed: {e}");
                    notice.set(Some(Notice::error("Erro ao carregar músicas aprovadas")));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move || reload());

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let song = match validate_song_link(&new_link.get_untracked()) {
            Ok(song) => song,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };
        busy.set(true);
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match api::create_song(&*store, &song).await {
                Ok(()) => {
                    new_link.set(String::new());
                    notice.set(Some(Notice::success("Música adicionada com sucesso!")));
                    reload();
                }
                Err(e) => {
                    log::warn!("adding song failed: {e}");
                    notice.set(Some(Notice::error(
                        "Erro ao adicionar música. Por favor, tente novamente.",
                    )));
                }
            }
            busy.set(false);
        });
    };

    let on_save = move |_: leptos::ev::MouseEvent| {
        let Some(current) = draft.get_untracked() else {
            return;
        };
        let update = match current.to_update() {
            Ok(update) => update,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match api::update_song(&*store, &update).await {
                Ok(()) => {
                    draft.set(None);
                    notice.set(Some(Notice::success("Música atualizada com sucesso!")));
                    reload();
                }
                Err(e) => {
                    log::warn!("updating song {} failed: {e}", update.id);
                    notice.set(Some(Notice::error("Erro ao atualizar música")));
                }
            }
        });
    };

    let on_confirm_delete = move |_: leptos::ev::MouseEvent| {
        let Some(song) = doomed.get_untracked() else {
            return;
        };
        let store = auth.store();
        leptos::task::spawn_local(async move {
            match api::delete_song(&*store, song.id).await {
                Ok(()) => {
                    doomed.set(None);
                    notice.set(Some(Notice::success("Música excluída com sucesso!")));
                    reload();
                }
                Err(e) => {
                    log::warn!("deleting song {} failed: {e}", song.id);
                    notice.set(Some(Notice::error("Erro ao excluir música")));
                }
            }
        });
    };

    view! {
        <section class="songs-admin">
            <h2 class="songs-admin__heading">"Gerenciamento de Músicas Aprovadas"</h2>
            <NoticeLine notice/>

            <form class="songs-admin__add" on:submit=on_add>
                <input
                    class="songs-admin__input"
                    type="url"
                    placeholder="Link do YouTube"
                    prop:value=move || new_link.get()
                    on:input=move |ev| new_link.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Adicionando..." } else { "Adicionar" }}
                </button>
            </form>

            <div class="songs-admin__toolbar">
                <span>"Total de músicas: " {move || songs.with(Vec::len)}</span>
                <button type="button" on:click=move |_| reload()>"Atualizar Lista"</button>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="songs-admin__loading">"Carregando..."</p> }
            >
                <table class="songs-admin__table">
                    <thead>
                        <tr>
                            <th>"Título"</th>
                            <th>"Visualizações"</th>
                            <th>"Ações"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || songs.get()
                            key=|song: &Song| song.id
                            children=move |song: Song| {
                                let for_edit = song.clone();
                                let for_delete = song.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <a href=song.link target="_blank" rel="noopener noreferrer">
                                                {song.title}
                                            </a>
                                        </td>
                                        <td>{format_view_count(song.view_count)}</td>
                                        <td>
                                            <button
                                                type="button"
                                                on:click=move |_| draft.set(Some(SongDraft::from_song(for_edit.clone())))
                                            >
                                                "Editar"
                                            </button>
                                            <button
                                                type="button"
                                                on:click=move |_| doomed.set(Some(for_delete.clone()))
                                            >
                                                "Excluir"
                                            </button>
                                        </td>
                                    </tr>
                                }
                                .into_any()
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Show when=move || draft.with(Option::is_some)>
                <div class="songs-admin__dialog" role="dialog">
                    <h3>"Editar Música"</h3>
                    <input
                        class="songs-admin__input"
                        type="text"
                        placeholder="Título da Música"
                        prop:value=move || draft.with(|d| d.as_ref().map(|d| d.title.clone()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| {
                                if let Some(d) = d {
                                    d.title = value;
                                }
                            });
                        }
                    />
                    <input
                        class="songs-admin__input"
                        type="url"
                        placeholder="Link do YouTube"
                        prop:value=move || draft.with(|d| d.as_ref().map(|d| d.link.clone()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| {
                                if let Some(d) = d {
                                    d.link = value;
                                }
                            });
                        }
                    />
                    <button type="button" on:click=move |_| draft.set(None)>"Cancelar"</button>
                    <button type="button" on:click=on_save>"Salvar Alterações"</button>
                </div>
            </Show>

            <Show when=move || doomed.with(Option::is_some)>
                <div class="songs-admin__dialog" role="alertdialog">
                    <h3>"Confirmar Exclusão"</h3>
                    <p>
                        "Tem certeza que deseja excluir a música \""
                        {move || doomed.with(|s| s.as_ref().map(|s| s.title.clone()).unwrap_or_default())}
                        "\"? Esta ação não pode ser desfeita."
                    </p>
                    <button type="button" on:click=move |_| doomed.set(None)>"Cancelar"</button>
                    <button type="button" on:click=on_confirm_delete>"Excluir"</button>
                </div>
            </Show>
        </section>
    }
    .into_any()
}
