//! Form for suggesting a new song to the ranking.
//!
//! Suggesting requires a login; the form sends logged-out visitors to
//! `/login` instead of submitting.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notice::{Notice, NoticeLine};
use crate::net::api;
use crate::util::auth::use_auth;
use crate::util::validate::validate_suggestion;

#[component]
pub fn SuggestionForm() -> impl IntoView {
    let auth = use_auth();
    let title = RwSignal::new(String::new());
    let link = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);
    let go_login = RwSignal::new(false);

    let navigate = use_navigate();
    Effect::new(move || {
        if go_login.get() {
            go_login.set(false);
            navigate("/login", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        if !auth.check_auth_status() {
            go_login.set(true);
            return;
        }
        let suggestion = match validate_suggestion(&title.get_untracked(), &link.get_untracked()) {
            Ok(suggestion) => suggestion,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };
        busy.set(true);
        notice.set(None);

        let store = auth.store();
        leptos::task::spawn_local(async move {
            match api::create_suggestion(&*store, &suggestion).await {
                Ok(()) => {
                    title.set(String::new());
                    link.set(String::new());
                    notice.set(Some(Notice::success("Sugestão enviada com sucesso!")));
                }
                Err(e) => {
                    log::warn!("suggestion rejected: {e}");
                    notice.set(Some(Notice::error("Erro ao enviar sugestão. Tente novamente.")));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <section class="suggestion">
            <h2 class="suggestion__heading">"Sugira uma nova música"</h2>
            <p class="suggestion__lead">
                "Conhece alguma música incrível da dupla que não está na lista? Compartilhe conosco!"
            </p>
            <form class="suggestion__form" on:submit=on_submit>
                <input
                    class="suggestion__input"
                    type="text"
                    placeholder="Título da Música"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <input
                    class="suggestion__input"
                    type="url"
                    placeholder="https://www.youtube.com/watch?v=..."
                    prop:value=move || link.get()
                    on:input=move |ev| link.set(event_target_value(&ev))
                />
                <button class="suggestion__submit" type="submit" disabled=move || busy.get()>
                    {move || match (busy.get(), auth.logged_in()) {
                        (true, _) => "Enviando...",
                        (false, true) => "Enviar Sugestão",
                        (false, false) => "Entrar para sugerir",
                    }}
                </button>
            </form>
            <NoticeLine notice/>
        </section>
    }
}
