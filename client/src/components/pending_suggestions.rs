//! Moderation table for user suggestions.

use leptos::prelude::*;

use crate::components::notice::{Notice, NoticeLine};
use crate::net::api;
use crate::net::types::Suggestion;
use crate::util::auth::use_auth;
use crate::util::format::{format_created_at, status_label};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verdict {
    Approve,
    Reject,
}

#[component]
pub fn PendingSuggestions() -> impl IntoView {
    let auth = use_auth();
    let items = RwSignal::new(Vec::<Suggestion>::new());
    let loading = RwSignal::new(true);
    let notice = RwSignal::new(None::<Notice>);

    let reload = move || {
        let store = auth.store();
        loading.set(true);
        leptos::task::spawn_local(async move {
            items.set(api::fetch_pending_suggestions(&*store).await);
            loading.set(false);
        });
    };

    Effect::new(move || reload());

    let moderate = move |id: i64, verdict: Verdict| {
        let store = auth.store();
        leptos::task::spawn_local(async move {
            let result = match verdict {
                Verdict::Approve => api::approve_suggestion(&*store, id).await,
                Verdict::Reject => api::reject_suggestion(&*store, id).await,
            };
            match (result, verdict) {
                (Ok(()), Verdict::Approve) => {
                    notice.set(Some(Notice::success("Sugestão aprovada com sucesso!")));
                    reload();
                }
                (Ok(()), Verdict::Reject) => {
                    notice.set(Some(Notice::success("Sugestão rejeitada com sucesso!")));
                    reload();
                }
                (Err(e), Verdict::Approve) => {
                    log::warn!("approve suggestion {id} failed: {e}");
                    notice.set(Some(Notice::error("Erro ao aprovar sugestão")));
                }
                (Err(e), Verdict::Reject) => {
                    log::warn!("reject suggestion {id} failed: {e}");
                    notice.set(Some(Notice::error("Erro ao rejeitar sugestão")));
                }
            }
        });
    };

    view! {
        <section class="pending">
            <h2 class="pending__heading">"Sugestões de Músicas Aguardando Aprovação"</h2>
            <NoticeLine notice/>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="pending__loading">"Carregando..."</p> }
            >
                <p class="pending__count">
                    "Total de registros recebidos: " {move || items.with(Vec::len)}
                </p>
                <Show
                    when=move || items.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="pending__empty">"Nenhuma sugestão pendente."</p> }
                >
                    <table class="pending__table">
                        <thead>
                            <tr>
                                <th>"Título"</th>
                                <th>"Status"</th>
                                <th>"Data"</th>
                                <th>"Link"</th>
                                <th>"Ações"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || items.get()
                                key=|s: &Suggestion| s.id
                                children=move |s: Suggestion| {
                                    let id = s.id;
                                    let pending = s.is_pending();
                                    let status = s.status;
                                    view! {
                                        <tr class="pending__row">
                                            <td>{s.title}</td>
                                            <td>{status_label(status)}</td>
                                            <td>{format_created_at(s.created_at.as_deref())}</td>
                                            <td>
                                                {if s.link.is_empty() {
                                                    "Sem link".into_any()
                                                } else {
                                                    view! {
                                                        <a href=s.link target="_blank" rel="noopener noreferrer">
                                                            "Abrir no YouTube"
                                                        </a>
                                                    }
                                                    .into_any()
                                                }}
                                            </td>
                                            <td>
                                                <Show
                                                    when=move || pending
                                                    fallback=move || status_label(status)
                                                >
                                                    <button
                                                        class="pending__approve"
                                                        on:click=move |_| moderate(id, Verdict::Approve)
                                                    >
                                                        "Aprovar"
                                                    </button>
                                                    <button
                                                        class="pending__reject"
                                                        on:click=move |_| moderate(id, Verdict::Reject)
                                                    >
                                                        "Rejeitar"
                                                    </button>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                    .into_any()
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </section>
    }
    .into_any()
}
