//! Admin page: suggestion moderation and song management.
//!
//! Guarded by the admin access rule: logged-out visitors go to `/login`,
//! logged-in non-admins go home. Until the session hydrates nothing
//! redirects and the page shows a placeholder.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::pending_suggestions::PendingSuggestions;
use crate::components::song_manager::SongManager;
use crate::util::auth::{Access, install_access_redirect, use_auth};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdminTab {
    Pending,
    Songs,
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    install_access_redirect(auth, Access::Admin, use_navigate());

    let tab = RwSignal::new(AdminTab::Pending);
    let tab_class = move |which: AdminTab| {
        if tab.get() == which { "admin-tabs__tab admin-tabs__tab--active" } else { "admin-tabs__tab" }
    };

    view! {
        <Show
            when=move || auth.is_admin()
            fallback=|| view! { <p class="admin-page__placeholder">"Carregando..."</p> }
        >
            <div class="admin-page">
                <h1 class="admin-page__title">"Painel do Administrador"</h1>
                <div class="admin-tabs">
                    <button
                        type="button"
                        class=move || tab_class(AdminTab::Pending)
                        on:click=move |_| tab.set(AdminTab::Pending)
                    >
                        "Sugestões Pendentes"
                    </button>
                    <button
                        type="button"
                        class=move || tab_class(AdminTab::Songs)
                        on:click=move |_| tab.set(AdminTab::Songs)
                    >
                        "Músicas Aprovadas"
                    </button>
                </div>
                <Show
                    when=move || tab.get() == AdminTab::Pending
                    fallback=|| view! { <SongManager/> }.into_any()
                >
                    <PendingSuggestions/>
                </Show>
            </div>
        </Show>
    }
    .into_any()
}
