//! Site header with brand and auth-aware navigation.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::util::auth::use_auth;

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let go_home = RwSignal::new(false);

    Effect::new(move || {
        if go_home.get() {
            go_home.set(false);
            navigate("/", NavigateOptions::default());
        }
    });

    let on_logout = move |_: leptos::ev::MouseEvent| {
        api::logout(&*auth.store());
        auth.set_logged_in(false);
        go_home.set(true);
    };

    view! {
        <header class="site-header">
            <a href="/" class="site-header__brand">
                <span class="site-header__title">"MODA DE VIOLA"</span>
                <span class="site-header__subtitle">"Tião Carreiro e Pardinho"</span>
            </a>
            <nav class="site-header__nav">
                <a href="/">"Início"</a>
                <Show when=move || auth.is_admin()>
                    <a href="/admin">"Admin"</a>
                </Show>
                <Show
                    when=move || auth.logged_in()
                    fallback=|| view! { <a href="/login">"Entrar"</a> }
                >
                    <button class="site-header__logout" on:click=on_logout>
                        "Sair"
                    </button>
                </Show>
            </nav>
        </header>
    }
}
