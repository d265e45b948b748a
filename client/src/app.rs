//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::header::Header;
use crate::pages::{admin::AdminPage, home::HomePage, login::LoginPage};
use crate::util::auth::{install_auth_sync, provide_auth_context};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the page's auth session: it is provided as context here and
/// hydrated once the app is mounted in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = provide_auth_context();
    install_auth_sync(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/songbook.css"/>
        <Title text="Tião Carreiro e Pardinho - Top 5 Músicas"/>

        <Router>
            <Header/>
            <main class="app-main">
                <Routes fallback=|| "Página não encontrada.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                </Routes>
            </main>
        </Router>
    }
}
