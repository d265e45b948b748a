//! Login page with sign-in and registration tabs.
//!
//! Logged-in visitors are sent home by the guest access guard. A successful
//! sign-in stores the credentials and refreshes the auth session, which
//! trips that same guard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::notice::{Notice, NoticeLine};
use crate::net::api;
use crate::util::auth::{Access, install_access_redirect, use_auth};
use crate::util::validate::{validate_login, validate_registration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AuthTab {
    SignIn,
    Register,
}

impl AuthTab {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::SignIn => "Login",
            Self::Register => "Registrar-se",
        }
    }

    pub(crate) fn tab_class(self, active: Self) -> &'static str {
        if self == active { "login-tabs__tab login-tabs__tab--active" } else { "login-tabs__tab" }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    install_access_redirect(auth, Access::Guest, use_navigate());

    let tab = RwSignal::new(AuthTab::SignIn);
    let notice = RwSignal::new(None::<Notice>);

    let on_registered = Callback::new(move |()| {
        notice.set(Some(Notice::success(
            "Registro realizado com sucesso! Você já pode fazer login.",
        )));
        tab.set(AuthTab::SignIn);
    });

    let tab_button = move |which: AuthTab| {
        view! {
            <button
                class=move || which.tab_class(tab.get())
                type="button"
                on:click=move |_| {
                    notice.set(None);
                    tab.set(which);
                }
            >
                {which.label()}
            </button>
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Acesse sua conta"</h1>
                <p class="login-card__subtitle">"Entre com suas credenciais ou crie uma conta"</p>
                <div class="login-tabs">
                    {tab_button(AuthTab::SignIn)}
                    {tab_button(AuthTab::Register)}
                </div>
                <NoticeLine notice/>
                <Show
                    when=move || tab.get() == AuthTab::SignIn
                    fallback=move || view! { <RegisterForm on_registered/> }
                >
                    <SignInForm/>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn SignInForm() -> impl IntoView {
    let auth = use_auth();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || !auth.state().hydrated {
            return;
        }
        let request = match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(request) => request,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };
        busy.set(true);
        notice.set(None);

        let store = auth.store();
        leptos::task::spawn_local(async move {
            match api::login(&*store, &request).await {
                Ok(()) => {
                    notice.set(Some(Notice::success("Login realizado com sucesso!")));
                    auth.refresh();
                }
                Err(e) => {
                    log::warn!("login failed: {e}");
                    notice.set(Some(Notice::error(
                        "Falha na autenticação. Verifique suas credenciais.",
                    )));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            <input
                class="login-input"
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <input
                class="login-input"
                type="password"
                placeholder="Senha"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button class="login-button" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Entrando..." } else { "Entrar" }}
            </button>
            <NoticeLine notice/>
        </form>
    }
}

#[component]
fn RegisterForm(on_registered: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || !auth.state().hydrated {
            return;
        }
        let request = match validate_registration(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(request) => request,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };
        busy.set(true);
        notice.set(None);

        let store = auth.store();
        leptos::task::spawn_local(async move {
            match api::register(&*store, &request).await {
                Ok(()) => {
                    busy.set(false);
                    on_registered.run(());
                }
                Err(e) => {
                    log::warn!("registration failed: {e}");
                    notice.set(Some(Notice::error("Erro ao registrar. Por favor, tente novamente.")));
                    busy.set(false);
                }
            }
        });
    };

    let field = move |placeholder: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form class="login-form" on:submit=on_submit>
            {field("Nome completo", "text", name)}
            {field("Email", "email", email)}
            {field("Senha", "password", password)}
            {field("Confirmar senha", "password", confirm)}
            <button class="login-button" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Registrando..." } else { "Registrar" }}
            </button>
            <NoticeLine notice/>
        </form>
    }
}
