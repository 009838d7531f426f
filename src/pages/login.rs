//! Login and registration page.
//!
//! One form serves both modes; a toggle switches between them and clears any
//! half-typed input. Successful login persists the session and reloads into
//! the chat workspace; successful registration drops back to the login form
//! with a confirmation message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterRequest;
use crate::state::auth::AuthState;

/// Local check for the login form. Returns `(username, password)` with the
/// username trimmed; password whitespace is preserved.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter a username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Local check for the registration form. A blank full name is sent as
/// absent rather than empty.
fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<RegisterRequest, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Enter a username, email, and password.");
    }
    let full_name = full_name.trim();
    Ok(RegisterRequest {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        full_name: if full_name.is_empty() {
            None
        } else {
            Some(full_name.to_owned())
        },
    })
}

/// Login page with a registration mode toggle.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    // Already signed in: straight to the workspace.
    let navigate = use_navigate();
    Effect::new(move || {
        if auth.get().session.is_some() {
            navigate("/", NavigateOptions::default());
        }
    });

    let registering = RwSignal::new(false);
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let clear_form = move || {
        username.set(String::new());
        email.set(String::new());
        full_name.set(String::new());
        password.set(String::new());
        info.set(String::new());
    };

    let on_toggle = move |_| {
        registering.set(!registering.get());
        clear_form();
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }

        if registering.get() {
            let request = match validate_register_input(
                &username.get(),
                &email.get(),
                &password.get(),
                &full_name.get(),
            ) {
                Ok(request) => request,
                Err(e) => {
                    info.set(e.to_owned());
                    return;
                }
            };
            busy.set(true);

            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match crate::net::api::register(&request).await {
                    Ok(()) => {
                        registering.set(false);
                        clear_form();
                        info.set("Registration successful! Please login.".to_owned());
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = request;
                busy.set(false);
            }
        } else {
            let (login_username, login_password) =
                match validate_login_input(&username.get(), &password.get()) {
                    Ok(credentials) => credentials,
                    Err(e) => {
                        info.set(e.to_owned());
                        return;
                    }
                };
            busy.set(true);

            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&login_username, &login_password).await {
                    Ok(session) => {
                        crate::util::session::store(&session);
                        auth.update(|a| {
                            a.session = Some(session);
                            a.loading = false;
                        });
                        // Full reload so the workspace starts from a clean slate.
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/");
                        }
                    }
                    Err(e) => {
                        info.set(e);
                        busy.set(false);
                    }
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (login_username, login_password);
                busy.set(false);
            }
        }
    };

    view! {
        <div class="login-page">
            <div class="login-page__card">
                <h1>"Chat Application"</h1>
                <h2>{move || if registering.get() { "Register" } else { "Login" }}</h2>

                <Show when=move || !info.get().is_empty()>
                    <p class="login-page__message">{move || info.get()}</p>
                </Show>

                <form class="login-page__form" on:submit=on_submit>
                    <input
                        class="login-page__input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <Show when=move || registering.get()>
                        <input
                            class="login-page__input"
                            type="email"
                            placeholder="Email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-page__input"
                            type="text"
                            placeholder="Full Name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-page__input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-page__submit" type="submit" disabled=move || busy.get()>
                        {move || {
                            if busy.get() {
                                "Processing..."
                            } else if registering.get() {
                                "Register"
                            } else {
                                "Login"
                            }
                        }}
                    </button>
                </form>

                <p class="login-page__toggle">
                    {move || {
                        if registering.get() {
                            "Already have an account?"
                        } else {
                            "Don't have an account?"
                        }
                    }}
                    <button class="login-page__toggle-btn" type="button" on:click=on_toggle>
                        {move || if registering.get() { "Login" } else { "Register" }}
                    </button>
                </p>
            </div>
        </div>
    }
}
