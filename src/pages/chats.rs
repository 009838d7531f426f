//! Chat workspace page: directory and chat list sidebar plus the window for
//! the selected chat.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::chat_list::ChatList;
use crate::components::chat_window::ChatWindow;
use crate::state::auth::AuthState;
use crate::state::chats::ChatsState;
use crate::state::users::UsersState;
use crate::util::auth::install_unauth_redirect;

/// Chat workspace.
///
/// Loads the user directory and the chat list once per signed-in user, then
/// keeps them until logout; the sidebar itself appends newly created chats.
#[component]
pub fn ChatsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let users = expect_context::<RwSignal<UsersState>>();
    let chats = expect_context::<RwSignal<ChatsState>>();

    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate);

    // Listings load once per signed-in user, not on every render.
    let loaded_for = RwSignal::new(None::<String>);
    Effect::new(move || {
        let Some(session) = auth.get().session else {
            return;
        };
        if loaded_for.get().as_deref() == Some(session.user_id.as_str()) {
            return;
        }
        loaded_for.set(Some(session.user_id.clone()));
        users.update(|u| u.loading = true);
        chats.update(|c| c.loading = true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_users().await {
                Some(items) => users.update(|u| {
                    u.items = items;
                    u.loading = false;
                    u.error = None;
                }),
                None => users.update(|u| {
                    u.loading = false;
                    u.error = Some("Could not load the user directory.".to_owned());
                }),
            }
            match crate::net::api::fetch_chats(&session.user_id).await {
                Some(items) => chats.update(|c| {
                    c.items = items;
                    c.loading = false;
                    c.error = None;
                }),
                None => chats.update(|c| {
                    c.loading = false;
                    c.error = Some("Could not load your chats.".to_owned());
                }),
            }
        });
    });

    let on_logout = move |_| {
        crate::util::session::clear();
        auth.update(|a| a.session = None);
        chats.update(|c| *c = ChatsState::default());
        users.update(|u| *u = UsersState::default());
    };

    // Remount the window when the selection changes, keyed on the selection
    // sequence as well as the chat: unrelated sidebar updates cannot tear
    // down a live channel, while reselecting the open chat still remounts
    // the window and reopens an exhausted channel.
    let selected = Memo::new(move |_| chats.get().selection());
    let username = move || auth.get().session.map(|s| s.username).unwrap_or_default();

    view! {
        <div class="chat-page">
            <header class="chat-page__header">
                <h1>"Chat Application"</h1>
                <div class="chat-page__user">
                    <span>{move || format!("Welcome, {}", username())}</span>
                    <button class="chat-page__logout" on:click=on_logout>"Logout"</button>
                </div>
            </header>

            <div class="chat-page__main">
                <aside class="chat-page__sidebar">
                    <ChatList/>
                </aside>
                {move || match selected.get().1 {
                    Some(chat) => view! { <ChatWindow chat=chat/> }.into_any(),
                    None => {
                        view! {
                            <div class="chat-page__placeholder">
                                <p>"Select or create a chat to get started"</p>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
