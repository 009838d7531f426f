//! Live chat window: message log, presence, connection status, and input.
//!
//! ARCHITECTURE
//! ============
//! Each mount binds the shared `ChatWindowState` to one chat, opens the live
//! channel for it, and fires the one-shot history fetch. The page remounts
//! this component per selection change, so unmount cleanup is the single
//! place where channels are torn down.

#[cfg(test)]
#[path = "chat_window_test.rs"]
mod chat_window_test;

use leptos::prelude::*;

use crate::components::chat_list::chat_display_name;
use crate::net::channel::{open_channel, reset_for_chat, validate_send};
use crate::net::types::{ChatKind, ChatSummary};
use crate::state::auth::AuthState;
use crate::state::chat::{ChatWindowState, ConnectionStatus};

/// CSS class for the connection status dot.
fn status_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "chat-window__dot chat-window__dot--connected",
        ConnectionStatus::Connecting => "chat-window__dot chat-window__dot--connecting",
        ConnectionStatus::Disconnected => "chat-window__dot chat-window__dot--disconnected",
        ConnectionStatus::Errored => "chat-window__dot chat-window__dot--errored",
    }
}

/// Hover label for the connection status dot.
fn status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "Connected",
        ConnectionStatus::Connecting => "Connecting",
        ConnectionStatus::Disconnected => "Disconnected",
        ConnectionStatus::Errored => "Connection error",
    }
}

fn input_placeholder(status: ConnectionStatus) -> &'static str {
    if status == ConnectionStatus::Connected {
        "Type a message..."
    } else {
        "Connecting..."
    }
}

/// Header label spelling out the chat flavor.
fn kind_label(kind: ChatKind) -> &'static str {
    match kind {
        ChatKind::OneToOne => "1-on-1 Chat",
        ChatKind::Group => "Group Chat",
    }
}

/// The window for one chat. Owns the live channel for its lifetime.
#[component]
pub fn ChatWindow(chat: ChatSummary) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let window = expect_context::<RwSignal<ChatWindowState>>();

    let user_id = auth
        .get_untracked()
        .session
        .map(|s| s.user_id)
        .unwrap_or_default();

    window.update(|w| reset_for_chat(w, &chat.id));
    let handle = open_channel(chat.id.clone(), user_id.clone(), window);

    // One-shot history load for this binding; replaces the log wholesale.
    let history_guard = handle.guard();
    let history_chat_id = chat.id.clone();
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let history = crate::net::api::fetch_chat_history(
            crate::net::api::DEFAULT_CHAT_API_BASE,
            &history_chat_id,
        )
        .await;
        if !history_guard.is_current() {
            return;
        }
        window.update(|w| crate::net::channel::apply_history(w, &history_chat_id, history));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (history_guard, history_chat_id);

    let teardown = handle.clone();
    on_cleanup(move || teardown.close());

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view.
    Effect::new(move || {
        let _ = window.get().messages.len();

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let send_handle = handle.clone();
    let do_send = move || {
        match validate_send(&input.get_untracked(), window.get_untracked().connection_status) {
            Ok(content) => {
                if send_handle.send(&content) {
                    input.set(String::new());
                } else {
                    leptos::logging::warn!("chat send failed: channel gone");
                }
            }
            Err(e) => leptos::logging::log!("send rejected: {e}"),
        }
    };
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_send();
    };

    let status = move || window.get().connection_status;
    let can_send =
        move || status() == ConnectionStatus::Connected && !input.get().trim().is_empty();
    let header_name = chat_display_name(&chat);
    let header_kind = kind_label(chat.chat_type);

    view! {
        <div class="chat-window">
            <div class="chat-window__header">
                <div>
                    <h3>{header_name}</h3>
                    <p class="chat-window__kind">{header_kind}</p>
                </div>
                <div class="chat-window__presence">
                    <span
                        class=move || status_class(status())
                        title=move || status_label(status())
                    ></span>
                    <span class="chat-window__online">
                        {move || format!("{} online", window.get().active_users.len())}
                    </span>
                </div>
            </div>

            <Show when=move || window.get().retry_exhausted>
                <div class="chat-window__notice">
                    "Disconnected. Select the chat again to retry."
                </div>
            </Show>
            <Show when=move || window.get().last_error.is_some()>
                <div class="chat-window__notice chat-window__notice--error">
                    {move || window.get().last_error.unwrap_or_default()}
                </div>
            </Show>

            <div class="chat-window__messages" node_ref=messages_ref>
                {move || {
                    let state = window.get();
                    if state.messages.is_empty() {
                        return view! {
                            <div class="chat-window__empty">
                                <p>"No messages yet. Start the conversation!"</p>
                            </div>
                        }
                            .into_any();
                    }

                    state
                        .messages
                        .iter()
                        .map(|msg| {
                            let own = msg.sender_id == user_id;
                            let row_class = if own {
                                "chat-window__message chat-window__message--own"
                            } else {
                                "chat-window__message"
                            };
                            let time = crate::util::time::clock_label(&msg.created_at);
                            view! {
                                <div class=row_class>
                                    <div class="chat-window__bubble">
                                        <p>{msg.content.clone()}</p>
                                        <span class="chat-window__time">{time}</span>
                                    </div>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>

            <form class="chat-window__input-row" on:submit=on_submit>
                <input
                    class="chat-window__input"
                    type="text"
                    placeholder=move || input_placeholder(status())
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    disabled=move || status() != ConnectionStatus::Connected
                />
                <button class="chat-window__send" type="submit" disabled=move || !can_send()>
                    "Send"
                </button>
            </form>
        </div>
    }
}
