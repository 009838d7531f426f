//! Sidebar: the signed-in user's chats plus the new-chat creation menu.
//!
//! Picking exactly one user offers a one-to-one chat; an existing one-to-one
//! with that user is reused instead of creating a duplicate. Picking one or
//! more users offers a named group chat.

#[cfg(test)]
#[path = "chat_list_test.rs"]
mod chat_list_test;

use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::net::types::{ChatKind, ChatSummary, UserSummary};
use crate::state::auth::AuthState;
use crate::state::chats::ChatsState;
use crate::state::users::UsersState;

/// Sidebar display name: the explicit name, or a `Chat #id` fallback when
/// there is none worth showing.
pub(crate) fn chat_display_name(chat: &ChatSummary) -> String {
    match &chat.name {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ => format!("Chat #{}", chat.id),
    }
}

/// Short kind tag shown on list rows.
fn list_kind_label(kind: ChatKind) -> &'static str {
    match kind {
        ChatKind::OneToOne => "1-on-1",
        ChatKind::Group => "Group",
    }
}

/// An existing one-to-one chat with `other_id`, if the list already has one.
fn find_one_to_one<'a>(chats: &'a [ChatSummary], other_id: &str) -> Option<&'a ChatSummary> {
    chats
        .iter()
        .find(|c| c.chat_type == ChatKind::OneToOne && c.members.iter().any(|m| m == other_id))
}

/// Group chats need a non-blank name before creation.
fn validate_group_name(name: &str) -> Result<String, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Enter a group chat name.");
    }
    Ok(trimmed.to_owned())
}

/// Directory entries offered in the picker: everyone but the signed-in user.
fn directory_choices(users: &[UserSummary], my_id: &str) -> Vec<UserSummary> {
    users.iter().filter(|u| u.id != my_id).cloned().collect()
}

/// Chat list sidebar with the creation menu.
#[component]
pub fn ChatList() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let users = expect_context::<RwSignal<UsersState>>();
    let chats = expect_context::<RwSignal<ChatsState>>();

    let show_menu = RwSignal::new(false);
    let picked = RwSignal::new(BTreeSet::<String>::new());
    let group_name = RwSignal::new(String::new());
    let menu_error = RwSignal::new(None::<String>);

    let my_id = move || {
        auth.get_untracked()
            .session
            .map(|s| s.user_id)
            .unwrap_or_default()
    };

    let close_menu = move || {
        show_menu.set(false);
        picked.set(BTreeSet::new());
        group_name.set(String::new());
        menu_error.set(None);
    };

    let toggle_user = move |id: String| {
        picked.update(|set| {
            if !set.remove(&id) {
                set.insert(id);
            }
        });
    };

    let select_chat = move |chat: ChatSummary| {
        chats.update(|c| c.select(chat));
    };

    let start_creation = move |kind: ChatKind| {
        let members: Vec<String> = picked.get_untracked().into_iter().collect();
        let name = match kind {
            ChatKind::Group => match validate_group_name(&group_name.get_untracked()) {
                Ok(name) => Some(name),
                Err(e) => {
                    menu_error.set(Some(e.to_owned()));
                    return;
                }
            },
            ChatKind::OneToOne => None,
        };

        if kind == ChatKind::OneToOne {
            let [other] = members.as_slice() else {
                return;
            };
            if let Some(existing) = find_one_to_one(&chats.get_untracked().items, other) {
                select_chat(existing.clone());
                close_menu();
                return;
            }
        }

        let mut member_ids = vec![my_id()];
        member_ids.extend(members);

        #[cfg(feature = "hydrate")]
        {
            chats.update(|c| c.create_pending = true);
            leptos::task::spawn_local(async move {
                match crate::net::api::create_chat(name.as_deref(), kind, &member_ids).await {
                    Ok(created) => {
                        chats.update(|c| {
                            c.items.push(created.clone());
                            c.select(created);
                            c.create_pending = false;
                        });
                        close_menu();
                    }
                    Err(e) => {
                        menu_error.set(Some(e));
                        chats.update(|c| c.create_pending = false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (name, member_ids);
        }
    };

    view! {
        <div class="chat-list">
            <div class="chat-list__header">
                <h2>"Chats"</h2>
                <button
                    class="chat-list__new"
                    on:click=move |_| {
                        if show_menu.get() {
                            close_menu();
                        } else {
                            show_menu.set(true);
                        }
                    }
                >
                    "+ New Chat"
                </button>
            </div>

            <Show when=move || chats.get().error.is_some()>
                <p class="chat-list__error">{move || chats.get().error.unwrap_or_default()}</p>
            </Show>

            <Show when=move || show_menu.get()>
                <div class="chat-list__menu">
                    <h3>"Create New Chat"</h3>

                    <Show when=move || users.get().error.is_some()>
                        <p class="chat-list__error">
                            {move || users.get().error.unwrap_or_default()}
                        </p>
                    </Show>

                    <div class="chat-list__picker">
                        {move || {
                            let me = my_id();
                            directory_choices(&users.get().items, &me)
                                .into_iter()
                                .map(|user| {
                                    let id = user.id.clone();
                                    let checked = picked.get().contains(&id);
                                    view! {
                                        <label class="chat-list__picker-row">
                                            <input
                                                type="checkbox"
                                                prop:checked=checked
                                                on:change=move |_| toggle_user(id.clone())
                                            />
                                            <span>{user.username.clone()}</span>
                                        </label>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>

                    <Show when=move || picked.get().len() == 1>
                        <button
                            class="chat-list__create"
                            disabled=move || chats.get().create_pending
                            on:click=move |_| start_creation(ChatKind::OneToOne)
                        >
                            "Start 1-on-1 Chat"
                        </button>
                    </Show>

                    <Show when=move || !picked.get().is_empty()>
                        <div class="chat-list__group-row">
                            <input
                                class="chat-list__group-name"
                                type="text"
                                placeholder="Group chat name"
                                prop:value=move || group_name.get()
                                on:input=move |ev| group_name.set(event_target_value(&ev))
                            />
                            <button
                                class="chat-list__create"
                                disabled=move || chats.get().create_pending
                                on:click=move |_| start_creation(ChatKind::Group)
                            >
                                "Create Group Chat"
                            </button>
                        </div>
                    </Show>

                    <Show when=move || menu_error.get().is_some()>
                        <p class="chat-list__error">
                            {move || menu_error.get().unwrap_or_default()}
                        </p>
                    </Show>

                    <button class="chat-list__cancel" on:click=move |_| close_menu()>
                        "Cancel"
                    </button>
                </div>
            </Show>

            <div class="chat-list__items">
                {move || {
                    let state = chats.get();
                    if state.loading && state.items.is_empty() {
                        return view! { <p class="chat-list__empty">"Loading chats..."</p> }
                            .into_any();
                    }
                    if state.items.is_empty() {
                        return view! {
                            <p class="chat-list__empty">
                                "No chats yet. Create one to get started!"
                            </p>
                        }
                            .into_any();
                    }

                    let selected_id = state.selected.as_ref().map(|c| c.id.clone());
                    state
                        .items
                        .iter()
                        .map(|chat| {
                            let active = selected_id.as_deref() == Some(chat.id.as_str());
                            let row_class = if active {
                                "chat-list__item chat-list__item--active"
                            } else {
                                "chat-list__item"
                            };
                            let chosen = chat.clone();
                            let members = format!("{} members", chat.members.len());
                            view! {
                                <button class=row_class on:click=move |_| select_chat(chosen.clone())>
                                    <h4>{chat_display_name(chat)}</h4>
                                    <p class="chat-list__meta">
                                        <span>{list_kind_label(chat.chat_type)}</span>
                                        <span>{members}</span>
                                    </p>
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </div>
    }
}
