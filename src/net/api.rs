//! REST calls to the chat server.
//!
//! ERROR HANDLING
//! ==============
//! Auth and creation calls surface the server's `detail` string when the
//! response carries one, falling back to a status-code message. Listing and
//! history calls degrade instead: the caller gets `None` or an empty log and
//! decides what the UI shows. All network I/O is gated behind the `hydrate`
//! feature; server-side rendering never issues these requests.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::net::types::{ChatKind, ChatSummary, Message, RegisterRequest, Session, UserSummary};

/// Default REST base for chat resources. History fetches take the base as a
/// parameter so a deployment can remap the path prefix.
pub const DEFAULT_CHAT_API_BASE: &str = "/api/chats";

/// Exchange credentials for a session.
pub async fn login(username: &str, password: &str) -> Result<Session, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .query([("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let fallback = login_failed_message(resp.status());
            return Err(error_detail(resp, fallback).await);
        }
        resp.json::<Session>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        Err("not available on server".to_owned())
    }
}

/// Create an account. The caller switches back to the login form on success.
pub async fn register(request: &RegisterRequest) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/register")
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let fallback = register_failed_message(resp.status());
            return Err(error_detail(resp, fallback).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Fetch the directory of registered users for the member picker.
pub async fn fetch_users() -> Option<Vec<UserSummary>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/users")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<UserSummary>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Fetch the chats the given user belongs to.
pub async fn fetch_chats(user_id: &str) -> Option<Vec<ChatSummary>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&user_chats_endpoint(user_id))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Vec<ChatSummary>>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = user_id;
        None
    }
}

/// Create a chat. `name` is required for groups and absent for one-to-one
/// chats; `member_ids` must already include the signed-in user.
pub async fn create_chat(
    name: Option<&str>,
    kind: ChatKind,
    member_ids: &[String],
) -> Result<ChatSummary, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({
            "name": name,
            "chat_type": kind.wire_name(),
            "member_ids": member_ids.iter().map(|id| id_value(id)).collect::<Vec<_>>(),
        });
        let resp = gloo_net::http::Request::post("/api/chats/")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let fallback = create_chat_failed_message(resp.status());
            return Err(error_detail(resp, fallback).await);
        }
        resp.json::<ChatSummary>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, kind, member_ids);
        Err("not available on server".to_owned())
    }
}

/// One-shot history fetch for a chat. Failure means an empty log, with the
/// reason logged; the live channel carries everything from here on.
pub async fn fetch_chat_history(base: &str, chat_id: &str) -> Vec<Message> {
    #[cfg(feature = "hydrate")]
    {
        let url = chat_history_endpoint(base, chat_id);
        let resp = match gloo_net::http::Request::get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                leptos::logging::warn!("history fetch failed for chat {chat_id}: {e}");
                return Vec::new();
            }
        };
        if !resp.ok() {
            leptos::logging::warn!(
                "history fetch failed for chat {chat_id}: status {}",
                resp.status()
            );
            return Vec::new();
        }
        match resp.json::<Vec<Message>>().await {
            Ok(messages) => messages,
            Err(e) => {
                leptos::logging::warn!("history for chat {chat_id} was malformed: {e}");
                Vec::new()
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, chat_id);
        Vec::new()
    }
}

/// Server error body shape: FastAPI-style `{"detail": "..."}`.
#[cfg(feature = "hydrate")]
#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    detail: Option<String>,
}

#[cfg(feature = "hydrate")]
async fn error_detail(resp: gloo_net::http::Response, fallback: String) -> String {
    match resp.json::<ErrorDetail>().await {
        Ok(ErrorDetail {
            detail: Some(detail),
        }) => detail,
        _ => fallback,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn user_chats_endpoint(user_id: &str) -> String {
    format!("/api/chats/user/{user_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn chat_history_endpoint(base: &str, chat_id: &str) -> String {
    format!("{}/{chat_id}/messages", base.trim_end_matches('/'))
}

/// Member ids echo back in their server-assigned form: numeric ids as JSON
/// numbers, anything else as strings.
#[cfg(any(test, feature = "hydrate"))]
fn id_value(id: &str) -> serde_json::Value {
    match id.parse::<i64>() {
        Ok(n) => serde_json::Value::from(n),
        Err(_) => serde_json::Value::from(id),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(status: u16) -> String {
    format!("login failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn register_failed_message(status: u16) -> String {
    format!("registration failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn create_chat_failed_message(status: u16) -> String {
    format!("chat creation failed: {status}")
}
