//! Session persistence in `localStorage`.
//!
//! A signed-in session round-trips through browser storage so a page reload
//! stays signed in. Server-side rendering has no storage; those paths no-op
//! and report no session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::Session;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "natter_session";

/// Read the persisted session, if any. A stored value that no longer parses
/// is removed so it cannot wedge the login flow.
pub fn load() -> Option<Session> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok().flatten()?;
        let raw = storage.get_item(STORAGE_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                leptos::logging::warn!("discarding stored session: {e}");
                let _ = storage.remove_item(STORAGE_KEY);
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist the session, best effort.
pub fn store(session: &Session) {
    #[cfg(feature = "hydrate")]
    {
        if let Ok(raw) = serde_json::to_string(session) {
            if let Some(window) = web_sys::window() {
                if let Ok(Some(storage)) = window.local_storage() {
                    let _ = storage.set_item(STORAGE_KEY, &raw);
                }
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

/// Drop the persisted session on logout.
pub fn clear() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
}
