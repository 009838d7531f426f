//! Shared client-side state.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `chat`, `chats`, `users`) so components
//! depend on small focused models. Each state struct is a plain value held in
//! an `RwSignal` provided as context by the root `App`; all mutation goes
//! through `update` so the UI reacts to every change.

pub mod auth;
pub mod chat;
pub mod chats;
pub mod users;
