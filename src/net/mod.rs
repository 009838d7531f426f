//! Networking: REST calls and the live websocket channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the chat server's REST endpoints, `channel` manages the
//! websocket lifecycle for one open chat, and `types` defines the shared
//! wire schema both sides of the boundary agree on.

pub mod api;
pub mod channel;
pub mod types;
