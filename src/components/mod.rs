//! Reusable UI components for the chat workspace.

pub mod chat_list;
pub mod chat_window;
