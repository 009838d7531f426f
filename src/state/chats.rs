//! Sidebar state: the signed-in user's chat list.

#[cfg(test)]
#[path = "chats_test.rs"]
mod chats_test;

use crate::net::types::ChatSummary;

/// Chats the signed-in user belongs to, plus selection and creation progress.
#[derive(Clone, Debug, Default)]
pub struct ChatsState {
    pub items: Vec<ChatSummary>,
    /// Chat whose window is open, if any.
    pub selected: Option<ChatSummary>,
    /// Bumped on every selection, including reselecting the open chat, so
    /// equal selections still produce a distinct window binding.
    pub selection_seq: u64,
    pub loading: bool,
    /// True while a creation request is in flight.
    pub create_pending: bool,
    pub error: Option<String>,
}

impl ChatsState {
    /// Open a chat's window. Reselecting the already-open chat counts as a
    /// new selection: the remount it forces is what restarts a channel whose
    /// reconnect attempts were exhausted.
    pub fn select(&mut self, chat: ChatSummary) {
        self.selected = Some(chat);
        self.selection_seq += 1;
    }

    /// The value the page keys the window mount on.
    pub fn selection(&self) -> (u64, Option<ChatSummary>) {
        (self.selection_seq, self.selected.clone())
    }
}
