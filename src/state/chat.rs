//! State for the mounted chat window.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::collections::BTreeSet;

use crate::net::types::Message;

/// Everything the chat window renders: the merged message log, the presence
/// set, and the live channel status.
#[derive(Clone, Debug, Default)]
pub struct ChatWindowState {
    /// Chat the window is currently bound to.
    pub chat_id: Option<String>,
    /// Ordered log: fetched history first, then live appends.
    pub messages: Vec<Message>,
    /// Users currently on the channel, replaced wholesale by presence events.
    pub active_users: BTreeSet<String>,
    pub connection_status: ConnectionStatus,
    /// Set once automatic reconnects give up; cleared on the next binding.
    pub retry_exhausted: bool,
    /// Last server-reported channel error, kept for display only.
    pub last_error: Option<String>,
}

/// Live channel status as shown in the window header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// A connection attempt or the socket itself failed; transient, the
    /// channel moves on to `Disconnected` before any retry.
    Errored,
}
