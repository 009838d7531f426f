//! Live chat channel manager.
//!
//! Owns the websocket bound to one (chat, user) pair: connects, folds inbound
//! events into `ChatWindowState`, reconnects with capped exponential backoff
//! after unplanned closes, and hands the UI a sender for outbound messages.
//!
//! DESIGN
//! ======
//! Every mounted chat window opens its own channel and closes it on cleanup.
//! Teardown bumps a shared epoch; the socket task re-checks the epoch after
//! every await and exits silently once it goes stale, so a timer or socket
//! left over from a previous chat can never touch the state of the next one.
//!
//! Browser I/O is gated behind `hydrate`. The transition and merge rules are
//! plain functions over `ChatWindowState` so they run under native tests.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

#[cfg(feature = "hydrate")]
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::net::types::{ChannelEvent, Message};
#[cfg(feature = "hydrate")]
use crate::net::types::OutboundMessage;
use crate::state::chat::{ChatWindowState, ConnectionStatus};

/// Consecutive unplanned closes tolerated before automatic retry stops.
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

const BASE_RECONNECT_DELAY_MS: u64 = 1000;
const MAX_RECONNECT_DELAY_MS: u64 = 10_000;

/// Why an outbound send was rejected before reaching the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("message content is empty")]
    BlankContent,
    #[error("channel is not connected")]
    NotConnected,
}

/// Backoff delay before reconnect attempt `failures` (the 1-based count of
/// consecutive unplanned closes), or `None` once the retry budget is spent.
pub fn reconnect_delay_ms(failures: u32) -> Option<u64> {
    if failures == 0 || failures > MAX_RECONNECT_ATTEMPTS {
        return None;
    }
    let delay = BASE_RECONNECT_DELAY_MS << (failures - 1);
    Some(delay.min(MAX_RECONNECT_DELAY_MS))
}

/// Gate an outbound send: the content must survive trimming and the channel
/// must be connected. Returns the trimmed content ready for the wire.
pub fn validate_send(content: &str, status: ConnectionStatus) -> Result<String, SendError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(SendError::BlankContent);
    }
    if status != ConnectionStatus::Connected {
        return Err(SendError::NotConnected);
    }
    Ok(trimmed.to_owned())
}

/// Rebind the window state to a chat, dropping everything from the previous
/// binding.
pub fn reset_for_chat(chat: &mut ChatWindowState, chat_id: &str) {
    chat.chat_id = Some(chat_id.to_owned());
    chat.messages.clear();
    chat.active_users.clear();
    chat.connection_status = ConnectionStatus::Disconnected;
    chat.retry_exhausted = false;
    chat.last_error = None;
}

/// Append a message unless one with the same id is already in the log.
pub fn merge_message(messages: &mut Vec<Message>, incoming: Message) {
    if messages.iter().any(|m| m.id == incoming.id) {
        return;
    }
    messages.push(incoming);
}

/// Replace the message log with fetched history.
///
/// The result is dropped when the window was rebound to a different chat
/// while the fetch was in flight.
pub fn apply_history(chat: &mut ChatWindowState, chat_id: &str, history: Vec<Message>) {
    if chat.chat_id.as_deref() != Some(chat_id) {
        return;
    }
    chat.messages = history;
}

/// Fold one inbound channel event into the window state.
pub fn apply_event(chat: &mut ChatWindowState, event: ChannelEvent) {
    match event {
        ChannelEvent::Message(message) => merge_message(&mut chat.messages, message),
        ChannelEvent::UserOnline(update) | ChannelEvent::UserOffline(update) => {
            chat.active_users = update.active_users.into_iter().collect();
        }
        ChannelEvent::Error { message } => {
            leptos::logging::warn!("chat server reported: {message}");
            chat.last_error = Some(message);
        }
    }
}

/// Handle owned by the chat window for its live channel.
///
/// Cloning shares the same epoch; `close` invalidates every clone's guards
/// and lets the socket task wind down.
#[derive(Clone, Debug, Default)]
pub struct ChannelHandle {
    epoch: Arc<AtomicU64>,
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl ChannelHandle {
    /// Queue one outbound message. Returns `false` when no channel is live.
    pub fn send(&self, content: &str) -> bool {
        #[cfg(feature = "hydrate")]
        {
            let Some(tx) = &self.tx else {
                return false;
            };
            match serde_json::to_string(&OutboundMessage {
                content: content.to_owned(),
            }) {
                Ok(json) => tx.unbounded_send(json).is_ok(),
                Err(_) => false,
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = content;
            false
        }
    }

    /// Guard for async work tied to this channel's lifetime.
    pub fn guard(&self) -> ChannelGuard {
        ChannelGuard {
            epoch: Arc::clone(&self.epoch),
            seen: self.epoch.load(Ordering::Relaxed),
        }
    }

    /// Intentional teardown. Invalidates outstanding guards first, so nothing
    /// observed through them can touch state, then closes the outbound queue
    /// to let the socket task exit without scheduling a reconnect.
    pub fn close(&self) {
        self.epoch.fetch_add(1, Ordering::Relaxed);
        #[cfg(feature = "hydrate")]
        if let Some(tx) = &self.tx {
            tx.close_channel();
        }
    }
}

/// Tracks whether the channel that issued it is still the live one.
#[derive(Clone, Debug)]
pub struct ChannelGuard {
    epoch: Arc<AtomicU64>,
    seen: u64,
}

impl ChannelGuard {
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::Relaxed) == self.seen
    }
}

/// Open the live channel for `(chat_id, user_id)` and spawn its socket task.
///
/// Outside the browser this returns an inert handle: `send` reports `false`
/// and `close` does nothing beyond invalidating guards.
pub fn open_channel(
    chat_id: String,
    user_id: String,
    chat: leptos::prelude::RwSignal<ChatWindowState>,
) -> ChannelHandle {
    #[cfg(feature = "hydrate")]
    {
        let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
        let handle = ChannelHandle {
            epoch: Arc::new(AtomicU64::new(0)),
            tx: Some(tx),
        };
        let guard = handle.guard();
        leptos::task::spawn_local(channel_loop(chat_id, user_id, chat, guard, rx));
        handle
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (chat_id, user_id, chat);
        ChannelHandle::default()
    }
}

/// Connect, pump, back off, repeat. Exits on teardown or an exhausted retry
/// budget.
#[cfg(feature = "hydrate")]
async fn channel_loop(
    chat_id: String,
    user_id: String,
    chat: leptos::prelude::RwSignal<ChatWindowState>,
    guard: ChannelGuard,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use leptos::prelude::Update;

    let rx = Rc::new(std::cell::RefCell::new(rx));
    let mut failures: u32 = 0;

    loop {
        chat.update(|c| c.connection_status = ConnectionStatus::Connecting);

        let location = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_else(|| "localhost:8000".to_owned());
        let url = channel_endpoint(location.starts_with("https"), &host, &chat_id, &user_id);

        let outcome = connect_and_run(&url, chat, &guard, &mut failures, &rx).await;
        if !guard.is_current() {
            return;
        }
        match outcome {
            Ok(()) => leptos::logging::log!("chat channel closed for chat {chat_id}"),
            Err(e) => {
                leptos::logging::warn!("chat channel error for chat {chat_id}: {e}");
                chat.update(|c| c.connection_status = ConnectionStatus::Errored);
            }
        }
        chat.update(|c| c.connection_status = ConnectionStatus::Disconnected);

        failures += 1;
        let Some(delay) = reconnect_delay_ms(failures) else {
            leptos::logging::warn!("retry budget exhausted for chat {chat_id}");
            chat.update(|c| c.retry_exhausted = true);
            return;
        };
        leptos::logging::log!("reconnecting chat {chat_id} in {delay}ms (attempt {failures})");
        gloo_timers::future::sleep(std::time::Duration::from_millis(delay)).await;
        if !guard.is_current() {
            return;
        }
    }
}

/// Connect once, report `Connected` after the handshake lands, then pump
/// messages until the socket dies or the channel is torn down.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    chat: leptos::prelude::RwSignal<ChatWindowState>,
    guard: &ChannelGuard,
    failures: &mut u32,
    rx: &Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<String>>>,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message as WsMessage;
    use gloo_net::websocket::futures::WebSocket;
    use leptos::prelude::Update;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;

    if !handshake_completed(&ws, guard).await {
        if !guard.is_current() {
            return Ok(());
        }
        return Err("connection failed before open".to_owned());
    }
    if !guard.is_current() {
        return Ok(());
    }

    // Only a completed handshake counts as a success for the retry budget.
    *failures = 0;
    chat.update(|c| {
        c.connection_status = ConnectionStatus::Connected;
        c.retry_exhausted = false;
    });

    let (mut ws_write, mut ws_read) = ws.split();

    // Forward queued outbound messages to the socket.
    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        use futures::SinkExt;
        while let Some(payload) = rx_borrow.next().await {
            if ws_write.send(WsMessage::Text(payload)).await.is_err() {
                break;
            }
        }
    };

    // Fold inbound events into the window state.
    let recv_task = async {
        while let Some(incoming) = ws_read.next().await {
            match incoming {
                Ok(WsMessage::Text(text)) => {
                    if !guard.is_current() {
                        break;
                    }
                    match serde_json::from_str::<ChannelEvent>(&text) {
                        Ok(event) => chat.update(|c| apply_event(c, event)),
                        Err(e) => {
                            leptos::logging::warn!("discarding malformed chat event: {e}");
                        }
                    }
                }
                Ok(WsMessage::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("chat channel recv error: {e}");
                    if guard.is_current() {
                        chat.update(|c| c.connection_status = ConnectionStatus::Errored);
                    }
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}

/// `WebSocket::open` returns while the browser handshake is still in flight;
/// poll the ready state so `Connected` is only reported for a socket that
/// actually opened. Teardown during the handshake stales the guard and stops
/// the poll instead of leaving it running until the browser gives up.
#[cfg(feature = "hydrate")]
async fn handshake_completed(
    ws: &gloo_net::websocket::futures::WebSocket,
    guard: &ChannelGuard,
) -> bool {
    use gloo_net::websocket::State;

    loop {
        match ws.state() {
            State::Connecting => {
                gloo_timers::future::sleep(std::time::Duration::from_millis(50)).await;
                if !guard.is_current() {
                    return false;
                }
            }
            State::Open => return true,
            State::Closing | State::Closed => return false,
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn channel_endpoint(secure: bool, host: &str, chat_id: &str, user_id: &str) -> String {
    let scheme = if secure { "wss" } else { "ws" };
    format!("{scheme}://{host}/api/chats/ws/{chat_id}/{user_id}")
}
