use super::*;
use crate::net::types::{ChannelEvent, Message};
use crate::state::chat::{ChatWindowState, ConnectionStatus};

fn message(id: &str, content: &str) -> Message {
    Message {
        id: id.to_owned(),
        chat_id: Some("42".to_owned()),
        sender_id: "u2".to_owned(),
        content: content.to_owned(),
        created_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

fn event(json: &str) -> ChannelEvent {
    serde_json::from_str(json).expect("event should parse")
}

// ============================================================================
// Reconnect backoff
// ============================================================================

#[test]
fn reconnect_delays_double_up_to_the_cap() {
    let delays: Vec<_> = (1..=MAX_RECONNECT_ATTEMPTS).map(reconnect_delay_ms).collect();
    assert_eq!(
        delays,
        vec![
            Some(1000),
            Some(2000),
            Some(4000),
            Some(8000),
            Some(10_000)
        ]
    );
}

#[test]
fn no_sixth_reconnect_is_scheduled() {
    assert_eq!(reconnect_delay_ms(MAX_RECONNECT_ATTEMPTS + 1), None);
}

#[test]
fn reconnect_delay_rejects_zero_failures() {
    assert_eq!(reconnect_delay_ms(0), None);
}

// ============================================================================
// Message log merge
// ============================================================================

#[test]
fn merge_ignores_duplicate_ids() {
    let mut log = vec![message("m1", "hi")];
    merge_message(&mut log, message("m1", "hi again"));
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].content, "hi");
}

#[test]
fn merge_appends_new_ids_in_arrival_order() {
    let mut log = Vec::new();
    merge_message(&mut log, message("m1", "one"));
    merge_message(&mut log, message("m2", "two"));
    let ids: Vec<_> = log.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"]);
}

#[test]
fn duplicate_delivery_keeps_one_copy_in_either_order() {
    // History lands first, live copy second.
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    apply_history(&mut chat, "42", vec![message("m1", "hi")]);
    apply_event(&mut chat, ChannelEvent::Message(message("m1", "hi")));
    assert_eq!(chat.messages.len(), 1);

    // Live copy first, history second.
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    apply_event(&mut chat, ChannelEvent::Message(message("m1", "hi")));
    apply_history(&mut chat, "42", vec![message("m1", "hi")]);
    assert_eq!(chat.messages.len(), 1);
}

#[test]
fn history_replaces_the_log_wholesale() {
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    apply_event(&mut chat, ChannelEvent::Message(message("m9", "live")));
    apply_history(&mut chat, "42", vec![message("m1", "one"), message("m2", "two")]);
    let ids: Vec<_> = chat.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"]);
}

#[test]
fn history_for_a_stale_binding_is_dropped() {
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "43");
    apply_history(&mut chat, "42", vec![message("m1", "old chat")]);
    assert!(chat.messages.is_empty());
}

#[test]
fn live_messages_append_after_fetched_history() {
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    apply_history(&mut chat, "42", vec![message("m1", "old")]);
    apply_event(&mut chat, ChannelEvent::Message(message("m2", "new")));
    let ids: Vec<_> = chat.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"]);
}

#[test]
fn an_empty_chat_gains_its_first_live_message_once() {
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    apply_history(&mut chat, "42", Vec::new());

    let incoming = event(
        r#"{"type":"message","id":"m1","sender_id":"u2","content":"hi","created_at":"2024-01-01T00:00:00Z"}"#,
    );
    apply_event(&mut chat, incoming.clone());
    apply_event(&mut chat, incoming);

    assert_eq!(chat.messages.len(), 1);
    assert_eq!(chat.messages[0].id, "m1");
    assert_eq!(chat.messages[0].content, "hi");
}

// ============================================================================
// Presence and server errors
// ============================================================================

#[test]
fn presence_events_replace_the_whole_set() {
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    apply_event(
        &mut chat,
        event(r#"{"type":"user_online","user_id":"A","active_users":["A","B"]}"#),
    );
    assert_eq!(chat.active_users.len(), 2);
    assert!(chat.active_users.contains("A"));
    assert!(chat.active_users.contains("B"));

    apply_event(
        &mut chat,
        event(r#"{"type":"user_offline","user_id":"B","active_users":["A"]}"#),
    );
    let remaining: Vec<_> = chat.active_users.iter().cloned().collect();
    assert_eq!(remaining, ["A"]);
}

#[test]
fn server_error_events_do_not_touch_connection_state() {
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    chat.connection_status = ConnectionStatus::Connected;

    apply_event(&mut chat, event(r#"{"type":"error","message":"not a member"}"#));

    assert_eq!(chat.connection_status, ConnectionStatus::Connected);
    assert_eq!(chat.last_error.as_deref(), Some("not a member"));
}

// ============================================================================
// Rebinding
// ============================================================================

#[test]
fn reset_rebinds_and_clears_previous_chat_state() {
    let mut chat = ChatWindowState::default();
    reset_for_chat(&mut chat, "42");
    apply_event(&mut chat, ChannelEvent::Message(message("m1", "hi")));
    chat.retry_exhausted = true;
    chat.last_error = Some("boom".to_owned());
    chat.connection_status = ConnectionStatus::Connected;

    reset_for_chat(&mut chat, "43");

    assert_eq!(chat.chat_id.as_deref(), Some("43"));
    assert!(chat.messages.is_empty());
    assert!(chat.active_users.is_empty());
    assert!(!chat.retry_exhausted);
    assert!(chat.last_error.is_none());
    assert_eq!(chat.connection_status, ConnectionStatus::Disconnected);
}

// ============================================================================
// Send gating
// ============================================================================

#[test]
fn validate_send_trims_and_requires_connected() {
    assert_eq!(
        validate_send("  hi  ", ConnectionStatus::Connected),
        Ok("hi".to_owned())
    );
    assert_eq!(
        validate_send("   ", ConnectionStatus::Connected),
        Err(SendError::BlankContent)
    );
    assert_eq!(
        validate_send("hi", ConnectionStatus::Connecting),
        Err(SendError::NotConnected)
    );
    assert_eq!(
        validate_send("hi", ConnectionStatus::Errored),
        Err(SendError::NotConnected)
    );
    assert_eq!(
        validate_send("hi", ConnectionStatus::Disconnected),
        Err(SendError::NotConnected)
    );
}

#[test]
fn blank_content_is_rejected_before_connection_state() {
    assert_eq!(
        validate_send("  ", ConnectionStatus::Disconnected),
        Err(SendError::BlankContent)
    );
}

// ============================================================================
// Handle lifecycle
// ============================================================================

#[test]
fn closing_the_handle_invalidates_guards() {
    let handle = ChannelHandle::default();
    let guard = handle.guard();
    assert!(guard.is_current());
    handle.close();
    assert!(!guard.is_current());
}

#[test]
fn guards_from_clones_share_one_epoch() {
    let handle = ChannelHandle::default();
    let clone = handle.clone();
    let guard = clone.guard();
    handle.close();
    assert!(!guard.is_current());
}

#[test]
fn send_without_a_live_channel_reports_false() {
    let handle = ChannelHandle::default();
    assert!(!handle.send("hello"));
}

// ============================================================================
// Endpoint formatting
// ============================================================================

#[test]
fn channel_endpoint_formats_ws_and_wss_urls() {
    assert_eq!(
        channel_endpoint(false, "localhost:8000", "42", "7"),
        "ws://localhost:8000/api/chats/ws/42/7"
    );
    assert_eq!(
        channel_endpoint(true, "chat.example.com", "42", "7"),
        "wss://chat.example.com/api/chats/ws/42/7"
    );
}
