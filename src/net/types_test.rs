use super::*;

// ============================================================================
// REST payloads
// ============================================================================

#[test]
fn session_accepts_a_numeric_user_id() {
    let session: Session = serde_json::from_str(
        r#"{"user_id":7,"username":"ann","email":"ann@example.com","token":"tok"}"#,
    )
    .expect("session should parse");
    assert_eq!(session.user_id, "7");
    assert_eq!(session.username, "ann");
}

#[test]
fn chat_summary_tolerates_null_name_and_numeric_members() {
    let chat: ChatSummary = serde_json::from_str(
        r#"{"id":3,"name":null,"chat_type":"one_to_one","created_by":1,"created_at":"2024-01-01T00:00:00","members":[1,2]}"#,
    )
    .expect("chat should parse");
    assert_eq!(chat.id, "3");
    assert!(chat.name.is_none());
    assert_eq!(chat.chat_type, ChatKind::OneToOne);
    assert_eq!(chat.members, vec!["1".to_owned(), "2".to_owned()]);
}

#[test]
fn chat_kind_wire_names_match_the_serde_encoding() {
    assert_eq!(ChatKind::OneToOne.wire_name(), "one_to_one");
    assert_eq!(ChatKind::Group.wire_name(), "group");
    let encoded = serde_json::to_value(ChatKind::Group).expect("kind should serialize");
    assert_eq!(encoded, serde_json::json!("group"));
}

#[test]
fn register_request_omits_a_missing_full_name() {
    let request = RegisterRequest {
        username: "ann".to_owned(),
        email: "ann@example.com".to_owned(),
        password: "pw".to_owned(),
        full_name: None,
    };
    let value = serde_json::to_value(&request).expect("request should serialize");
    assert!(value.get("full_name").is_none());
    assert_eq!(value.get("username"), Some(&serde_json::json!("ann")));
}

// ============================================================================
// Channel events
// ============================================================================

#[test]
fn message_events_parse_with_string_or_numeric_ids() {
    let event: ChannelEvent = serde_json::from_str(
        r#"{"type":"message","id":"m1","sender_id":"u2","content":"hi","created_at":"2024-01-01T00:00:00Z"}"#,
    )
    .expect("event should parse");
    let ChannelEvent::Message(message) = event else {
        panic!("expected a message event");
    };
    assert_eq!(message.id, "m1");
    assert_eq!(message.sender_id, "u2");
    assert!(message.chat_id.is_none());

    let event: ChannelEvent = serde_json::from_str(
        r#"{"type":"message","id":9,"chat_id":42,"sender_id":3,"content":"hey","created_at":"2024-01-01T00:00:01"}"#,
    )
    .expect("event should parse");
    let ChannelEvent::Message(message) = event else {
        panic!("expected a message event");
    };
    assert_eq!(message.id, "9");
    assert_eq!(message.chat_id.as_deref(), Some("42"));
    assert_eq!(message.sender_id, "3");
}

#[test]
fn presence_events_carry_the_full_active_set() {
    let event: ChannelEvent = serde_json::from_str(
        r#"{"type":"user_online","user_id":3,"timestamp":"2024-01-01T00:00:00Z","active_users":[3,7]}"#,
    )
    .expect("event should parse");
    let ChannelEvent::UserOnline(update) = event else {
        panic!("expected a user_online event");
    };
    assert_eq!(update.active_users, vec!["3".to_owned(), "7".to_owned()]);

    let event: ChannelEvent =
        serde_json::from_str(r#"{"type":"user_offline","active_users":[]}"#)
            .expect("event should parse");
    let ChannelEvent::UserOffline(update) = event else {
        panic!("expected a user_offline event");
    };
    assert!(update.active_users.is_empty());
}

#[test]
fn error_events_carry_the_server_message() {
    let event: ChannelEvent =
        serde_json::from_str(r#"{"type":"error","message":"not a member"}"#)
            .expect("event should parse");
    assert_eq!(
        event,
        ChannelEvent::Error {
            message: "not a member".to_owned()
        }
    );
}

#[test]
fn unknown_event_kinds_are_rejected() {
    assert!(serde_json::from_str::<ChannelEvent>(r#"{"type":"typing","user_id":1}"#).is_err());
    assert!(serde_json::from_str::<ChannelEvent>(r#"{"no_type":true}"#).is_err());
    assert!(serde_json::from_str::<ChannelEvent>("not json").is_err());
}

#[test]
fn outbound_messages_serialize_to_the_wire_shape() {
    let json = serde_json::to_string(&OutboundMessage {
        content: "hi".to_owned(),
    })
    .expect("message should serialize");
    assert_eq!(json, r#"{"content":"hi"}"#);
}
