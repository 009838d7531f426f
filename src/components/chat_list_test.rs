use super::*;
use crate::net::types::{ChatKind, ChatSummary, UserSummary};

fn chat(id: &str, name: Option<&str>, kind: ChatKind, members: &[&str]) -> ChatSummary {
    ChatSummary {
        id: id.to_owned(),
        name: name.map(ToOwned::to_owned),
        chat_type: kind,
        created_by: Some("1".to_owned()),
        created_at: None,
        members: members.iter().map(|m| (*m).to_owned()).collect(),
    }
}

fn user(id: &str, username: &str) -> UserSummary {
    UserSummary {
        id: id.to_owned(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        full_name: None,
        is_active: true,
    }
}

// ============================================================================
// Display names
// ============================================================================

#[test]
fn display_name_prefers_the_explicit_name() {
    let named = chat("9", Some("Weekend plans"), ChatKind::Group, &[]);
    assert_eq!(chat_display_name(&named), "Weekend plans");
}

#[test]
fn display_name_falls_back_to_the_chat_number() {
    let unnamed = chat("9", None, ChatKind::OneToOne, &[]);
    assert_eq!(chat_display_name(&unnamed), "Chat #9");

    let blank = chat("9", Some("   "), ChatKind::OneToOne, &[]);
    assert_eq!(chat_display_name(&blank), "Chat #9");
}

#[test]
fn list_kind_labels_match_the_chat_flavor() {
    assert_eq!(list_kind_label(ChatKind::OneToOne), "1-on-1");
    assert_eq!(list_kind_label(ChatKind::Group), "Group");
}

// ============================================================================
// One-to-one reuse
// ============================================================================

#[test]
fn find_one_to_one_matches_an_existing_direct_chat() {
    let chats = vec![
        chat("1", None, ChatKind::OneToOne, &["1", "2"]),
        chat("2", Some("team"), ChatKind::Group, &["1", "2", "3"]),
    ];
    assert_eq!(
        find_one_to_one(&chats, "2").map(|c| c.id.as_str()),
        Some("1")
    );
}

#[test]
fn find_one_to_one_ignores_groups_with_the_same_member() {
    let chats = vec![chat("2", Some("team"), ChatKind::Group, &["1", "2", "3"])];
    assert!(find_one_to_one(&chats, "2").is_none());
}

#[test]
fn find_one_to_one_reports_nothing_for_new_contacts() {
    let chats = vec![chat("1", None, ChatKind::OneToOne, &["1", "2"])];
    assert!(find_one_to_one(&chats, "3").is_none());
}

// ============================================================================
// Creation inputs
// ============================================================================

#[test]
fn group_names_must_survive_trimming() {
    assert_eq!(
        validate_group_name("  Weekend plans  "),
        Ok("Weekend plans".to_owned())
    );
    assert_eq!(validate_group_name("   "), Err("Enter a group chat name."));
}

#[test]
fn the_directory_excludes_the_signed_in_user() {
    let users = vec![user("1", "me"), user("2", "ann")];
    let choices = directory_choices(&users, "1");
    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0].username, "ann");
}
