use super::*;

// ============================================================================
// Default state
// ============================================================================

#[test]
fn auth_default_is_loading_with_no_session() {
    let state = AuthState::default();
    assert!(state.session.is_none());
    assert!(state.loading);
}
