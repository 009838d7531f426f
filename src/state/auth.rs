//! Authentication state.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Session;

/// The signed-in session plus whether restore from storage has finished.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub session: Option<Session>,
    /// True until the persisted session has been checked once.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}
