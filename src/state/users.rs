//! Directory of registered users for the new-chat picker.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use crate::net::types::UserSummary;

#[derive(Clone, Debug, Default)]
pub struct UsersState {
    pub items: Vec<UserSummary>,
    pub loading: bool,
    pub error: Option<String>,
}
