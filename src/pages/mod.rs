//! Route-level pages.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (data loading, auth redirects)
//! and delegates rendering details to `components`.

pub mod chats;
pub mod login;
