//! Utility helpers shared across pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser and environment concerns from page and
//! component logic to improve reuse and testability.

pub mod auth;
pub mod session;
pub mod time;
