//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components provide route guarding, console chrome and notifications while
//! reading shared state from Leptos context providers.

pub mod guarded;
pub mod layout;
pub mod toast_host;
