//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates console chrome to
//! `components::layout`. Pages assume the guard already ran.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod reader;
pub mod register;
