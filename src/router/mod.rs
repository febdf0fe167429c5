//! Route table and navigation guard.
//!
//! ARCHITECTURE
//! ============
//! `routes` is pure data plus path resolution; `guard` turns a resolved route
//! and the current session into a navigation decision. The Leptos side lives
//! in `components::guarded`.

pub mod guard;
pub mod routes;
