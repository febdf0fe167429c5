//! Networking modules for the library REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns transport, auth injection and failure handling, `api` maps
//! endpoints to typed calls, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod types;
