//! Actix-web frontend for dyndns-relay.
//!
//! Wires the core update pipeline to HTTP: env-driven configuration, the
//! SeaORM host store, request handlers, and error-to-status mapping.

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;
