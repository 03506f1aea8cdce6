//! dyndns-relay Core Library
//!
//! Implements the update pipeline for dynamic-address callbacks:
//! - Address resolution (literal or EUI-64 derivation)
//! - Transactional host lookup and change detection (via `HostStore`)
//! - Rule rendering and dispatch (HTTP probe, DNS push, shell command)
//!
//! This library is platform-independent: storage and dispatch backends are
//! abstracted through traits and injected by the frontend (currently the
//! actix-web binary).

pub mod error;
pub mod eui64;
pub mod render;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ServiceContext, UpdateService};
pub use traits::{
    CloudflareFactory, CommandRunner, CredentialSource, EnvCredentialSource, HostStore, HttpProbe,
    ProviderFactory, ShellRunner, UrlProbe,
};
pub use types::{
    AddressUpdate, Host, RuleAction, UpdateApplied, UpdateOutcome, UpdateRequest, UpdateRule,
};
