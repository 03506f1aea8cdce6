//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dyndns_relay_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No host record matches the submitted token
    #[error("Host not found")]
    HostNotFound(String),

    /// The asserted domain differs from the host's configured domain
    #[error("Configured domain does not match")]
    DomainMismatch {
        asserted: String,
        configured: String,
    },

    /// Malformed inbound data (prefix, hardware address, address family)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rule argument or command template failed to render
    #[error("Template error: {0}")]
    Template(String),

    /// HTTP probe transport failure or non-2xx response
    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    /// Shell rule spawn failure or non-zero exit
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Provider error (converted from the provider library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the error reflects expected behavior (bad input, missing
    /// resource) rather than an operational failure. Used for log
    /// classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    /// **Please update this method simultaneously when new variants are
    /// added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::HostNotFound(_) | Self::DomainMismatch { .. } | Self::BadRequest(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
