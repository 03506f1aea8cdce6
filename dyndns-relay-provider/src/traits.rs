use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{AddressRecord, DnsRecord};

/// Raw API error (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code, in whatever format the provider uses.
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context available when mapping an API error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record ID, for `RecordNotFound`.
    pub record_id: Option<String>,
    /// Zone name, for `DomainNotFound`.
    pub domain: Option<String>,
}

/// Error mapping trait implemented per provider (internal).
///
/// Maps raw API errors onto the unified [`ProviderError`] type.
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in error values.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error onto the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: transport-level error, distinguishing timeouts.
    fn transport_error(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                provider: self.provider_name().to_string(),
                detail: err.to_string(),
            }
        } else {
            ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: err.to_string(),
            }
        }
    }

    /// Shortcut: response parse error.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A DNS provider the update pipeline can push address records to.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Upsert the given address records into `zone`.
    ///
    /// For each record, any existing record with the same name and type is
    /// replaced; a record is created when none exists. Returns the records
    /// as reported back by the provider.
    async fn set_records(&self, zone: &str, records: &[AddressRecord]) -> Result<Vec<DnsRecord>>;
}
