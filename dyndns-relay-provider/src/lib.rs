//! # dyndns-relay-provider
//!
//! DNS provider abstraction for the dyndns-relay update pipeline, together
//! with the one concrete backend the service ships: Cloudflare.
//!
//! The surface is intentionally small. A provider knows how to *set* address
//! records: replace whatever record of the same name and type currently
//! exists in a zone with the submitted value, creating it when absent. That
//! upsert is the only operation the update pipeline ever performs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dyndns_relay_provider::{AddressRecord, CloudflareProvider, DnsProvider, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = CloudflareProvider::new("api-token".to_string());
//!     let records = vec![AddressRecord {
//!         name: "router".to_string(),
//!         record_type: RecordType::A,
//!         value: "203.0.113.7".to_string(),
//!     }];
//!     provider.set_records("example.com", &records).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). The
//! error enum is serializable and carries the provider id plus
//! variant-specific context; `is_expected()` classifies errors for log
//! levelling.

mod error;
mod names;
mod providers;
mod traits;
mod types;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core trait only (internal mapping traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{AddressRecord, DnsRecord, RecordType};

// Re-export naming helpers shared with the update pipeline
pub use names::{full_name_to_relative, normalize_domain_name, relative_to_full_name};

// Re-export the concrete provider
pub use providers::CloudflareProvider;
