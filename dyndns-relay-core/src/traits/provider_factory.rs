//! DNS provider construction.

use std::sync::Arc;

use dyndns_relay_provider::{CloudflareProvider, DnsProvider};

/// Builds a provider instance for a rule's credential.
///
/// Providers are constructed per dispatch because the API token comes from
/// the rule's credential reference, not from process-wide configuration.
pub trait ProviderFactory: Send + Sync {
    /// Create a provider authenticated with `api_token`.
    fn create(&self, api_token: &str) -> Arc<dyn DnsProvider>;
}

/// Production factory for the one concrete backend.
pub struct CloudflareFactory;

impl ProviderFactory for CloudflareFactory {
    fn create(&self, api_token: &str) -> Arc<dyn DnsProvider> {
        Arc::new(CloudflareProvider::new(api_token.to_string()))
    }
}
