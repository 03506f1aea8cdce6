//! Business logic service layer

mod update_service;

pub use update_service::UpdateService;

use std::sync::Arc;

use crate::traits::{CommandRunner, CredentialSource, HostStore, ProviderFactory, UrlProbe};

/// Service context - holds all pipeline dependencies.
///
/// The platform frontend creates this context once at startup and injects
/// its storage and dispatch implementations.
pub struct ServiceContext {
    /// Host persistence
    pub host_store: Arc<dyn HostStore>,
    /// HTTP probe backend
    pub probe: Arc<dyn UrlProbe>,
    /// Shell command backend
    pub runner: Arc<dyn CommandRunner>,
    /// DNS provider construction
    pub providers: Arc<dyn ProviderFactory>,
    /// Credential reference resolution
    pub credentials: Arc<dyn CredentialSource>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        host_store: Arc<dyn HostStore>,
        probe: Arc<dyn UrlProbe>,
        runner: Arc<dyn CommandRunner>,
        providers: Arc<dyn ProviderFactory>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            host_store,
            probe,
            runner,
            providers,
            credentials,
        }
    }
}
