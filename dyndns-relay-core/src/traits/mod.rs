//! Abstraction seams of the update pipeline.
//!
//! Each backend the pipeline touches (storage, HTTP probe, DNS provider,
//! subprocess, credential lookup) sits behind a trait so it is
//! independently testable. Production implementations live next to their
//! traits; platform frontends inject them through
//! [`ServiceContext`](crate::services::ServiceContext).

mod command_runner;
mod credential_source;
mod host_store;
mod provider_factory;
mod url_probe;

pub use command_runner::{CommandRunner, ShellRunner};
pub use credential_source::{CredentialSource, EnvCredentialSource};
pub use host_store::HostStore;
pub use provider_factory::{CloudflareFactory, ProviderFactory};
pub use url_probe::{HttpProbe, UrlProbe};
