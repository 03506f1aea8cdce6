//! Provider credential lookup.

/// Resolves a rule's credential reference to the secret it names.
///
/// Rules store only the *name* of the credential, never the secret.
pub trait CredentialSource: Send + Sync {
    /// The credential named `name`, or `None` if unset or empty.
    fn get(&self, name: &str) -> Option<String>;
}

/// Production source reading process environment variables.
pub struct EnvCredentialSource;

impl CredentialSource for EnvCredentialSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}
