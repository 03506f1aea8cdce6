//! Update rule type and action resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured follow-up action, executed when a host's address changed.
///
/// Rules belong to exactly one host and execute in ascending id order. The
/// `cmd` column is polymorphic; [`UpdateRule::action`] resolves it into a
/// closed variant once, at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRule {
    pub id: i64,
    /// Token of the owning host.
    pub token: String,
    /// Dispatch discriminator: `"GET"`, `"cloudflare"`, or a command
    /// template.
    pub cmd: String,
    /// Argument template, rendered against the request context.
    pub args: String,
    /// Name of the environment variable holding the provider credential.
    /// This is a reference, never the secret itself.
    pub credential_env: Option<String>,
    pub modified: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

/// Resolved dispatch target for a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction<'a> {
    /// HTTP GET against the rendered argument URL.
    Probe,
    /// Push address records to the DNS provider.
    DnsPush,
    /// Render `cmd` as a second template and run it as a shell command line.
    ShellExec(&'a str),
}

impl UpdateRule {
    /// Resolve the polymorphic `cmd` column into its dispatch variant.
    #[must_use]
    pub fn action(&self) -> RuleAction<'_> {
        match self.cmd.as_str() {
            "GET" => RuleAction::Probe,
            "cloudflare" => RuleAction::DnsPush,
            other => RuleAction::ShellExec(other),
        }
    }
}
