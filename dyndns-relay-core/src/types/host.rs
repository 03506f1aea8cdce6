//! Host record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A host record as stored by the admin collaborator.
///
/// The token is the primary key and the sole authentication factor for
/// inbound updates. Address fields are optional: "never reported" is
/// distinct from any reported value, including the empty string, when
/// deciding whether an update changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Per-host secret identifying the record (primary key).
    pub token: String,
    /// Human-readable label.
    pub name: String,
    /// Fully-qualified domain name of the host.
    pub domain: String,
    /// DNS zone the host's records live in.
    pub zone: String,
    /// Last reported IPv4 address.
    pub ip4addr: Option<String>,
    /// Last reported IPv6 address.
    pub ip6addr: Option<String>,
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// Creation time.
    pub created: DateTime<Utc>,
}
