//! Inbound request and store-facing update types.

use serde::Serialize;

use crate::types::Host;

/// The raw fields of an inbound update callback.
///
/// Empty submitted fields are normalized to `None` before this type is
/// constructed, so `Some` always carries a non-empty string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRequest {
    pub token: String,
    /// Domain asserted by the caller; must equal the stored domain.
    pub domain: String,
    /// Literal IPv4 address, if reported.
    pub ipaddr: Option<String>,
    /// Literal IPv6 address, if reported. Bypasses EUI-64 derivation.
    pub ip6addr: Option<String>,
    /// IPv6 LAN prefix in CIDR form, for EUI-64 derivation.
    pub ip6lanprefix: Option<String>,
    /// Hardware address of the device, for EUI-64 derivation.
    pub ether: Option<String>,
}

/// The resolved address update handed to the host store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressUpdate {
    pub token: String,
    pub domain: String,
    /// IPv4 address to stage, if submitted.
    pub ip4: Option<String>,
    /// IPv6 address to stage (literal or derived), if available.
    pub ip6: Option<String>,
}

/// Result of the transactional lookup + conditional write.
#[derive(Debug, Clone)]
pub struct UpdateApplied {
    /// The host row as persisted when the transaction committed.
    pub host: Host,
    /// Whether at least one address field actually changed.
    pub modified: bool,
}

/// Terminal outcome of a handled update, mapped to the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one address changed and every rule completed.
    Modified,
    /// Nothing changed; the action pipeline never ran.
    Unchanged,
}
