//! Host persistence abstraction.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{AddressUpdate, UpdateApplied, UpdateRule};

/// Transactional host lookup and conditional address update.
///
/// Implementations must run [`apply_addresses`](HostStore::apply_addresses)
/// as one transaction spanning lookup, domain check, comparison, and the
/// conditional write, serialized per token: of two concurrent identical
/// submissions at most one may observe a change, and the returned host row
/// is the one the transaction committed.
#[async_trait]
pub trait HostStore: Send + Sync {
    /// Look up the host by token and stage any changed address fields.
    ///
    /// # Errors
    /// - `HostNotFound` if the token is unknown.
    /// - `DomainMismatch` if the asserted domain differs from the stored
    ///   one; nothing is written.
    async fn apply_addresses(&self, update: &AddressUpdate) -> CoreResult<UpdateApplied>;

    /// All rules configured for a token, in stored (ascending id) order.
    async fn rules_for(&self, token: &str) -> CoreResult<Vec<UpdateRule>>;
}
