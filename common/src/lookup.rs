use async_trait::async_trait;

use crate::models::record::AddressRecord;

/// Defines the contract for resolving an address against an IP-intelligence source.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Resolves a single address.
    ///
    /// Implementations must return a well-formed record for every non-empty input.
    /// Unknown or syntactically invalid addresses get a fallback record rather
    /// than an error.
    async fn resolve(&self, address: &str) -> AddressRecord;
}
