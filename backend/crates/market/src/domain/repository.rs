//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::change_set::ChangeSet;
use crate::domain::entity::database::Database;
use crate::error::MarketResult;

/// Snapshot storage backend
#[trait_variant::make(MarketStore: Send)]
pub trait LocalMarketStore {
    /// Load every table; orders come back newest first
    async fn load(&self) -> MarketResult<Database>;

    /// Write a change set; either all of it lands or none of it does
    async fn apply(&self, changes: &ChangeSet) -> MarketResult<()>;
}
