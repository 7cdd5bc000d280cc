//! Serialized Snapshot Transactions
//!
//! Every write goes through [`Transactor::update`]: load a fresh snapshot,
//! let the caller mutate a copy, then push only the difference. Writers
//! queue on one async mutex, so within this process no two read-modify-write
//! cycles interleave.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::change_set::ChangeSet;
use crate::domain::entity::database::Database;
use crate::domain::repository::MarketStore;
use crate::error::MarketResult;

pub struct Transactor<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    store: Arc<S>,
    write_lock: Arc<Mutex<()>>,
}

impl<S> Clone for Transactor<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            write_lock: self.write_lock.clone(),
        }
    }
}

impl<S> Transactor<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load a snapshot without waiting for writers
    pub async fn read(&self) -> MarketResult<Database> {
        self.store.load().await
    }

    /// Run `mutator` on a copy of a fresh snapshot and persist its changes
    ///
    /// A failing mutator writes nothing. An unchanged snapshot skips the
    /// backend write.
    pub async fn update<T, F>(&self, mutator: F) -> MarketResult<T>
    where
        F: FnOnce(&mut Database) -> MarketResult<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;

        let before = self.store.load().await?;
        let mut working = before.clone();
        let result = mutator(&mut working)?;

        let changes = ChangeSet::diff(&before, &working);
        if changes.is_empty() {
            return Ok(result);
        }

        self.store.apply(&changes).await?;
        Ok(result)
    }
}
