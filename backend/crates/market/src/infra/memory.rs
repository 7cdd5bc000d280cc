//! In-Memory Store
//!
//! Process-local backend for tests and for running without PostgreSQL.
//! Rows keep insertion order; new rows are appended.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::change_set::{ChangeSet, Record, TableChanges};
use crate::domain::entity::database::Database;
use crate::domain::repository::MarketStore;
use crate::error::MarketResult;
use crate::infra::seed::demo_database;

#[derive(Clone, Default)]
pub struct MemoryMarketStore {
    db: Arc<RwLock<Database>>,
}

impl MemoryMarketStore {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(RwLock::new(db)),
        }
    }

    /// Store pre-filled with the demo marketplace
    pub fn seeded() -> Self {
        Self::new(demo_database())
    }
}

impl MarketStore for MemoryMarketStore {
    async fn load(&self) -> MarketResult<Database> {
        let mut db = self.db.read().await.clone();
        db.sort_orders();
        Ok(db)
    }

    async fn apply(&self, changes: &ChangeSet) -> MarketResult<()> {
        let mut db = self.db.write().await;

        apply_table(&mut db.users, &changes.users);
        apply_table(&mut db.stores, &changes.stores);
        apply_table(&mut db.products, &changes.products);
        apply_table(&mut db.orders, &changes.orders);
        db.meta.updated_at = Utc::now();

        Ok(())
    }
}

fn apply_table<T: Record>(rows: &mut Vec<T>, changes: &TableChanges<T>) {
    rows.retain(|row| !changes.deletes.contains(row.key()));

    for updated in &changes.updates {
        if let Some(row) = rows.iter_mut().find(|row| row.key() == updated.key()) {
            *row = updated.clone();
        }
    }

    rows.extend(changes.inserts.iter().cloned());
}
