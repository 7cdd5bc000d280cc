//! Snapshot Diff
//!
//! Compares a snapshot before and after a mutation, table by table, by
//! record id:
//! - id only in `after` → insert (in `after` order)
//! - id in both, record changed → update
//! - id only in `before` → delete

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use kernel::id::{OrderId, ProductId, StoreId, UserId};

use crate::domain::entity::{
    database::Database, order::Order, product::Product, store::Store, user::User,
};

/// A row type stored in its own table
pub trait Record: Clone + PartialEq {
    type Key: Clone + Eq + Hash;

    fn key(&self) -> &Self::Key;
}

impl Record for User {
    type Key = UserId;

    fn key(&self) -> &UserId {
        &self.id
    }
}

impl Record for Store {
    type Key = StoreId;

    fn key(&self) -> &StoreId {
        &self.id
    }
}

impl Record for Product {
    type Key = ProductId;

    fn key(&self) -> &ProductId {
        &self.id
    }
}

impl Record for Order {
    type Key = OrderId;

    fn key(&self) -> &OrderId {
        &self.id
    }
}

/// Pending writes for one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableChanges<T: Record> {
    pub inserts: Vec<T>,
    pub updates: Vec<T>,
    pub deletes: Vec<T::Key>,
}

impl<T: Record> Default for TableChanges<T> {
    fn default() -> Self {
        Self {
            inserts: Vec::new(),
            updates: Vec::new(),
            deletes: Vec::new(),
        }
    }
}

impl<T: Record> TableChanges<T> {
    pub fn diff(before: &[T], after: &[T]) -> Self {
        let previous: HashMap<&T::Key, &T> =
            before.iter().map(|record| (record.key(), record)).collect();
        let remaining: HashSet<&T::Key> = after.iter().map(|record| record.key()).collect();

        let mut changes = Self::default();

        for record in after {
            match previous.get(record.key()) {
                None => changes.inserts.push(record.clone()),
                Some(old) if *old != record => changes.updates.push(record.clone()),
                Some(_) => {}
            }
        }

        changes.deletes = before
            .iter()
            .map(|record| record.key())
            .filter(|key| !remaining.contains(key))
            .cloned()
            .collect();

        changes
    }

    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }

    /// Number of row writes
    pub fn len(&self) -> usize {
        self.inserts.len() + self.updates.len() + self.deletes.len()
    }
}

/// Pending writes for the whole snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet {
    pub users: TableChanges<User>,
    pub stores: TableChanges<Store>,
    pub products: TableChanges<Product>,
    pub orders: TableChanges<Order>,
}

impl ChangeSet {
    pub fn diff(before: &Database, after: &Database) -> Self {
        Self {
            users: TableChanges::diff(&before.users, &after.users),
            stores: TableChanges::diff(&before.stores, &after.stores),
            products: TableChanges::diff(&before.products, &after.products),
            orders: TableChanges::diff(&before.orders, &after.orders),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.stores.is_empty()
            && self.products.is_empty()
            && self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len() + self.stores.len() + self.products.len() + self.orders.len()
    }
}
