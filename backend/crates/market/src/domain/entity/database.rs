//! Database Snapshot
//!
//! The whole marketplace loaded into memory. Use cases mutate a clone of a
//! snapshot; the difference against the original is what gets written.

use auth::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, StoreId, UserId};
use serde::{Deserialize, Serialize};

use super::{order::Order, product::Product, store::Store, user::User};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meta {
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            version: SNAPSHOT_VERSION,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub meta: Meta,
    pub users: Vec<User>,
    pub stores: Vec<Store>,
    pub products: Vec<Product>,
    /// Newest first
    pub orders: Vec<Order>,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            meta: Meta::now(),
            users: Vec::new(),
            stores: Vec::new(),
            products: Vec::new(),
            orders: Vec::new(),
        }
    }
}

impl Database {
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    pub fn user_by_telegram_id_mut(&mut self, tg_id: i64) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.tg_id == Some(tg_id))
    }

    pub fn has_telegram_id(&self, tg_id: i64) -> bool {
        self.users.iter().any(|user| user.tg_id == Some(tg_id))
    }

    /// First user holding `role`, in table order
    pub fn first_with_role(&self, role: UserRole) -> Option<&User> {
        self.users.iter().find(|user| user.role == role)
    }

    pub fn store(&self, id: &StoreId) -> Option<&Store> {
        self.stores.iter().find(|store| &store.id == id)
    }

    pub fn store_mut(&mut self, id: &StoreId) -> Option<&mut Store> {
        self.stores.iter_mut().find(|store| &store.id == id)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| &product.id == id)
    }

    pub fn order_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|order| &order.id == id)
    }

    pub fn products_of_store(&self, store_id: &StoreId) -> Vec<Product> {
        self.products
            .iter()
            .filter(|product| &product.store_id == store_id)
            .cloned()
            .collect()
    }

    /// Sort orders newest first; ties keep their relative order
    pub fn sort_orders(&mut self) {
        self.orders
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}
