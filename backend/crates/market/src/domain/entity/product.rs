//! Catalog Product

use chrono::{DateTime, Utc};
use kernel::id::{ProductId, StoreId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub sku: String,
    pub category: String,
    /// Unit price in whole rubles, at least 1
    pub price_rub: i64,
    /// Smallest quantity a buyer may order, at least 1
    pub min_qty: i64,
    pub stock: i64,
    pub image_url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
