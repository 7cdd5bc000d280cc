//! Wholesale Store

use chrono::{DateTime, Utc};
use kernel::id::StoreId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub city: String,
    pub address: String,
    pub description: String,
    pub phone: String,
    /// Minimum order value in whole rubles
    pub min_order_rub: i64,
    pub delivery_days: i64,
    pub rating: f64,
    pub verified: bool,
    pub logo_url: String,
    pub cover_url: String,
    /// Product categories in first-use order, no duplicates
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Record a category if the store does not list it yet
    pub fn add_category(&mut self, category: &str) {
        if !self.categories.iter().any(|known| known == category) {
            self.categories.push(category.to_string());
        }
    }
}
