//! Order
//!
//! One order per store per checkout. Line items copy the product name, SKU
//! and price at checkout time, so later catalog edits do not rewrite
//! history.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, StoreId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::order_status::OrderStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub qty: i64,
    pub price_rub: i64,
}

impl OrderItem {
    /// `price * qty`; `None` on overflow
    pub fn line_total_rub(&self) -> Option<i64> {
        self.price_rub.checked_mul(self.qty)
    }
}

/// Sum of line totals; `None` on overflow
pub fn subtotal_rub(items: &[OrderItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, item| acc.checked_add(item.line_total_rub()?))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: UserId,
    pub store_id: StoreId,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal_rub: i64,
    pub delivery_fee_rub: i64,
    pub total_rub: i64,
    pub delivery_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
