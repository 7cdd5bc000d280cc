//! Checkout Use Case
//!
//! Turns a cart into one order per store. Stock is reserved as items are
//! processed; any rejected item aborts the whole checkout.

use std::sync::Arc;

use auth::{SessionClaims, UserRole};
use chrono::Utc;
use kernel::id::{OrderId, ProductId, StoreId};

use crate::application::access::session_user;
use crate::application::config::MarketConfig;
use crate::application::normalize;
use crate::application::transactor::Transactor;
use crate::domain::entity::order::{self, Order, OrderItem};
use crate::domain::repository::MarketStore;
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{MarketError, MarketResult};

/// Cart line as submitted
#[derive(Debug, Clone, Default)]
pub struct CartItem {
    pub product_id: Option<String>,
    pub qty: Option<f64>,
}

/// Checkout input
#[derive(Debug, Clone, Default)]
pub struct CheckoutInput {
    pub items: Vec<CartItem>,
    pub delivery_address: Option<String>,
    pub comment: Option<String>,
}

/// Checkout use case
pub struct CheckoutUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
    config: Arc<MarketConfig>,
}

impl<S> CheckoutUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>, config: Arc<MarketConfig>) -> Self {
        Self { transactor, config }
    }

    pub async fn execute(
        &self,
        session: SessionClaims,
        input: CheckoutInput,
    ) -> MarketResult<Vec<Order>> {
        if input.items.is_empty() {
            return Err(MarketError::validation("Cart is empty"));
        }
        let delivery_address = normalize::text(input.delivery_address.as_deref())
            .ok_or_else(|| MarketError::validation("Delivery address is required"))?;
        let comment = normalize::text(input.comment.as_deref());
        let delivery_fee_rub = self.config.delivery_fee_rub;

        let orders = self
            .transactor
            .update(move |db| {
                let buyer_id = {
                    let user = session_user(db, &session)?;
                    if user.role == UserRole::Seller {
                        return Err(MarketError::forbidden("Sellers cannot checkout"));
                    }
                    user.id.clone()
                };

                let now = Utc::now();
                let mut groups: Vec<(StoreId, Vec<OrderItem>)> = Vec::new();

                for item in &input.items {
                    let product_id = item
                        .product_id
                        .as_deref()
                        .filter(|id| !id.is_empty())
                        .map(ProductId::from);
                    let qty = normalize::cart_qty(item.qty);
                    let (Some(product_id), Some(qty)) = (product_id, qty) else {
                        return Err(MarketError::validation("Invalid cart item"));
                    };

                    let product = db.product_mut(&product_id).ok_or_else(|| {
                        MarketError::not_found(format!("Product {product_id} not found"))
                    })?;
                    if qty < product.min_qty {
                        return Err(MarketError::validation(format!(
                            "{}: minimum order is {}",
                            product.name, product.min_qty
                        )));
                    }
                    if qty > product.stock {
                        return Err(MarketError::validation(format!(
                            "{}: only {} pcs left",
                            product.name, product.stock
                        )));
                    }

                    product.stock -= qty;
                    product.updated_at = now;

                    let line = OrderItem {
                        product_id: product.id.clone(),
                        name: product.name.clone(),
                        sku: product.sku.clone(),
                        qty,
                        price_rub: product.price_rub,
                    };

                    match groups.iter_mut().find(|(store_id, _)| store_id == &product.store_id) {
                        Some((_, lines)) => lines.push(line),
                        None => groups.push((product.store_id.clone(), vec![line])),
                    }
                }

                let orders = groups
                    .into_iter()
                    .map(|(store_id, items)| {
                        let totals = order::subtotal_rub(&items).and_then(|subtotal| {
                            Some((subtotal, subtotal.checked_add(delivery_fee_rub)?))
                        });
                        let Some((subtotal_rub, total_rub)) = totals else {
                            return Err(MarketError::validation("Order total is too large"));
                        };

                        Ok(Order {
                            id: OrderId::generate(),
                            buyer_id: buyer_id.clone(),
                            store_id,
                            status: OrderStatus::New,
                            items,
                            subtotal_rub,
                            delivery_fee_rub,
                            total_rub,
                            delivery_address: delivery_address.clone(),
                            comment: comment.clone(),
                            created_at: now,
                            updated_at: now,
                        })
                    })
                    .collect::<MarketResult<Vec<Order>>>()?;

                db.orders.splice(0..0, orders.iter().cloned());
                Ok(orders)
            })
            .await?;

        tracing::info!(
            orders = orders.len(),
            total_rub = orders
                .iter()
                .map(|order| order.total_rub)
                .fold(0i64, i64::saturating_add),
            "Checkout completed"
        );

        Ok(orders)
    }
}
