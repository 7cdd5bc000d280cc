//! Order Status Use Case

use auth::SessionClaims;
use chrono::Utc;
use kernel::id::OrderId;

use crate::application::access::{ensure_owns_store, staff_user};
use crate::application::transactor::Transactor;
use crate::domain::entity::order::Order;
use crate::domain::repository::MarketStore;
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{MarketError, MarketResult};

/// Moves an order to a new status; sellers only for their own store
pub struct UpdateOrderStatusUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
}

impl<S> UpdateOrderStatusUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>) -> Self {
        Self { transactor }
    }

    pub async fn execute(
        &self,
        session: SessionClaims,
        order_id: OrderId,
        status: Option<&str>,
    ) -> MarketResult<Order> {
        let status = status
            .and_then(OrderStatus::from_code)
            .ok_or_else(|| MarketError::validation("Invalid status"))?;

        let order = self
            .transactor
            .update(move |db| {
                let user = staff_user(db, &session)?.clone();

                let order = db
                    .order_mut(&order_id)
                    .ok_or_else(|| MarketError::not_found("Order not found"))?;
                ensure_owns_store(&user, &order.store_id, "Cannot update foreign store order")?;

                order.status = status;
                order.updated_at = Utc::now();
                Ok(order.clone())
            })
            .await?;

        tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");

        Ok(order)
    }
}
