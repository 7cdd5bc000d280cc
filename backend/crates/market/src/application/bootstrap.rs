//! Bootstrap Use Case
//!
//! Everything the Mini App needs on launch, shaped by the caller's role.

use std::sync::Arc;

use auth::{SessionClaims, UserRole};
use serde::Serialize;

use crate::application::config::MarketConfig;
use crate::application::transactor::Transactor;
use crate::domain::entity::{
    database::Database,
    order::Order,
    product::Product,
    store::Store,
    user::{PublicUser, User},
};
use crate::domain::repository::MarketStore;
use crate::error::MarketResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapPayload {
    pub authenticated: bool,
    pub app_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_data: Option<BuyerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_data: Option<SellerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_data: Option<AdminData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuyerData {
    pub stores: Vec<Store>,
    pub products: Vec<Product>,
    /// The buyer's own orders, newest first
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellerData {
    /// `null` when the seller's store no longer exists
    pub store: Option<Store>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminData {
    pub stores: Vec<Store>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub users: Vec<PublicUser>,
    pub metrics: AdminMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetrics {
    pub total_revenue_rub: i64,
    pub total_orders: usize,
    pub active_stores: usize,
    pub sellers: usize,
    pub buyers: usize,
}

impl AdminMetrics {
    pub fn collect(db: &Database) -> Self {
        let count_role = |role: UserRole| db.users.iter().filter(|u| u.role == role).count();

        Self {
            total_revenue_rub: db
                .orders
                .iter()
                .map(|order| order.total_rub)
                .fold(0, i64::saturating_add),
            total_orders: db.orders.len(),
            active_stores: db.stores.len(),
            sellers: count_role(UserRole::Seller),
            buyers: count_role(UserRole::Buyer),
        }
    }
}

/// Bootstrap use case
pub struct BootstrapUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
    config: Arc<MarketConfig>,
}

impl<S> BootstrapUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>, config: Arc<MarketConfig>) -> Self {
        Self { transactor, config }
    }

    pub async fn execute(&self, session: Option<SessionClaims>) -> MarketResult<BootstrapPayload> {
        let Some(session) = session else {
            return Ok(self.anonymous());
        };

        let mut db = self.transactor.read().await?;
        db.sort_orders();

        let Some(user) = db.user(&session.user_id).cloned() else {
            tracing::debug!(user_id = %session.user_id, "Session user no longer exists");
            return Ok(self.anonymous());
        };

        let mut payload = BootstrapPayload {
            authenticated: true,
            user: Some(PublicUser::from(&user)),
            ..self.anonymous()
        };

        match user.role {
            UserRole::Buyer => payload.buyer_data = Some(buyer_data(db, &user)),
            UserRole::Seller => payload.seller_data = Some(seller_data(db, &user)),
            UserRole::Admin => payload.admin_data = Some(admin_data(db)),
        }

        Ok(payload)
    }

    fn anonymous(&self) -> BootstrapPayload {
        BootstrapPayload {
            authenticated: false,
            app_name: self.config.app_name.clone(),
            user: None,
            buyer_data: None,
            seller_data: None,
            admin_data: None,
        }
    }
}

fn buyer_data(db: Database, user: &User) -> BuyerData {
    let orders = db
        .orders
        .into_iter()
        .filter(|order| order.buyer_id == user.id)
        .collect();

    BuyerData {
        stores: db.stores,
        products: db.products,
        orders,
    }
}

fn seller_data(db: Database, user: &User) -> SellerData {
    let Some(store_id) = user.store_id.as_ref() else {
        return SellerData {
            store: None,
            products: Vec::new(),
            orders: Vec::new(),
        };
    };

    SellerData {
        store: db.store(store_id).cloned(),
        products: db.products_of_store(store_id),
        orders: db
            .orders
            .into_iter()
            .filter(|order| &order.store_id == store_id)
            .collect(),
    }
}

fn admin_data(db: Database) -> AdminData {
    let metrics = AdminMetrics::collect(&db);

    AdminData {
        users: db.users.iter().map(PublicUser::from).collect(),
        stores: db.stores,
        products: db.products,
        orders: db.orders,
        metrics,
    }
}
