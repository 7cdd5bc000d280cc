//! Market Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};

use auth::AuthConfig;

use crate::application::Transactor;
use crate::application::config::MarketConfig;
use crate::domain::repository::MarketStore;
use crate::infra::postgres::PgMarketStore;
use crate::presentation::handlers::{self, MarketAppState};

/// Create the market router backed by PostgreSQL
pub fn market_router(store: PgMarketStore, auth_config: AuthConfig, config: MarketConfig) -> Router {
    market_router_generic(store, auth_config, config)
}

/// Create the market router for any store implementation
pub fn market_router_generic<S>(store: S, auth_config: AuthConfig, config: MarketConfig) -> Router
where
    S: MarketStore + Send + Sync + 'static,
{
    let state = MarketAppState {
        transactor: Transactor::new(Arc::new(store)),
        auth_config: Arc::new(auth_config),
        config: Arc::new(config),
    };

    Router::new()
        .route("/bootstrap", get(handlers::bootstrap::<S>))
        .route("/auth/telegram", post(handlers::telegram_auth::<S>))
        .route("/auth/register", post(handlers::register::<S>))
        .route("/auth/demo-login", post(handlers::demo_login::<S>))
        .route("/auth/logout", post(handlers::logout::<S>))
        .route("/orders/checkout", post(handlers::checkout::<S>))
        .route(
            "/orders/{order_id}/status",
            patch(handlers::update_order_status::<S>),
        )
        .route(
            "/seller/products",
            get(handlers::list_products::<S>).post(handlers::create_product::<S>),
        )
        .route(
            "/seller/products/{product_id}",
            patch(handlers::update_product::<S>),
        )
        .route(
            "/admin/stores",
            get(handlers::list_stores::<S>).post(handlers::create_store::<S>),
        )
        .route(
            "/admin/users",
            get(handlers::list_users::<S>).post(handlers::create_user::<S>),
        )
        .with_state(state)
}
