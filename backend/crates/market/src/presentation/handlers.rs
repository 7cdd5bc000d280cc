//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use auth::{
    AuthConfig, AuthMethod, CurrentSession, SessionClaims, SessionSigner, clear_session_cookie,
    session_cookie,
};
use kernel::id::{OrderId, ProductId};

use crate::application::bootstrap::BootstrapPayload;
use crate::application::config::MarketConfig;
use crate::application::{
    AdminUseCase, BootstrapUseCase, CheckoutUseCase, CreateProductUseCase, DemoLoginUseCase,
    ListProductsUseCase, RegisterUseCase, TelegramLoginOutput, TelegramLoginUseCase, Transactor,
    UpdateOrderStatusUseCase, UpdateProductUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::MarketStore;
use crate::error::{MarketError, MarketResult};
use crate::presentation::dto::{
    CheckoutRequest, DemoLoginRequest, NewProductRequest, NewStoreRequest, NewUserRequest,
    OrderResponse, OrderStatusRequest, OrdersResponse, ProductPatchRequest, ProductResponse,
    ProductsQuery, ProductsResponse, RegisterRequest, SessionUserEnvelope, SessionUserResponse,
    StoreResponse, StoresResponse, TelegramAuthRequest, TelegramAuthResponse, UserResponse,
    UsersResponse,
};
use crate::presentation::extract::JsonBody;

/// Shared state for market handlers
pub struct MarketAppState<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub transactor: Transactor<S>,
    pub auth_config: Arc<AuthConfig>,
    pub config: Arc<MarketConfig>,
}

impl<S> Clone for MarketAppState<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            transactor: self.transactor.clone(),
            auth_config: self.auth_config.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> FromRef<MarketAppState<S>> for Arc<AuthConfig>
where
    S: MarketStore + Send + Sync + 'static,
{
    fn from_ref(state: &MarketAppState<S>) -> Self {
        state.auth_config.clone()
    }
}

fn require_session(session: CurrentSession) -> MarketResult<SessionClaims> {
    session.0.ok_or(MarketError::Unauthorized)
}

/// Sign a fresh session for `user` and build its `Set-Cookie` value
fn issue_session_cookie(
    config: &Arc<AuthConfig>,
    user: &User,
    auth_method: AuthMethod,
) -> MarketResult<String> {
    let claims = SessionClaims::new(user.id.clone(), user.role, auth_method, 0);
    let token = SessionSigner::new(config.clone()).issue_now(claims)?;
    Ok(session_cookie(config, &token))
}

// ============================================================================
// Bootstrap
// ============================================================================

/// GET /api/bootstrap
pub async fn bootstrap<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
) -> MarketResult<Json<BootstrapPayload>>
where
    S: MarketStore + Send + Sync + 'static,
{
    let use_case = BootstrapUseCase::new(state.transactor.clone(), state.config.clone());
    let payload = use_case.execute(session.0).await?;
    Ok(Json(payload))
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/telegram
pub async fn telegram_auth<S>(
    State(state): State<MarketAppState<S>>,
    JsonBody(req): JsonBody<TelegramAuthRequest>,
) -> MarketResult<Response>
where
    S: MarketStore + Send + Sync + 'static,
{
    let use_case = TelegramLoginUseCase::new(state.transactor.clone(), state.auth_config.clone());

    match use_case.execute(req.init_data.as_deref()).await? {
        TelegramLoginOutput::Registered(user) => {
            let cookie = issue_session_cookie(&state.auth_config, &user, AuthMethod::Telegram)?;
            Ok((
                [(header::SET_COOKIE, cookie)],
                Json(TelegramAuthResponse {
                    ok: true,
                    registered: true,
                    user: Some(SessionUserResponse::from(&user)),
                    telegram_user: None,
                }),
            )
                .into_response())
        }
        TelegramLoginOutput::Unregistered(telegram_user) => Ok(Json(TelegramAuthResponse {
            ok: true,
            registered: false,
            user: None,
            telegram_user: Some(telegram_user.into()),
        })
        .into_response()),
    }
}

/// POST /api/auth/register
pub async fn register<S>(
    State(state): State<MarketAppState<S>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> MarketResult<Response>
where
    S: MarketStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.transactor.clone(), state.auth_config.clone());
    let user = use_case.execute(req.into()).await?;

    let cookie = issue_session_cookie(&state.auth_config, &user, AuthMethod::Telegram)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SessionUserEnvelope {
            ok: true,
            user: SessionUserResponse::from(&user),
        }),
    )
        .into_response())
}

/// POST /api/auth/demo-login
pub async fn demo_login<S>(
    State(state): State<MarketAppState<S>>,
    JsonBody(req): JsonBody<DemoLoginRequest>,
) -> MarketResult<Response>
where
    S: MarketStore + Send + Sync + 'static,
{
    let use_case = DemoLoginUseCase::new(state.transactor.clone(), state.auth_config.clone());
    let user = use_case.execute(req.role.as_deref()).await?;

    let cookie = issue_session_cookie(&state.auth_config, &user, AuthMethod::Demo)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionUserEnvelope {
            ok: true,
            user: SessionUserResponse::from(&user),
        }),
    )
        .into_response())
}

/// POST /api/auth/logout
pub async fn logout<S>(State(state): State<MarketAppState<S>>) -> impl IntoResponse
where
    S: MarketStore + Send + Sync + 'static,
{
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, clear_session_cookie(&state.auth_config))],
    )
}

// ============================================================================
// Orders
// ============================================================================

/// POST /api/orders/checkout
pub async fn checkout<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> MarketResult<(StatusCode, Json<OrdersResponse>)>
where
    S: MarketStore + Send + Sync + 'static,
{
    let session = require_session(session)?;
    let use_case = CheckoutUseCase::new(state.transactor.clone(), state.config.clone());
    let orders = use_case.execute(session, req.into()).await?;

    Ok((StatusCode::CREATED, Json(OrdersResponse { ok: true, orders })))
}

/// PATCH /api/orders/{order_id}/status
pub async fn update_order_status<S>(
    State(state): State<MarketAppState<S>>,
    Path(order_id): Path<String>,
    session: CurrentSession,
    JsonBody(req): JsonBody<OrderStatusRequest>,
) -> MarketResult<Json<OrderResponse>>
where
    S: MarketStore + Send + Sync + 'static,
{
    let session = require_session(session)?;
    let use_case = UpdateOrderStatusUseCase::new(state.transactor.clone());
    let order = use_case
        .execute(session, OrderId::from_string(order_id), req.status.as_deref())
        .await?;

    Ok(Json(OrderResponse { ok: true, order }))
}

// ============================================================================
// Seller products
// ============================================================================

/// GET /api/seller/products
pub async fn list_products<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
    Query(query): Query<ProductsQuery>,
) -> MarketResult<Json<ProductsResponse>>
where
    S: MarketStore + Send + Sync + 'static,
{
    let session = require_session(session)?;
    let use_case = ListProductsUseCase::new(state.transactor.clone());
    let products = use_case.execute(session, query.store_id.as_deref()).await?;

    Ok(Json(ProductsResponse { ok: true, products }))
}

/// POST /api/seller/products
pub async fn create_product<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
    JsonBody(req): JsonBody<NewProductRequest>,
) -> MarketResult<(StatusCode, Json<ProductResponse>)>
where
    S: MarketStore + Send + Sync + 'static,
{
    let session = require_session(session)?;
    let use_case = CreateProductUseCase::new(state.transactor.clone());
    let product = use_case.execute(session, req.into()).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse { ok: true, product })))
}

/// PATCH /api/seller/products/{product_id}
pub async fn update_product<S>(
    State(state): State<MarketAppState<S>>,
    Path(product_id): Path<String>,
    session: CurrentSession,
    JsonBody(req): JsonBody<ProductPatchRequest>,
) -> MarketResult<Json<ProductResponse>>
where
    S: MarketStore + Send + Sync + 'static,
{
    let session = require_session(session)?;
    let use_case = UpdateProductUseCase::new(state.transactor.clone());
    let product = use_case
        .execute(session, ProductId::from_string(product_id), req.into())
        .await?;

    Ok(Json(ProductResponse { ok: true, product }))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/stores
pub async fn list_stores<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
) -> MarketResult<Json<StoresResponse>>
where
    S: MarketStore + Send + Sync + 'static,
{
    let stores = AdminUseCase::new(state.transactor.clone())
        .list_stores(session.0)
        .await?;
    Ok(Json(StoresResponse { ok: true, stores }))
}

/// POST /api/admin/stores
pub async fn create_store<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
    JsonBody(req): JsonBody<NewStoreRequest>,
) -> MarketResult<(StatusCode, Json<StoreResponse>)>
where
    S: MarketStore + Send + Sync + 'static,
{
    let store = AdminUseCase::new(state.transactor.clone())
        .create_store(session.0, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(StoreResponse { ok: true, store })))
}

/// GET /api/admin/users
pub async fn list_users<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
) -> MarketResult<Json<UsersResponse>>
where
    S: MarketStore + Send + Sync + 'static,
{
    let users = AdminUseCase::new(state.transactor.clone())
        .list_users(session.0)
        .await?;
    Ok(Json(UsersResponse { ok: true, users }))
}

/// POST /api/admin/users
pub async fn create_user<S>(
    State(state): State<MarketAppState<S>>,
    session: CurrentSession,
    JsonBody(req): JsonBody<NewUserRequest>,
) -> MarketResult<(StatusCode, Json<UserResponse>)>
where
    S: MarketStore + Send + Sync + 'static,
{
    let user = AdminUseCase::new(state.transactor.clone())
        .create_user(session.0, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse { ok: true, user })))
}
