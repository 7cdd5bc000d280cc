//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::{
    admin::{NewStoreInput, NewUserInput},
    checkout::{CartItem, CheckoutInput},
    products::{NewProductInput, ProductPatch},
    register::{RegisterInput, StoreInput},
};
use crate::domain::entity::{
    order::Order,
    product::Product,
    store::Store,
    user::{PublicUser, User},
};
use auth::{TelegramUser, UserRole};
use kernel::id::UserId;

// ============================================================================
// Numeric input
// ============================================================================

/// Form number: a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumberInput {
    /// Numeric value; blank or non-numeric text has none
    pub fn value(&self) -> Option<f64> {
        match self {
            NumberInput::Number(n) => Some(*n),
            NumberInput::Text(text) => text.trim().parse().ok(),
            NumberInput::Other(_) => None,
        }
    }
}

fn number(input: Option<NumberInput>) -> Option<f64> {
    input.as_ref().and_then(NumberInput::value)
}

/// Treats an explicit `null` as a sent field; only missing keys stay `None`
fn present<'de, D>(deserializer: D) -> Result<Option<NumberInput>, D::Error>
where
    D: Deserializer<'de>,
{
    NumberInput::deserialize(deserializer).map(Some)
}

/// Sent fields map to `Some`, even when they do not parse
fn number_patch(input: Option<NumberInput>) -> Option<Option<f64>> {
    input.map(|n| n.value())
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramAuthRequest {
    pub init_data: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDataRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub min_order_rub: Option<NumberInput>,
    pub delivery_days: Option<NumberInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub init_data: Option<String>,
    pub role: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub store_data: Option<StoreDataRequest>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            init_data: req.init_data,
            role: req.role,
            full_name: req.full_name,
            phone: req.phone,
            store: req.store_data.map(|store| StoreInput {
                name: store.name,
                city: store.city,
                address: store.address,
                phone: store.phone,
                description: store.description,
                min_order_rub: number(store.min_order_rub),
                delivery_days: number(store.delivery_days),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoLoginRequest {
    pub role: Option<String>,
}

/// Signed-in user summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    pub id: UserId,
    pub role: UserRole,
    pub full_name: String,
}

impl From<&User> for SessionUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role,
            full_name: user.full_name.clone(),
        }
    }
}

/// Telegram profile echoed back for the registration form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramProfileResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<TelegramUser> for TelegramProfileResponse {
    fn from(user: TelegramUser) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramAuthResponse {
    pub ok: bool,
    pub registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_user: Option<TelegramProfileResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionUserEnvelope {
    pub ok: bool,
    pub user: SessionUserResponse,
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub product_id: Option<String>,
    pub qty: Option<NumberInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Option<Vec<CartItemRequest>>,
    pub delivery_address: Option<String>,
    pub comment: Option<String>,
}

impl From<CheckoutRequest> for CheckoutInput {
    fn from(req: CheckoutRequest) -> Self {
        CheckoutInput {
            items: req
                .items
                .unwrap_or_default()
                .into_iter()
                .map(|item| CartItem {
                    product_id: item.product_id,
                    qty: number(item.qty),
                })
                .collect(),
            delivery_address: req.delivery_address,
            comment: req.comment,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrdersResponse {
    pub ok: bool,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub ok: bool,
    pub order: Order,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub store_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductRequest {
    pub store_id: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price_rub: Option<NumberInput>,
    pub min_qty: Option<NumberInput>,
    pub stock: Option<NumberInput>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<NewProductRequest> for NewProductInput {
    fn from(req: NewProductRequest) -> Self {
        NewProductInput {
            store_id: req.store_id,
            name: req.name,
            sku: req.sku,
            category: req.category,
            price_rub: number(req.price_rub),
            min_qty: number(req.min_qty),
            stock: number(req.stock),
            image_url: req.image_url,
            description: req.description,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub price_rub: Option<NumberInput>,
    #[serde(default, deserialize_with = "present")]
    pub min_qty: Option<NumberInput>,
    #[serde(default, deserialize_with = "present")]
    pub stock: Option<NumberInput>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<ProductPatchRequest> for ProductPatch {
    fn from(req: ProductPatchRequest) -> Self {
        ProductPatch {
            name: req.name,
            category: req.category,
            price_rub: number_patch(req.price_rub),
            min_qty: number_patch(req.min_qty),
            stock: number_patch(req.stock),
            image_url: req.image_url,
            description: req.description,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsResponse {
    pub ok: bool,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub ok: bool,
    pub product: Product,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoreRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub min_order_rub: Option<NumberInput>,
    pub delivery_days: Option<NumberInput>,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
}

impl From<NewStoreRequest> for NewStoreInput {
    fn from(req: NewStoreRequest) -> Self {
        NewStoreInput {
            name: req.name,
            city: req.city,
            address: req.address,
            description: req.description,
            phone: req.phone,
            min_order_rub: number(req.min_order_rub),
            delivery_days: number(req.delivery_days),
            logo_url: req.logo_url,
            cover_url: req.cover_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub store_id: Option<String>,
    pub tg_id: Option<NumberInput>,
}

impl From<NewUserRequest> for NewUserInput {
    fn from(req: NewUserRequest) -> Self {
        NewUserInput {
            full_name: req.full_name,
            role: req.role,
            phone: req.phone,
            store_id: req.store_id,
            tg_id: number(req.tg_id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoresResponse {
    pub ok: bool,
    pub stores: Vec<Store>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub ok: bool,
    pub store: Store,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub ok: bool,
    pub users: Vec<PublicUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub ok: bool,
    pub user: User,
}
