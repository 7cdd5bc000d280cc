//! Application Configuration
//!
//! Configuration for the marketplace application layer.

pub const DEFAULT_APP_NAME: &str = "ОптМаркет РФ — Telegram Mini App";

/// Flat delivery fee added to every order
pub const DEFAULT_DELIVERY_FEE_RUB: i64 = 2_000;

/// Category for products created or edited without one
pub const DEFAULT_CATEGORY: &str = "Без категории";

/// Minimum order value for stores opened through self-registration
pub const REGISTERED_STORE_MIN_ORDER_RUB: i64 = 10_000;

pub const DEFAULT_PRODUCT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1515169067868-5387ec356754?auto=format&fit=crop&w=700&q=80";

pub const DEFAULT_STORE_LOGO_URL: &str =
    "https://images.unsplash.com/photo-1560179707-f14e90ef3623?auto=format&fit=crop&w=180&q=80";

pub const DEFAULT_STORE_COVER_URL: &str =
    "https://images.unsplash.com/photo-1607083206968-13611e3d76db?auto=format&fit=crop&w=1400&q=80";

/// Market application configuration
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Name reported by the bootstrap endpoint
    pub app_name: String,
    pub delivery_fee_rub: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            delivery_fee_rub: DEFAULT_DELIVERY_FEE_RUB,
        }
    }
}
