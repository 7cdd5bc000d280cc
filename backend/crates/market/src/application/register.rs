//! Register Use Case
//!
//! Creates a buyer or seller account for a verified Telegram user. Sellers
//! open their store in the same transaction.

use std::sync::Arc;

use auth::{AuthConfig, UserRole, VerifyInitDataUseCase};
use chrono::Utc;
use kernel::id::{StoreId, UserId};

use crate::application::config::REGISTERED_STORE_MIN_ORDER_RUB;
use crate::application::normalize;
use crate::application::transactor::Transactor;
use crate::domain::entity::{store::Store, user::User};
use crate::domain::repository::MarketStore;
use crate::error::{MarketError, MarketResult};

/// Store details supplied by a registering seller
#[derive(Debug, Clone, Default)]
pub struct StoreInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub min_order_rub: Option<f64>,
    pub delivery_days: Option<f64>,
}

/// Register input
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub init_data: Option<String>,
    pub role: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub store: Option<StoreInput>,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
    auth_config: Arc<AuthConfig>,
}

impl<S> RegisterUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>, auth_config: Arc<AuthConfig>) -> Self {
        Self {
            transactor,
            auth_config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> MarketResult<User> {
        let init_data = input
            .init_data
            .as_deref()
            .filter(|data| !data.is_empty())
            .ok_or_else(|| MarketError::validation("initData is required"))?;

        let verified = VerifyInitDataUseCase::new(self.auth_config.clone()).execute(init_data)?;
        let tg_id = verified.user.id;

        let role = match input.role.as_deref() {
            Some("buyer") => UserRole::Buyer,
            Some("seller") => UserRole::Seller,
            _ => {
                return Err(MarketError::validation(
                    "Роль должна быть 'buyer' или 'seller'",
                ));
            }
        };

        let full_name = normalize::text(input.full_name.as_deref())
            .ok_or_else(|| MarketError::validation("Укажите имя"))?;
        let phone = normalize::text(input.phone.as_deref())
            .ok_or_else(|| MarketError::validation("Укажите телефон"))?;

        let store_input = input.store.unwrap_or_default();
        let new_store = if role == UserRole::Seller {
            let name = normalize::text(store_input.name.as_deref())
                .ok_or_else(|| MarketError::validation("Укажите название магазина"))?;
            let city = normalize::text(store_input.city.as_deref())
                .ok_or_else(|| MarketError::validation("Укажите город магазина"))?;

            Some(Store {
                id: StoreId::generate(),
                name,
                city,
                address: normalize::text(store_input.address.as_deref()).unwrap_or_default(),
                description: normalize::text(store_input.description.as_deref())
                    .unwrap_or_default(),
                phone: normalize::text(store_input.phone.as_deref()).unwrap_or_default(),
                min_order_rub: normalize::registered_store_min_order_rub(
                    store_input.min_order_rub,
                    REGISTERED_STORE_MIN_ORDER_RUB,
                ),
                delivery_days: normalize::registered_store_delivery_days(
                    store_input.delivery_days,
                ),
                rating: 0.0,
                verified: false,
                logo_url: String::new(),
                cover_url: String::new(),
                categories: Vec::new(),
                created_at: Utc::now(),
            })
        } else {
            None
        };

        let user = self
            .transactor
            .update(move |db| {
                if db.has_telegram_id(tg_id) {
                    return Err(MarketError::conflict(
                        "Этот Telegram-аккаунт уже зарегистрирован",
                    ));
                }

                let store_id = new_store.as_ref().map(|store| store.id.clone());
                if let Some(store) = new_store {
                    db.stores.push(store);
                }

                let user = User {
                    id: UserId::generate(),
                    tg_id: Some(tg_id),
                    role,
                    full_name,
                    phone,
                    store_id,
                    created_at: Utc::now(),
                };
                db.users.push(user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, tg_id, "User registered");

        Ok(user)
    }
}
