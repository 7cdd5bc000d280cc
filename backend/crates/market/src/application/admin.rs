//! Admin Use Cases
//!
//! Store and user management. Every operation first checks that the
//! session belongs to a stored admin.

use auth::{SessionClaims, UserRole};
use chrono::Utc;
use kernel::id::{StoreId, UserId};

use crate::application::access::admin_user;
use crate::application::config::{DEFAULT_STORE_COVER_URL, DEFAULT_STORE_LOGO_URL};
use crate::application::normalize;
use crate::application::transactor::Transactor;
use crate::domain::entity::{
    store::Store,
    user::{PublicUser, User},
};
use crate::domain::repository::MarketStore;
use crate::error::{MarketError, MarketResult};

/// New store fields
#[derive(Debug, Clone, Default)]
pub struct NewStoreInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub min_order_rub: Option<f64>,
    pub delivery_days: Option<f64>,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
}

/// New user fields
#[derive(Debug, Clone, Default)]
pub struct NewUserInput {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub store_id: Option<String>,
    pub tg_id: Option<f64>,
}

/// Admin use case
pub struct AdminUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
}

impl<S> AdminUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>) -> Self {
        Self { transactor }
    }

    async fn ensure_admin(&self, session: Option<SessionClaims>) -> MarketResult<()> {
        let session = session.ok_or(MarketError::Unauthorized)?;
        let db = self.transactor.read().await?;
        admin_user(&db, &session)?;
        Ok(())
    }

    pub async fn list_stores(&self, session: Option<SessionClaims>) -> MarketResult<Vec<Store>> {
        self.ensure_admin(session).await?;
        Ok(self.transactor.read().await?.stores)
    }

    pub async fn create_store(
        &self,
        session: Option<SessionClaims>,
        input: NewStoreInput,
    ) -> MarketResult<Store> {
        self.ensure_admin(session).await?;

        let (Some(name), Some(city)) = (
            normalize::text(input.name.as_deref()),
            normalize::text(input.city.as_deref()),
        ) else {
            return Err(MarketError::validation("name and city are required"));
        };

        let store = Store {
            id: StoreId::generate(),
            name,
            city,
            address: normalize::text(input.address.as_deref()).unwrap_or_default(),
            description: normalize::text(input.description.as_deref()).unwrap_or_default(),
            phone: normalize::text(input.phone.as_deref()).unwrap_or_default(),
            min_order_rub: normalize::admin_store_min_order_rub(input.min_order_rub),
            delivery_days: normalize::admin_store_delivery_days(input.delivery_days),
            rating: 5.0,
            verified: true,
            logo_url: normalize::text(input.logo_url.as_deref())
                .unwrap_or_else(|| DEFAULT_STORE_LOGO_URL.to_string()),
            cover_url: normalize::text(input.cover_url.as_deref())
                .unwrap_or_else(|| DEFAULT_STORE_COVER_URL.to_string()),
            categories: Vec::new(),
            created_at: Utc::now(),
        };

        let store = self
            .transactor
            .update(move |db| {
                db.stores.insert(0, store.clone());
                Ok(store)
            })
            .await?;

        tracing::info!(store_id = %store.id, name = %store.name, "Store created by admin");

        Ok(store)
    }

    pub async fn list_users(
        &self,
        session: Option<SessionClaims>,
    ) -> MarketResult<Vec<PublicUser>> {
        self.ensure_admin(session).await?;
        let db = self.transactor.read().await?;
        Ok(db.users.iter().map(PublicUser::from).collect())
    }

    pub async fn create_user(
        &self,
        session: Option<SessionClaims>,
        input: NewUserInput,
    ) -> MarketResult<User> {
        self.ensure_admin(session).await?;

        let (Some(full_name), Some(role)) = (
            normalize::text(input.full_name.as_deref()),
            normalize::text(input.role.as_deref()),
        ) else {
            return Err(MarketError::validation("fullName and role are required"));
        };
        let role =
            UserRole::from_code(&role).ok_or_else(|| MarketError::validation("Invalid role"))?;
        if role == UserRole::Admin {
            return Err(MarketError::forbidden(
                "Admin users cannot be created via this endpoint",
            ));
        }

        let store_id = match role {
            UserRole::Seller => Some(
                normalize::text(input.store_id.as_deref())
                    .map(StoreId::from_string)
                    .ok_or_else(|| MarketError::validation("Seller must have storeId"))?,
            ),
            _ => None,
        };
        let tg_id = match input.tg_id.filter(|id| *id != 0.0) {
            None => None,
            Some(id) => Some(
                normalize::whole_number(id)
                    .ok_or_else(|| MarketError::validation("tgId must be a whole number"))?,
            ),
        };
        let phone = normalize::text(input.phone.as_deref()).unwrap_or_default();

        let user = self
            .transactor
            .update(move |db| {
                if tg_id.is_some_and(|tg_id| db.has_telegram_id(tg_id)) {
                    return Err(MarketError::conflict(
                        "User with this Telegram ID already exists",
                    ));
                }

                if store_id.as_ref().is_some_and(|id| db.store(id).is_none()) {
                    return Err(MarketError::not_found("Store not found"));
                }

                let user = User {
                    id: UserId::generate(),
                    tg_id,
                    role,
                    full_name,
                    phone,
                    store_id,
                    created_at: Utc::now(),
                };
                db.users.insert(0, user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created by admin");

        Ok(user)
    }
}
