//! Telegram Login Use Case
//!
//! Signs in a Telegram user who already has an account. Unknown accounts
//! get their Telegram profile back so the Mini App can show the
//! registration form. Configured admin accounts are created on first
//! login and always hold the admin role.

use std::sync::Arc;

use auth::{AuthConfig, TelegramUser, UserRole, VerifyInitDataUseCase};
use chrono::Utc;
use kernel::id::UserId;

use crate::application::transactor::Transactor;
use crate::domain::entity::user::User;
use crate::domain::repository::MarketStore;
use crate::error::{MarketError, MarketResult};

/// Telegram login outcome
#[derive(Debug, Clone)]
pub enum TelegramLoginOutput {
    /// Known account; a session should be issued
    Registered(User),
    /// No account for this Telegram id yet
    Unregistered(TelegramUser),
}

/// Telegram login use case
pub struct TelegramLoginUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
    auth_config: Arc<AuthConfig>,
}

impl<S> TelegramLoginUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>, auth_config: Arc<AuthConfig>) -> Self {
        Self {
            transactor,
            auth_config,
        }
    }

    pub async fn execute(&self, init_data: Option<&str>) -> MarketResult<TelegramLoginOutput> {
        let init_data = init_data
            .filter(|data| !data.is_empty())
            .ok_or_else(|| MarketError::validation("initData is required"))?;

        let verified = VerifyInitDataUseCase::new(self.auth_config.clone()).execute(init_data)?;
        let telegram_user = verified.user;
        let tg_id = telegram_user.id;
        let full_name = telegram_user.display_name();

        if self.auth_config.is_admin_telegram_id(tg_id) {
            let admin = self
                .transactor
                .update(move |db| {
                    if let Some(existing) = db.user_by_telegram_id_mut(tg_id) {
                        existing.full_name = full_name;
                        existing.role = UserRole::Admin;
                        return Ok(existing.clone());
                    }

                    let created = User {
                        id: UserId::generate(),
                        tg_id: Some(tg_id),
                        role: UserRole::Admin,
                        full_name,
                        phone: String::new(),
                        store_id: None,
                        created_at: Utc::now(),
                    };
                    db.users.push(created.clone());
                    Ok(created)
                })
                .await?;

            tracing::info!(user_id = %admin.id, tg_id, "Admin signed in via Telegram");
            return Ok(TelegramLoginOutput::Registered(admin));
        }

        let existing = self
            .transactor
            .update(move |db| {
                Ok(db.user_by_telegram_id_mut(tg_id).map(|user| {
                    user.full_name = full_name;
                    user.clone()
                }))
            })
            .await?;

        match existing {
            Some(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "User signed in via Telegram");
                Ok(TelegramLoginOutput::Registered(user))
            }
            None => {
                tracing::info!(tg_id, "Unregistered Telegram user");
                Ok(TelegramLoginOutput::Unregistered(telegram_user))
            }
        }
    }
}
