//! Demo Login Use Case
//!
//! Signs in as the first stored user holding a role. Only available when
//! demo login is enabled.

use std::sync::Arc;

use auth::{AuthConfig, UserRole};

use crate::application::transactor::Transactor;
use crate::domain::entity::user::User;
use crate::domain::repository::MarketStore;
use crate::error::{MarketError, MarketResult};

/// Demo login use case
pub struct DemoLoginUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
    auth_config: Arc<AuthConfig>,
}

impl<S> DemoLoginUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>, auth_config: Arc<AuthConfig>) -> Self {
        Self {
            transactor,
            auth_config,
        }
    }

    pub async fn execute(&self, role: Option<&str>) -> MarketResult<User> {
        if !self.auth_config.demo_login_enabled {
            return Err(MarketError::not_found("Demo login is disabled"));
        }

        let role = role
            .and_then(UserRole::from_code)
            .ok_or_else(|| MarketError::validation("role is required"))?;

        let db = self.transactor.read().await?;
        let user = db
            .first_with_role(role)
            .cloned()
            .ok_or_else(|| MarketError::not_found("No user with this role"))?;

        tracing::info!(user_id = %user.id, role = %role, "Demo login");

        Ok(user)
    }
}
