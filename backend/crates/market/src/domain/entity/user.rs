//! Marketplace User

use auth::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::{StoreId, UserId};
use serde::{Deserialize, Serialize};

/// Registered marketplace member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Telegram account id; absent for users created by an admin without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tg_id: Option<i64>,
    pub role: UserRole,
    pub full_name: String,
    pub phone: String,
    /// Set for sellers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
    pub created_at: DateTime<Utc>,
}

/// User as shown to other users (no Telegram id, no timestamps)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub role: UserRole,
    pub full_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role,
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            store_id: user.store_id.clone(),
        }
    }
}
