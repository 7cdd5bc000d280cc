//! Session Claims
//!
//! The payload carried inside the signed session cookie. Sessions are
//! stateless: nothing is stored server-side, so the claims are the whole
//! session.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{auth_method::AuthMethod, user_role::UserRole};

/// Signed session payload
///
/// Serialized as `{"userId","role","authMethod","issuedAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: UserId,
    /// Role at issue time; authorization re-reads the stored user
    pub role: UserRole,
    pub auth_method: AuthMethod,
    /// Unix seconds
    pub issued_at: i64,
}

impl SessionClaims {
    pub fn new(user_id: UserId, role: UserRole, auth_method: AuthMethod, issued_at: i64) -> Self {
        Self {
            user_id,
            role,
            auth_method,
            issued_at,
        }
    }

    /// True once `issued_at` falls before `now - ttl_secs`
    pub fn is_expired(&self, now_secs: i64, ttl_secs: i64) -> bool {
        self.issued_at < now_secs - ttl_secs
    }
}
