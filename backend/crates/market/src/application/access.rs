//! Access Checks
//!
//! Roles in the session cookie are a hint only; every check re-reads the
//! stored user so role changes and deletions take effect immediately.

use auth::{SessionClaims, UserRole};
use kernel::id::StoreId;

use crate::domain::entity::{database::Database, user::User};
use crate::error::{MarketError, MarketResult};

/// Stored user behind a session
pub fn session_user<'a>(db: &'a Database, session: &SessionClaims) -> MarketResult<&'a User> {
    db.user(&session.user_id)
        .ok_or_else(|| MarketError::not_found("User not found"))
}

/// Session user who is an admin or a seller
pub fn staff_user<'a>(db: &'a Database, session: &SessionClaims) -> MarketResult<&'a User> {
    let user = session_user(db, session)?;
    if !user.role.is_staff() {
        return Err(MarketError::forbidden("Insufficient rights"));
    }
    Ok(user)
}

/// Session user who is an admin
///
/// A missing user is reported as forbidden, not as not-found.
pub fn admin_user<'a>(db: &'a Database, session: &SessionClaims) -> MarketResult<&'a User> {
    match db.user(&session.user_id) {
        Some(user) if user.role.is_admin() => Ok(user),
        _ => Err(MarketError::forbidden("Admin access required")),
    }
}

/// Store a staff user acts on: sellers get their own, admins name one
pub fn acting_store_id(user: &User, requested: Option<&str>) -> MarketResult<StoreId> {
    let store_id = match user.role {
        UserRole::Admin => requested
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(StoreId::from),
        UserRole::Seller => user.store_id.clone(),
        UserRole::Buyer => return Err(MarketError::forbidden("Insufficient rights")),
    };

    store_id.ok_or_else(|| MarketError::validation("storeId is required"))
}

/// Sellers may only touch records of their own store
pub fn ensure_owns_store(user: &User, store_id: &StoreId, message: &str) -> MarketResult<()> {
    if user.role == UserRole::Seller && user.store_id.as_ref() != Some(store_id) {
        return Err(MarketError::forbidden(message));
    }
    Ok(())
}
