use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace role; every user has exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Seller,
    Buyer,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Seller, UserRole::Buyer];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Seller => "seller",
            Buyer => "buyer",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.code() == code)
    }

    /// Roles allowed to manage catalog and order status
    #[inline]
    pub const fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Seller)
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("seller"), Some(UserRole::Seller));
        assert_eq!(UserRole::from_code("buyer"), Some(UserRole::Buyer));
        assert_eq!(UserRole::from_code("Admin"), None);
        assert_eq!(UserRole::from_code("moderator"), None);
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Seller).unwrap(), r#""seller""#);
        let role: UserRole = serde_json::from_str(r#""buyer""#).unwrap();
        assert_eq!(role, UserRole::Buyer);
        assert!(serde_json::from_str::<UserRole>(r#""root""#).is_err());
    }

    #[test]
    fn test_user_role_checks() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Seller.is_staff());
        assert!(!UserRole::Buyer.is_staff());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Seller.is_admin());
    }
}
