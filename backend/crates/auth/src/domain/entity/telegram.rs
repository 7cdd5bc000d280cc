//! Telegram Identity
//!
//! The user object embedded in Mini App `initData`, available only after
//! the signature has been verified.

use serde::{Deserialize, Serialize};

/// `user` field of initData
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    /// Zero when absent; verification rejects it
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl TelegramUser {
    /// "First Last", else the username, else `User <id>`
    pub fn display_name(&self) -> String {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full_name.is_empty() {
            return full_name;
        }

        match self.username.as_deref() {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => format!("User {}", self.id),
        }
    }
}

/// initData whose signature and freshness were checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedInitData {
    pub user: TelegramUser,
    /// Unix seconds
    pub auth_date: i64,
    pub query_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> TelegramUser {
        TelegramUser {
            id: 42,
            first_name: None,
            last_name: None,
            username: None,
            language_code: None,
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let u = TelegramUser {
            first_name: Some("Ivan".into()),
            last_name: Some("Petrov".into()),
            username: Some("ivan".into()),
            ..user()
        };
        assert_eq!(u.display_name(), "Ivan Petrov");

        let u = TelegramUser {
            first_name: Some("Ivan".into()),
            ..user()
        };
        assert_eq!(u.display_name(), "Ivan");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let u = TelegramUser {
            username: Some("ivan".into()),
            ..user()
        };
        assert_eq!(u.display_name(), "ivan");
        assert_eq!(user().display_name(), "User 42");
    }

    #[test]
    fn test_parses_minimal_user() {
        let u: TelegramUser = serde_json::from_str(r#"{"id":7,"is_premium":true}"#).unwrap();
        assert_eq!(u.id, 7);
        assert!(u.first_name.is_none());
    }
}
