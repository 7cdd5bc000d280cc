//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::secret::Secret;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Telegram account that is promoted to admin on first login
pub const DEFAULT_ADMIN_TELEGRAM_ID: i64 = 25125327;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC key for session tokens
    pub session_secret: Secret,
    /// Session lifetime (14 days)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Bot token used to verify initData; Telegram login is refused without it
    pub telegram_bot_token: Option<Secret>,
    /// Maximum age of initData `auth_date`
    pub init_data_max_age: Duration,
    /// Telegram ids that become admins when their user is created
    pub admin_telegram_ids: Vec<i64>,
    /// Enables POST /auth/demo-login
    pub demo_login_enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "om_session".to_string(),
            session_secret: Secret::new(Vec::new()),
            session_ttl: Duration::from_secs(14 * 24 * 3600), // 14 days
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            telegram_bot_token: None,
            init_data_max_age: Duration::from_secs(24 * 3600), // 24 hours
            admin_telegram_ids: vec![DEFAULT_ADMIN_TELEGRAM_ID],
            demo_login_enabled: false,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: Secret::random(32),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie, demo login on)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            demo_login_enabled: true,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL in whole seconds
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    /// initData max age in whole seconds
    pub fn init_data_max_age_secs(&self) -> i64 {
        self.init_data_max_age.as_secs() as i64
    }

    pub fn is_admin_telegram_id(&self, telegram_id: i64) -> bool {
        self.admin_telegram_ids.contains(&telegram_id)
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "om_session");
        assert_eq!(config.session_ttl_secs(), 1_209_600);
        assert_eq!(config.init_data_max_age_secs(), 86_400);
        assert!(config.is_admin_telegram_id(25125327));
        assert!(!config.demo_login_enabled);
    }

    #[test]
    fn test_cookie_config_follows_ttl() {
        let config = AuthConfig::development();
        let cookie = config.cookie_config();
        assert_eq!(cookie.max_age_secs, Some(1_209_600));
        assert!(!cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/");
    }
}
