//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded). Debug builds fall back to development defaults; release builds
//! refuse to start without a session secret.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use market::MarketConfig;
use platform::secret::Secret;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Without it the server runs on the seeded in-memory store
    pub database_url: Option<String>,
    /// CORS allow list
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub market: MarketConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), !cfg!(debug_assertions))
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        release: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let mut auth = if release {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        };

        match var("SESSION_SECRET") {
            Some(secret) => auth.session_secret = Secret::from(secret),
            None if release => bail!("SESSION_SECRET must be set in release builds"),
            None => tracing::warn!("SESSION_SECRET not set, sessions end on restart"),
        }

        auth.telegram_bot_token = var("TELEGRAM_BOT_TOKEN").map(Secret::from);

        if let Some(ids) = var("TELEGRAM_ADMIN_IDS") {
            auth.admin_telegram_ids = ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| id.parse::<i64>())
                .collect::<Result<_, _>>()
                .context("TELEGRAM_ADMIN_IDS must be comma-separated integers")?;
        }

        if let Some(secs) = var("INIT_DATA_MAX_AGE_SECS") {
            let secs: u64 = secs
                .parse()
                .context("INIT_DATA_MAX_AGE_SECS is not a number")?;
            auth.init_data_max_age = Duration::from_secs(secs);
        }

        if let Some(value) = var("DEMO_LOGIN") {
            auth.demo_login_enabled = parse_bool("DEMO_LOGIN", &value)?;
        }
        if let Some(value) = var("COOKIE_SECURE") {
            auth.cookie_secure = parse_bool("COOKIE_SECURE", &value)?;
        }

        let mut market = MarketConfig::default();
        if let Some(app_name) = var("APP_NAME") {
            market.app_name = app_name;
        }

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            frontend_origins,
            auth,
            market,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} must be true or false, got {value:?}"),
    }
}
