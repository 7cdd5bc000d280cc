//! Telegram initData Verification
//!
//! Mini App launch parameters arrive as a query string signed by Telegram.
//! The check follows the Web Apps scheme:
//!
//! ```text
//! secret_key = HMAC_SHA256(key = "WebAppData", msg = bot_token)
//! hash       = hex(HMAC_SHA256(key = secret_key, msg = data_check_string))
//! ```
//!
//! where `data_check_string` is every `key=value` pair except `hash`,
//! sorted by key and joined with `\n`.

use std::sync::Arc;

use platform::crypto::{from_hex, hmac_sha256, to_hex, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::entity::telegram::{TelegramUser, VerifiedInitData};
use crate::error::{AuthError, AuthResult, InitDataError};

const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

/// Verify a raw initData string at `now_secs`
pub fn verify_init_data(
    init_data: &str,
    bot_token: &[u8],
    max_age_secs: i64,
    now_secs: i64,
) -> Result<VerifiedInitData, InitDataError> {
    if init_data.trim().is_empty() {
        return Err(InitDataError::Empty);
    }

    let pairs = parse_query(init_data)?;
    let hash = match lookup(&pairs, "hash") {
        Some(hash) if !hash.is_empty() => hash,
        _ => return Err(InitDataError::HashMissing),
    };

    let expected = from_hex(hash).map_err(|_| InitDataError::HashMismatch)?;
    let check_string = data_check_string(&pairs);
    if !verify_hmac_sha256(
        &secret_key(bot_token),
        check_string.as_bytes(),
        &expected,
    ) {
        return Err(InitDataError::HashMismatch);
    }

    let auth_date = lookup(&pairs, "auth_date")
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value != 0)
        .ok_or(InitDataError::AuthDateMissing)?;

    if now_secs - auth_date > max_age_secs {
        return Err(InitDataError::Expired);
    }

    let user_json = match lookup(&pairs, "user") {
        Some(user) if !user.is_empty() => user,
        _ => return Err(InitDataError::UserMissing),
    };
    let user: TelegramUser =
        serde_json::from_str(user_json).map_err(|_| InitDataError::UserUnparseable)?;
    if user.id == 0 {
        return Err(InitDataError::InvalidUserId);
    }

    Ok(VerifiedInitData {
        user,
        auth_date,
        query_id: lookup(&pairs, "query_id").map(str::to_string),
    })
}

/// Build a signed initData query string from raw pairs
///
/// Produces what Telegram would hand to the Mini App for the same fields.
/// Used by local tooling and tests.
pub fn sign_init_data(pairs: &[(&str, &str)], bot_token: &[u8]) -> String {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    let hash = to_hex(&hmac_sha256(
        &secret_key(bot_token),
        data_check_string(&owned).as_bytes(),
    ));

    owned
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .chain(std::iter::once(format!("hash={hash}")))
        .collect::<Vec<_>>()
        .join("&")
}

fn secret_key(bot_token: &[u8]) -> [u8; 32] {
    hmac_sha256(WEB_APP_DATA_KEY, bot_token)
}

fn data_check_string(pairs: &[(String, String)]) -> String {
    let mut signed: Vec<&(String, String)> =
        pairs.iter().filter(|(key, _)| key != "hash").collect();
    signed.sort_by(|a, b| a.0.cmp(&b.0));

    signed
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First value for `key`
fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value.as_str())
}

/// `application/x-www-form-urlencoded` parsing
fn parse_query(input: &str) -> Result<Vec<(String, String)>, InitDataError> {
    let input = input.trim().trim_start_matches('?');

    input
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            Ok((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Result<String, InitDataError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| InitDataError::Malformed)
}

/// Verify initData against the configured bot token
pub struct VerifyInitDataUseCase {
    config: Arc<AuthConfig>,
}

impl VerifyInitDataUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, init_data: &str) -> AuthResult<VerifiedInitData> {
        self.execute_at(init_data, chrono::Utc::now().timestamp())
    }

    pub fn execute_at(&self, init_data: &str, now_secs: i64) -> AuthResult<VerifiedInitData> {
        let bot_token = self
            .config
            .telegram_bot_token
            .as_ref()
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::BotTokenMissing)?;

        let verified = verify_init_data(
            init_data,
            bot_token.expose(),
            self.config.init_data_max_age_secs(),
            now_secs,
        )?;

        tracing::debug!(telegram_id = verified.user.id, "initData verified");
        Ok(verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::secret::Secret;

    const BOT_TOKEN: &[u8] = b"123456:TEST-TOKEN";
    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;
    const USER: &str = r#"{"id":777,"first_name":"Анна","last_name":"Смирнова","username":"anna"}"#;

    fn signed(auth_date: i64) -> String {
        sign_init_data(
            &[
                ("query_id", "AAE-query"),
                ("user", USER),
                ("auth_date", &auth_date.to_string()),
            ],
            BOT_TOKEN,
        )
    }

    #[test]
    fn test_valid_init_data() {
        let verified = verify_init_data(&signed(NOW - 60), BOT_TOKEN, DAY, NOW).unwrap();
        assert_eq!(verified.user.id, 777);
        assert_eq!(verified.user.display_name(), "Анна Смирнова");
        assert_eq!(verified.auth_date, NOW - 60);
        assert_eq!(verified.query_id.as_deref(), Some("AAE-query"));
    }

    #[test]
    fn test_parameter_order_does_not_matter() {
        let query = signed(NOW);
        let mut segments: Vec<&str> = query.split('&').collect();
        segments.reverse();
        let reordered = format!("?{}", segments.join("&"));

        assert!(verify_init_data(&reordered, BOT_TOKEN, DAY, NOW).is_ok());
    }

    #[test]
    fn test_plus_decodes_as_space() {
        let query = sign_init_data(
            &[
                ("auth_date", &NOW.to_string()),
                ("user", r#"{"id":5,"first_name":"A B"}"#),
            ],
            BOT_TOKEN,
        )
        .replace("%20", "+");

        let verified = verify_init_data(&query, BOT_TOKEN, DAY, NOW).unwrap();
        assert_eq!(verified.user.first_name.as_deref(), Some("A B"));
    }

    #[test]
    fn test_tampered_value_rejected() {
        let query = signed(NOW).replace("AAE-query", "AAE-forged");
        assert_eq!(
            verify_init_data(&query, BOT_TOKEN, DAY, NOW),
            Err(InitDataError::HashMismatch)
        );
    }

    #[test]
    fn test_wrong_bot_token_rejected() {
        assert_eq!(
            verify_init_data(&signed(NOW), b"other:token", DAY, NOW),
            Err(InitDataError::HashMismatch)
        );
    }

    #[test]
    fn test_non_hex_hash_rejected() {
        let query = format!("auth_date={NOW}&hash=zzzz");
        assert_eq!(
            verify_init_data(&query, BOT_TOKEN, DAY, NOW),
            Err(InitDataError::HashMismatch)
        );
    }

    #[test]
    fn test_empty_and_missing_hash() {
        assert_eq!(
            verify_init_data("   ", BOT_TOKEN, DAY, NOW),
            Err(InitDataError::Empty)
        );
        assert_eq!(
            verify_init_data("auth_date=1&user=%7B%7D", BOT_TOKEN, DAY, NOW),
            Err(InitDataError::HashMissing)
        );
    }

    #[test]
    fn test_expiry() {
        assert!(verify_init_data(&signed(NOW - DAY), BOT_TOKEN, DAY, NOW).is_ok());
        assert_eq!(
            verify_init_data(&signed(NOW - DAY - 1), BOT_TOKEN, DAY, NOW),
            Err(InitDataError::Expired)
        );
    }

    #[test]
    fn test_missing_auth_date() {
        let query = sign_init_data(&[("user", USER)], BOT_TOKEN);
        assert_eq!(
            verify_init_data(&query, BOT_TOKEN, DAY, NOW),
            Err(InitDataError::AuthDateMissing)
        );

        let query = sign_init_data(&[("auth_date", "0"), ("user", USER)], BOT_TOKEN);
        assert_eq!(
            verify_init_data(&query, BOT_TOKEN, DAY, NOW),
            Err(InitDataError::AuthDateMissing)
        );
    }

    #[test]
    fn test_user_errors() {
        let now = NOW.to_string();

        let query = sign_init_data(&[("auth_date", &now)], BOT_TOKEN);
        assert_eq!(
            verify_init_data(&query, BOT_TOKEN, DAY, NOW),
            Err(InitDataError::UserMissing)
        );

        let query = sign_init_data(&[("auth_date", &now), ("user", "{not json")], BOT_TOKEN);
        assert_eq!(
            verify_init_data(&query, BOT_TOKEN, DAY, NOW),
            Err(InitDataError::UserUnparseable)
        );

        let query = sign_init_data(
            &[("auth_date", &now), ("user", r#"{"first_name":"x"}"#)],
            BOT_TOKEN,
        );
        assert_eq!(
            verify_init_data(&query, BOT_TOKEN, DAY, NOW),
            Err(InitDataError::InvalidUserId)
        );
    }

    #[test]
    fn test_use_case_requires_bot_token() {
        let use_case = VerifyInitDataUseCase::new(Arc::new(AuthConfig::default()));
        assert!(matches!(
            use_case.execute_at(&signed(NOW), NOW),
            Err(AuthError::BotTokenMissing)
        ));

        let use_case = VerifyInitDataUseCase::new(Arc::new(AuthConfig {
            telegram_bot_token: Some(Secret::new(BOT_TOKEN)),
            ..Default::default()
        }));
        assert_eq!(use_case.execute_at(&signed(NOW), NOW).unwrap().user.id, 777);
    }
}
