//! Session Cookie Headers

use crate::application::config::AuthConfig;

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(config: &AuthConfig, token: &str) -> String {
    config.cookie_config().build_set_cookie(token)
}

/// `Set-Cookie` value that drops the session cookie
pub fn clear_session_cookie(config: &AuthConfig) -> String {
    config.cookie_config().build_delete_cookie()
}
