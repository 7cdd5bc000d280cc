//! Session Token Signing
//!
//! Token format: `base64url(json claims) + "." + base64url(HMAC-SHA256(secret, body))`.
//! The signature covers the encoded body, so the token is checked before
//! any JSON is parsed.

use std::sync::Arc;

use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::entity::session::SessionClaims;
use crate::error::{AuthError, AuthResult};

/// Issues and verifies signed session tokens
#[derive(Clone)]
pub struct SessionSigner {
    config: Arc<AuthConfig>,
}

impl SessionSigner {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Sign claims into a cookie value
    pub fn issue(&self, claims: &SessionClaims) -> AuthResult<String> {
        let json = serde_json::to_vec(claims)
            .map_err(|e| AuthError::Internal(format!("Cannot encode session: {e}")))?;
        let body = to_base64url(&json);
        let signature = hmac_sha256(self.config.session_secret.expose(), body.as_bytes());

        Ok(format!("{}.{}", body, to_base64url(&signature)))
    }

    /// Sign claims stamped with the current time
    pub fn issue_now(&self, mut claims: SessionClaims) -> AuthResult<String> {
        claims.issued_at = chrono::Utc::now().timestamp();
        self.issue(&claims)
    }

    /// Check the signature and TTL of a token at `now_secs`
    pub fn verify(&self, token: &str, now_secs: i64) -> AuthResult<SessionClaims> {
        let mut parts = token.split('.');
        let (Some(body), Some(signature_b64), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::SessionInvalid);
        };
        if body.is_empty() || signature_b64.is_empty() {
            return Err(AuthError::SessionInvalid);
        }

        let signature = from_base64url(signature_b64).map_err(|_| AuthError::SessionInvalid)?;
        if !verify_hmac_sha256(
            self.config.session_secret.expose(),
            body.as_bytes(),
            &signature,
        ) {
            return Err(AuthError::SessionInvalid);
        }

        let json = from_base64url(body).map_err(|_| AuthError::SessionInvalid)?;
        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|_| AuthError::SessionInvalid)?;

        if claims.is_expired(now_secs, self.config.session_ttl_secs()) {
            return Err(AuthError::SessionExpired);
        }

        Ok(claims)
    }

    /// Verify against the wall clock
    pub fn verify_now(&self, token: &str) -> AuthResult<SessionClaims> {
        self.verify(token, chrono::Utc::now().timestamp())
    }
}
