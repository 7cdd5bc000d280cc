//! Session Extractor
//!
//! Reads the session cookie and verifies it. A missing or invalid cookie
//! yields `CurrentSession(None)`; handlers decide whether that is an error.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::session::SessionSigner;
use crate::domain::entity::session::SessionClaims;

/// Verified session claims of the caller, if any
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<SessionClaims>);

impl<S> FromRequestParts<S> for CurrentSession
where
    Arc<AuthConfig>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<AuthConfig>::from_ref(state);

        let Some(token) = extract_cookie(&parts.headers, &config.session_cookie_name) else {
            return Ok(Self(None));
        };

        match SessionSigner::new(config).verify_now(&token) {
            Ok(claims) => Ok(Self(Some(claims))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring session cookie");
                Ok(Self(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{auth_method::AuthMethod, user_role::UserRole};
    use axum::http::{Request, header};
    use kernel::id::UserId;

    async fn extract(config: Arc<AuthConfig>, cookie: Option<&str>) -> CurrentSession {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        CurrentSession::from_request_parts(&mut parts, &config)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_cookie_yields_claims() {
        let config = Arc::new(AuthConfig::development());
        let token = SessionSigner::new(config.clone())
            .issue_now(SessionClaims::new(
                UserId::from_string("usr_00000001"),
                UserRole::Buyer,
                AuthMethod::Demo,
                0,
            ))
            .unwrap();

        let session = extract(config, Some(&format!("om_session={token}"))).await;
        let claims = session.0.unwrap();
        assert_eq!(claims.user_id.as_str(), "usr_00000001");
    }

    #[tokio::test]
    async fn test_missing_or_bad_cookie_is_anonymous() {
        let config = Arc::new(AuthConfig::development());

        assert!(extract(config.clone(), None).await.0.is_none());
        assert!(
            extract(config, Some("om_session=garbage.token"))
                .await
                .0
                .is_none()
        );
    }
}
