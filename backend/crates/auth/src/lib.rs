//! Auth (Authentication) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session claims, Telegram user, roles
//! - `application/` - Session token signing, initData verification, config
//! - `presentation/` - Cookie helpers and the session extractor
//!
//! ## Security Model
//! - Stateless sessions: the cookie carries the claims, signed with
//!   HMAC-SHA256 under a server secret and checked in constant time
//! - Sessions expire a fixed TTL (14 days by default) after issue
//! - Telegram Mini App `initData` is trusted only after its HMAC chain
//!   (`WebAppData` → bot token → data-check string) verifies and its
//!   `auth_date` is fresh

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session::SessionSigner;
pub use application::telegram::{VerifyInitDataUseCase, sign_init_data, verify_init_data};
pub use domain::entity::{
    session::SessionClaims,
    telegram::{TelegramUser, VerifiedInitData},
};
pub use domain::value_object::{auth_method::AuthMethod, user_role::UserRole};
pub use error::{AuthError, AuthResult, InitDataError};
pub use presentation::{CurrentSession, clear_session_cookie, session_cookie};
