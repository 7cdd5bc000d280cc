//! Application Layer
//!
//! Session token signing and Telegram initData verification.

pub mod config;
pub mod session;
pub mod telegram;

pub use session::SessionSigner;
pub use telegram::VerifyInitDataUseCase;
