//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, base64url, hex)
//! - Zeroize-on-drop secret material
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod secret;
