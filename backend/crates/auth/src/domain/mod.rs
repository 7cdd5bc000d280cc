//! Domain Layer
//!
//! Session claims, verified Telegram identities and role vocabulary.

pub mod entity;
pub mod value_object;
