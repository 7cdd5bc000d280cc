//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the auth and market crates:
//! - The unified application error and its HTTP classification
//! - Prefixed record identifiers (`usr_…`, `store_…`, `prd_…`, `ord_…`)

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
