//! Value Object Module

pub mod auth_method;
pub mod user_role;
