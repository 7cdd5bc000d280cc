//! Entity Module

pub mod session;
pub mod telegram;
