//! Entity Module

pub mod database;
pub mod order;
pub mod product;
pub mod store;
pub mod user;
