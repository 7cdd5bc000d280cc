//! Market Module
//!
//! Wholesale marketplace behind the Telegram Mini App: stores, products,
//! orders and the users who trade them.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, the whole-database snapshot and its change set
//! - `application/` - Use cases and the serialized [`Transactor`]
//! - `infra/` - PostgreSQL and in-memory stores, demo seed data
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Consistency Model
//! - Writers in one process are serialized; each write loads a fresh
//!   snapshot, mutates a copy and persists only the difference
//! - A failing use case persists nothing
//! - The PostgreSQL store applies a change set in a single transaction

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::Transactor;
pub use application::config::MarketConfig;
pub use domain::repository::MarketStore;
pub use error::{MarketError, MarketResult};
pub use infra::memory::MemoryMarketStore;
pub use infra::postgres::PgMarketStore;
pub use presentation::{market_router, market_router_generic};

#[cfg(test)]
mod tests;
