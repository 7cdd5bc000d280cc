//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router mounted under `/api`.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use router::{market_router, market_router_generic};
