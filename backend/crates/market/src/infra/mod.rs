//! Infrastructure Layer
//!
//! Storage backends for the marketplace snapshot.

pub mod memory;
pub mod postgres;
pub mod seed;
