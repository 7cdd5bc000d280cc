//! Domain Layer
//!
//! Marketplace records, the snapshot they live in, and the change set that
//! moves a mutated snapshot back into storage.

pub mod change_set;
pub mod entity;
pub mod repository;
pub mod value_object;
