//! Value Object Module

pub mod order_status;
