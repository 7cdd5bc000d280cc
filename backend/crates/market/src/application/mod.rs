//! Application Layer
//!
//! Use cases. Reads go straight to a snapshot; writes go through the
//! [`transactor::Transactor`].

pub mod access;
pub mod admin;
pub mod bootstrap;
pub mod checkout;
pub mod config;
pub mod demo_login;
pub mod normalize;
pub mod order_status;
pub mod products;
pub mod register;
pub mod telegram_login;
pub mod transactor;

pub use admin::AdminUseCase;
pub use bootstrap::BootstrapUseCase;
pub use checkout::CheckoutUseCase;
pub use demo_login::DemoLoginUseCase;
pub use order_status::UpdateOrderStatusUseCase;
pub use products::{CreateProductUseCase, ListProductsUseCase, UpdateProductUseCase};
pub use register::RegisterUseCase;
pub use telegram_login::{TelegramLoginOutput, TelegramLoginUseCase};
pub use transactor::Transactor;
