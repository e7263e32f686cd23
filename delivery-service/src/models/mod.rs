//! Domain models for the delivery service.

pub mod order;
pub mod payment;
pub mod product;
pub mod role;
pub mod store;
pub mod user;

pub use order::{Order, OrderItemResponse, OrderProduct, OrderResponse};
pub use payment::{Payment, PaymentStatus};
pub use product::{Product, ProductResponse};
pub use role::UserRole;
pub use store::{Category, Store, StoreResponse};
pub use user::User;
