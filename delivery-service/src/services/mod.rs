//! Services layer for the delivery service.
//!
//! The policy and ownership modules carry the authorization core; the
//! resource services wire them in front of the persistence collaborator.

mod auth;
mod database;
mod jwt;
mod kakaopay;
pub mod memory;
pub mod metrics;
mod orders;
mod ownership;
mod pay;
pub mod policy;
mod products;
mod repository;
mod stores;

pub use auth::AuthService;
pub use database::Database;
pub use jwt::{AccessTokenClaims, JwtService, TokenResponse};
pub use kakaopay::{KakaoPayApproveResponse, KakaoPayClient, KakaoPayReadyResponse};
pub use memory::InMemoryRepository;
pub use orders::OrderService;
pub use ownership::OwnershipResolver;
pub use pay::PayService;
pub use policy::{Actor, Denial, Operation, PolicyService, Resource};
pub use products::ProductService;
pub use repository::DeliveryRepository;
pub use stores::StoreService;
