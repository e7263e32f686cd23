//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod orders;
pub mod pay;
pub mod products;
pub mod stores;
