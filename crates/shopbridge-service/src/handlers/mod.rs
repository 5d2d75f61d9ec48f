//! API handlers.

pub mod health;
pub mod payhere;
pub mod proxy;
