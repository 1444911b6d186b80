//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed repository and reader implementations
//! - `http` - axum boundary translating between HTTP and use cases

pub mod http;
pub mod postgres;
