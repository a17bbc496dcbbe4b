//! Shared API contracts for the service desk dashboard.
//!
//! Everything here is plain Rust with no browser dependencies, so the
//! frontend and native unit tests share the same types and pure logic.

pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;

pub use shared::api_error::ApiError;
pub use shared::pagination::{PageRequest, Pagination, SearchResponse};
