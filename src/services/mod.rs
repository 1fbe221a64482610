//! Business logic services
//!
//! This module contains HTTP-agnostic business logic that can be reused
//! across different contexts (routes, tests, etc.).
//!
//! Services should:
//! - Not depend on axum types
//! - Use GuardError for error handling
//! - Take the store and client they need as parameters

mod helpers;
mod lookup_service;
pub mod normalization;
pub mod stats;

pub use helpers::*;
pub use lookup_service::*;
