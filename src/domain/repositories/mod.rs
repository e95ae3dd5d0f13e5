//! Domain repositories
//!
//! This module contains repository traits for data access
//! following Domain-Driven Design principles.

pub mod account_repository;

// Re-export repositories
pub use account_repository::*;
