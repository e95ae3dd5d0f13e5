//! Storage implementations
//!
//! This module contains the concrete account repositories.

pub mod file_store;
pub mod memory_store;

// Re-export storage components
pub use file_store::*;
pub use memory_store::*;
