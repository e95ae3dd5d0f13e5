//! Infrastructure layer - configuration and persistence
//!
//! This module contains the runtime configuration and the storage backends
//! for the wallet ledger.

pub mod config;
pub mod storage;

// Re-export infrastructure components
pub use config::*;
pub use storage::*;
