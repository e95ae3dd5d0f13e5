//! Domain entities
//!
//! This module contains the core business entities of the wallet ledger.

pub mod account;
pub mod card;
pub mod entry;

// Re-export entities
pub use account::*;
pub use card::*;
pub use entry::*;
