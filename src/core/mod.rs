//! Core ledger functionality
//!
//! The modules here hold the business rules: the concurrent account store,
//! the ledger operations over it, card registration and brand detection,
//! history queries, and PIN hashing.

pub mod accounts;
pub mod cards;
pub mod history;
pub mod ledger;
pub mod pin;

pub use accounts::AccountStore;
pub use history::HistoryFilter;
pub use ledger::Ledger;
