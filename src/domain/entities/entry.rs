//! Ledger entry entity
//!
//! This module contains the append-only history entry recorded for every
//! wallet or card balance mutation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::types::CardId;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Credit,
    Debit,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Credit => write!(f, "credit"),
            EntryKind::Debit => write!(f, "debit"),
        }
    }
}

/// One immutable line of an account's transaction history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub amount: Decimal,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Card involved in the mutation, kept after the card itself is removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<CardId>,
}

impl LedgerEntry {
    pub fn credit(amount: Decimal, description: impl Into<String>) -> Self {
        Self::new(EntryKind::Credit, amount, description)
    }

    pub fn debit(amount: Decimal, description: impl Into<String>) -> Self {
        Self::new(EntryKind::Debit, amount, description)
    }

    fn new(kind: EntryKind, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            timestamp: Utc::now(),
            card_id: None,
        }
    }

    /// Attach the card this entry settled against
    pub fn with_card(mut self, card_id: impl Into<CardId>) -> Self {
        self.card_id = Some(card_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_creation() {
        let entry = LedgerEntry::credit(dec!(25.00), "Added funds");

        assert_eq!(entry.kind, EntryKind::Credit);
        assert_eq!(entry.amount, dec!(25.00));
        assert_eq!(entry.description, "Added funds");
        assert!(entry.card_id.is_none());
    }

    #[test]
    fn test_entry_with_card() {
        let entry = LedgerEntry::debit(dec!(10), "Card payment").with_card("card-1");

        assert_eq!(entry.kind, EntryKind::Debit);
        assert_eq!(entry.card_id.as_deref(), Some("card-1"));
    }

    #[test]
    fn test_entry_kind_serialization() {
        let json = serde_json::to_string(&EntryKind::Credit).expect("serialize kind");
        assert_eq!(json, "\"credit\"");

        let kind: EntryKind = serde_json::from_str("\"debit\"").expect("deserialize kind");
        assert_eq!(kind, EntryKind::Debit);
    }
}
