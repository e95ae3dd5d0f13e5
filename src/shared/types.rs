use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Basic types for ledger operations
pub type AccountId = String;
pub type CardId = String;

// Request types - typed parameter structs accepted at the operation boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRequest {
    pub amount: Decimal,
    pub description: Option<String>,
    /// Fund the credit from this saved card instead of an external top up
    pub card_id: Option<CardId>,
    /// Raw card details used only when `save_card` is set
    pub new_card: Option<NewCardDetails>,
    pub save_card: bool,
}

impl CreditRequest {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            description: None,
            card_id: None,
            new_card: None,
            save_card: false,
        }
    }

    pub fn from_card(amount: Decimal, card_id: impl Into<CardId>) -> Self {
        Self {
            card_id: Some(card_id.into()),
            ..Self::new(amount)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitRequest {
    pub amount: Decimal,
    pub description: Option<String>,
    pub pin: Option<String>,
}

impl DebitRequest {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            description: None,
            pin: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerTransferRequest {
    /// Recipient email or account id
    pub recipient: String,
    pub amount: Decimal,
}

impl PeerTransferRequest {
    pub fn new(recipient: impl Into<String>, amount: Decimal) -> Self {
        Self {
            recipient: recipient.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPaymentRequest {
    pub card_id: CardId,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl CardPaymentRequest {
    pub fn new(card_id: impl Into<CardId>, amount: Decimal) -> Self {
        Self {
            card_id: card_id.into(),
            amount,
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTransferRequest {
    pub source_card_id: CardId,
    pub dest_card_id: CardId,
    pub amount: Decimal,
}

impl CardTransferRequest {
    pub fn new(
        source_card_id: impl Into<CardId>,
        dest_card_id: impl Into<CardId>,
        amount: Decimal,
    ) -> Self {
        Self {
            source_card_id: source_card_id.into(),
            dest_card_id: dest_card_id.into(),
            amount,
        }
    }
}

/// Raw card entry details as typed by the user.
/// The number and CVV are read once for derivation and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardUpdate {
    pub expiry: String,
}

// Result type for better error handling
pub type LedgerResult<T> = Result<T, crate::shared::error::LedgerError>;
