//! KartPay Wallet Ledger
//!
//! Embeddable wallet ledger for the KartPay storefront: accounts with
//! balances, saved cards as sub-ledgers, an append-only history, and
//! concurrent-safe credits, debits, and transfers.
//!
//! ## Architecture
//!
//! - **Core**: account store, ledger operations, cards, history, PIN hashing
//! - **Domain**: entities and the repository trait
//! - **Infrastructure**: configuration plus file and in-memory repositories
//! - **Shared**: common types, errors, constants, and utilities
//!
//! ## Guarantees
//!
//! - One account is mutated by one operation at a time
//! - Failed operations leave no partial state behind
//! - Every balance change appends exactly one history entry
//! - Card numbers and CVVs are never stored
//!
//! ## Usage
//!
//! ```
//! use kartpay_wallet_ledger::{CreditRequest, LedgerConfig, WalletLedger};
//! use rust_decimal::Decimal;
//!
//! # tokio_test::block_on(async {
//! let ledger = WalletLedger::in_memory(LedgerConfig::default());
//!
//! let account = ledger.open_account("Ada", "ada@example.com").await.unwrap();
//! let snapshot = ledger
//!     .credit(&account.id, CreditRequest::new(Decimal::from(250)))
//!     .await
//!     .unwrap();
//! assert_eq!(snapshot.balance, Decimal::from(250));
//! # });
//! ```

use dotenv::dotenv;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use crate::core::accounts::AccountStore;
pub use crate::core::history::HistoryFilter;
pub use crate::core::ledger::Ledger;

pub use crate::domain::entities::{Account, AccountSnapshot, EntryKind, LedgerEntry, SavedCard};
pub use crate::domain::repositories::AccountRepository;

pub use crate::infrastructure::config::LedgerConfig;
pub use crate::infrastructure::storage::{FileStore, MemoryStore};

pub use crate::shared::constants::{NAME, VERSION};
pub use crate::shared::error::LedgerError;
pub use crate::shared::types::{
    AccountId, CardId, CardPaymentRequest, CardTransferRequest, CardUpdate, CreditRequest,
    DebitRequest, LedgerResult, NewCardDetails, PeerTransferRequest,
};

/// Initialize logging for binaries and demos
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::try_init()?;
    log::info!("{} v{} initialized", NAME, VERSION);
    Ok(())
}

/// Assemble a file-backed ledger from .env or safe defaults
pub async fn init_wallet_ledger() -> LedgerResult<WalletLedger> {
    dotenv().ok();
    WalletLedger::open(LedgerConfig::from_env()).await
}

/// The assembled ledger: an account store wired to a repository plus the
/// operations over it
pub struct WalletLedger {
    ledger: Ledger,
}

impl WalletLedger {
    /// Open a file-backed ledger and hydrate every stored account
    pub async fn open(config: LedgerConfig) -> LedgerResult<Self> {
        let repository = Arc::new(FileStore::new(&config.data_dir)?);
        Self::with_repository(repository, config).await
    }

    /// Assemble over any repository implementation and hydrate from it
    pub async fn with_repository(
        repository: Arc<dyn AccountRepository>,
        config: LedgerConfig,
    ) -> LedgerResult<Self> {
        let store = Arc::new(AccountStore::new(repository));
        let hydrated = store.hydrate().await?;
        log::info!("Ledger ready with {} account(s)", hydrated);

        Ok(Self {
            ledger: Ledger::new(store, config),
        })
    }

    /// Volatile ledger for tests and demos. Nothing survives a restart.
    pub fn in_memory(config: LedgerConfig) -> Self {
        let store = Arc::new(AccountStore::new(Arc::new(MemoryStore::new())));

        Self {
            ledger: Ledger::new(store, config),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub async fn open_account(&self, name: &str, email: &str) -> LedgerResult<AccountSnapshot> {
        self.ledger.open_account(name, email).await
    }

    pub async fn credit(
        &self,
        principal: &str,
        request: CreditRequest,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.credit(principal, request).await
    }

    pub async fn debit(
        &self,
        principal: &str,
        request: DebitRequest,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.debit(principal, request).await
    }

    pub async fn send_to_peer(
        &self,
        principal: &str,
        request: PeerTransferRequest,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.send_to_peer(principal, request).await
    }

    pub async fn pay_from_card(
        &self,
        principal: &str,
        request: CardPaymentRequest,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.pay_from_card(principal, request).await
    }

    pub async fn transfer_between_cards(
        &self,
        principal: &str,
        request: CardTransferRequest,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.transfer_between_cards(principal, request).await
    }

    pub async fn add_card(
        &self,
        principal: &str,
        details: NewCardDetails,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.add_card(principal, details).await
    }

    pub async fn remove_card(
        &self,
        principal: &str,
        card_id: &CardId,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.remove_card(principal, card_id).await
    }

    pub async fn update_card(
        &self,
        principal: &str,
        card_id: &CardId,
        update: CardUpdate,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.update_card(principal, card_id, update).await
    }

    pub async fn set_transaction_limit(
        &self,
        principal: &str,
        new_limit: Decimal,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.set_transaction_limit(principal, new_limit).await
    }

    pub async fn set_pin(
        &self,
        principal: &str,
        current_pin: Option<&str>,
        new_pin: &str,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.set_pin(principal, current_pin, new_pin).await
    }

    pub async fn clear_pin(
        &self,
        principal: &str,
        current_pin: &str,
    ) -> LedgerResult<AccountSnapshot> {
        self.ledger.clear_pin(principal, current_pin).await
    }

    pub async fn deactivate(&self, principal: &str) -> LedgerResult<AccountSnapshot> {
        self.ledger.deactivate(principal).await
    }

    pub async fn account(&self, principal: &str) -> LedgerResult<AccountSnapshot> {
        self.ledger.account(principal).await
    }

    pub async fn history(
        &self,
        principal: &str,
        filter: HistoryFilter,
    ) -> LedgerResult<Vec<LedgerEntry>> {
        self.ledger.history(principal, filter).await
    }

    pub async fn history_sum(
        &self,
        principal: &str,
        filter: HistoryFilter,
    ) -> LedgerResult<Decimal> {
        self.ledger.history_sum(principal, filter).await
    }

    pub async fn total_spent(
        &self,
        principal: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> LedgerResult<Decimal> {
        self.ledger.total_spent(principal, from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_ledger_flow() {
        let ledger = WalletLedger::in_memory(LedgerConfig::default());

        let account = ledger
            .open_account("Test User", "test@example.com")
            .await
            .expect("open account");
        ledger
            .credit(&account.id, CreditRequest::new(dec!(100)))
            .await
            .expect("credit");
        ledger
            .debit(&account.id, DebitRequest::new(dec!(40)))
            .await
            .expect("debit");

        let snapshot = ledger.account(&account.id).await.expect("snapshot");
        assert_eq!(snapshot.balance, dec!(60));
    }

    #[tokio::test]
    async fn test_with_repository_hydrates_existing_accounts() {
        let repository = Arc::new(MemoryStore::new());

        let mut seeded = Account::new("Seeded", "seeded@example.com", dec!(10000));
        seeded.credit_balance(dec!(55));
        repository.save(&seeded).await.expect("seed account");

        let ledger = WalletLedger::with_repository(repository, LedgerConfig::default())
            .await
            .expect("assemble ledger");

        let snapshot = ledger.account(&seeded.id).await.expect("snapshot");
        assert_eq!(snapshot.balance, dec!(55));

        // The hydrated email index resolves peers
        let other = ledger
            .open_account("Other", "other@example.com")
            .await
            .expect("open account");
        ledger
            .credit(&other.id, CreditRequest::new(dec!(20)))
            .await
            .expect("credit");
        ledger
            .send_to_peer(
                &other.id,
                PeerTransferRequest::new("seeded@example.com", dec!(5)),
            )
            .await
            .expect("send to hydrated account");

        let snapshot = ledger.account(&seeded.id).await.expect("snapshot");
        assert_eq!(snapshot.balance, dec!(60));
    }

    #[tokio::test]
    async fn test_file_backed_ledger_survives_reopen() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = LedgerConfig {
            data_dir: dir.path().to_path_buf(),
            ..LedgerConfig::default()
        };

        let account_id = {
            let ledger = WalletLedger::open(config.clone()).await.expect("open ledger");
            let account = ledger
                .open_account("Durable", "durable@example.com")
                .await
                .expect("open account");
            ledger
                .credit(&account.id, CreditRequest::new(dec!(321.09)))
                .await
                .expect("credit");
            account.id
        };

        let reopened = WalletLedger::open(config).await.expect("reopen ledger");
        let snapshot = reopened.account(&account_id).await.expect("snapshot");
        assert_eq!(snapshot.balance, dec!(321.09));
        assert_eq!(snapshot.email, "durable@example.com");
    }
}
