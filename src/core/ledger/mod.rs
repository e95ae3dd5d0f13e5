//! Ledger operations
//!
//! This module implements the wallet operations over the account store:
//! credits, debits, peer transfers, card moves, card lifecycle, and the
//! account settings. Every operation validates its full precondition set
//! before any state changes, and every wallet or card balance mutation
//! appends exactly one history entry, with the card-to-card transfer as the
//! single documented exception.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::accounts::AccountStore;
use crate::core::cards;
use crate::core::history::{self, HistoryFilter};
use crate::core::pin;
use crate::domain::entities::{Account, AccountSnapshot, LedgerEntry};
use crate::infrastructure::config::LedgerConfig;
use crate::shared::constants::{
    DEFAULT_CARD_PAYMENT_DESCRIPTION, DEFAULT_CREDIT_DESCRIPTION, DEFAULT_DEBIT_DESCRIPTION,
};
use crate::shared::error::LedgerError;
use crate::shared::types::{
    CardId, CardPaymentRequest, CardTransferRequest, CardUpdate, CreditRequest, DebitRequest,
    LedgerResult, NewCardDetails, PeerTransferRequest,
};
use crate::shared::utils::{normalize_amount, validate_email, validate_name, validate_pin_format};

fn ensure_active(account: &Account) -> LedgerResult<()> {
    if !account.active {
        return Err(LedgerError::invalid_operation("Account is deactivated"));
    }

    Ok(())
}

/// Wallet operations over the account store
pub struct Ledger {
    store: Arc<AccountStore>,
    config: LedgerConfig,
}

impl Ledger {
    pub fn new(store: Arc<AccountStore>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<AccountStore> {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Open a new account with a zero balance
    pub async fn open_account(&self, name: &str, email: &str) -> LedgerResult<AccountSnapshot> {
        let name = name.trim();
        let email = email.trim();
        validate_name(name)?;
        validate_email(email)?;

        let account = Account::new(name, email, self.config.default_transaction_limit);
        let snapshot = self.store.insert(account).await?;

        log::info!("Opened account {} for {}", snapshot.id, snapshot.email);
        Ok(snapshot)
    }

    /// Add funds to the wallet.
    ///
    /// With a card id the amount moves from that card's balance into the
    /// wallet; without one the credit is an external top up. Supplying
    /// `new_card` details with `save_card` set registers a card as a side
    /// effect of the same operation.
    pub async fn credit(
        &self,
        principal: &str,
        request: CreditRequest,
    ) -> LedgerResult<AccountSnapshot> {
        let amount = normalize_amount(request.amount)?;
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_CREDIT_DESCRIPTION.to_string());
        let allowance = self.config.card_starting_allowance;

        let snapshot = self
            .store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                // Every precondition holds before the first mutation
                if let Some(card_id) = &request.card_id {
                    let card = account.card(card_id)?;
                    if card.balance < amount {
                        return Err(LedgerError::insufficient_card_funds(card.balance, amount));
                    }
                }
                let saved = match (&request.new_card, request.save_card) {
                    (Some(details), true) => Some(cards::register_card(details, allowance)?),
                    _ => None,
                };

                let mut entry = LedgerEntry::credit(amount, description);
                if let Some(card_id) = &request.card_id {
                    account.card_mut(card_id)?.withdraw(amount)?;
                    entry = entry.with_card(card_id.clone());
                }
                account.credit_balance(amount);

                if let Some(card) = saved {
                    log::info!("Saved card {} on account {}", card.label(), account.id);
                    account.cards.push(card);
                }
                account.record(entry);

                Ok(account.snapshot())
            })
            .await?;

        log::info!("Credited {} to account {}", amount, principal);
        Ok(snapshot)
    }

    /// Spend from the wallet balance.
    /// When a PIN is set, the PIN gate fails before the funds check.
    pub async fn debit(
        &self,
        principal: &str,
        request: DebitRequest,
    ) -> LedgerResult<AccountSnapshot> {
        let amount = normalize_amount(request.amount)?;
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_DEBIT_DESCRIPTION.to_string());

        let snapshot = self
            .store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                if let Some(hash) = &account.pin_hash {
                    let provided = request.pin.as_deref().ok_or(LedgerError::InvalidPin)?;
                    if !pin::verify_pin(provided, hash)? {
                        return Err(LedgerError::InvalidPin);
                    }
                }

                account.debit_balance(amount)?;
                account.record(LedgerEntry::debit(amount, description));

                Ok(account.snapshot())
            })
            .await?;

        log::info!("Debited {} from account {}", amount, principal);
        Ok(snapshot)
    }

    /// Move funds to another account resolved by email or id.
    /// Both legs commit together or not at all.
    pub async fn send_to_peer(
        &self,
        principal: &str,
        request: PeerTransferRequest,
    ) -> LedgerResult<AccountSnapshot> {
        let amount = normalize_amount(request.amount)?;

        let recipient_id = self
            .store
            .resolve(&request.recipient)
            .await
            .ok_or_else(|| LedgerError::recipient_not_found(request.recipient.clone()))?;
        if recipient_id == principal {
            return Err(LedgerError::invalid_operation(
                "Cannot send funds to your own account",
            ));
        }

        let snapshot = self
            .store
            .mutate_pair(principal, &recipient_id, move |sender, recipient| {
                ensure_active(sender)?;
                ensure_active(recipient)?;

                sender.debit_balance(amount)?;
                recipient.credit_balance(amount);

                let sent = LedgerEntry::debit(amount, format!("Sent to {}", recipient.email));
                let received =
                    LedgerEntry::credit(amount, format!("Received from {}", sender.email));
                sender.record(sent);
                recipient.record(received);

                Ok(sender.snapshot())
            })
            .await?;

        log::info!(
            "Transferred {} from account {} to account {}",
            amount,
            principal,
            recipient_id
        );
        Ok(snapshot)
    }

    /// Pay directly from a saved card's balance.
    /// The wallet balance is untouched; the entry carries the card reference.
    pub async fn pay_from_card(
        &self,
        principal: &str,
        request: CardPaymentRequest,
    ) -> LedgerResult<AccountSnapshot> {
        let amount = normalize_amount(request.amount)?;
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_CARD_PAYMENT_DESCRIPTION.to_string());

        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                account.card_mut(&request.card_id)?.withdraw(amount)?;
                account.record(
                    LedgerEntry::debit(amount, description).with_card(request.card_id.clone()),
                );

                Ok(account.snapshot())
            })
            .await
    }

    /// Move funds between two saved cards.
    ///
    /// The wallet balance never changes. No account-level history entry is
    /// appended; the card balances themselves carry the move.
    pub async fn transfer_between_cards(
        &self,
        principal: &str,
        request: CardTransferRequest,
    ) -> LedgerResult<AccountSnapshot> {
        let amount = normalize_amount(request.amount)?;

        if request.source_card_id == request.dest_card_id {
            return Err(LedgerError::invalid_operation(
                "Source and destination card are the same",
            ));
        }

        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                // Both cards must exist before either balance moves
                account.card(&request.dest_card_id)?;
                account.card_mut(&request.source_card_id)?.withdraw(amount)?;
                account.card_mut(&request.dest_card_id)?.deposit(amount);

                Ok(account.snapshot())
            })
            .await
    }

    /// Register a saved card explicitly.
    ///
    /// The card starts at the configured allowance. The wallet balance does
    /// not move and no history entry is appended.
    pub async fn add_card(
        &self,
        principal: &str,
        details: NewCardDetails,
    ) -> LedgerResult<AccountSnapshot> {
        let allowance = self.config.card_starting_allowance;

        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                let card = cards::register_card(&details, allowance)?;
                log::info!("Saved card {} on account {}", card.label(), account.id);
                account.cards.push(card);

                Ok(account.snapshot())
            })
            .await
    }

    /// Remove a saved card, settling any remaining card balance into the
    /// wallet. A zero-balance card is removed without a settlement entry.
    pub async fn remove_card(
        &self,
        principal: &str,
        card_id: &CardId,
    ) -> LedgerResult<AccountSnapshot> {
        let card_id = card_id.clone();

        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                let card = account.take_card(&card_id)?;
                let settled = card.balance;
                if settled > Decimal::ZERO {
                    account.credit_balance(settled);
                    account.record(
                        LedgerEntry::debit(settled, format!("Card removed: {}", card.label()))
                            .with_card(card.id.clone()),
                    );
                }

                log::info!("Removed card {} from account {}", card.id, account.id);
                Ok(account.snapshot())
            })
            .await
    }

    /// Update a card's display expiry. No balance change, no history entry.
    pub async fn update_card(
        &self,
        principal: &str,
        card_id: &CardId,
        update: CardUpdate,
    ) -> LedgerResult<AccountSnapshot> {
        let expiry = update.expiry.trim().to_string();
        if expiry.is_empty() {
            return Err(LedgerError::invalid_operation("Card expiry cannot be empty"));
        }

        let card_id = card_id.clone();
        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                account.card_mut(&card_id)?.expiry = expiry;
                Ok(account.snapshot())
            })
            .await
    }

    /// Replace the advisory transaction limit.
    /// The limit is surfaced to the account holder and never enforced.
    pub async fn set_transaction_limit(
        &self,
        principal: &str,
        new_limit: Decimal,
    ) -> LedgerResult<AccountSnapshot> {
        let limit = normalize_amount(new_limit)?;

        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                account.transaction_limit = limit;
                Ok(account.snapshot())
            })
            .await
    }

    /// Set or change the debit PIN.
    /// Changing an existing PIN requires the current one.
    pub async fn set_pin(
        &self,
        principal: &str,
        current_pin: Option<&str>,
        new_pin: &str,
    ) -> LedgerResult<AccountSnapshot> {
        validate_pin_format(new_pin)?;
        let hash = pin::hash_pin(new_pin)?;
        let current = current_pin.map(str::to_owned);

        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                if let Some(existing) = &account.pin_hash {
                    let provided = current.as_deref().ok_or(LedgerError::InvalidPin)?;
                    if !pin::verify_pin(provided, existing)? {
                        return Err(LedgerError::InvalidPin);
                    }
                }
                account.pin_hash = Some(hash);

                Ok(account.snapshot())
            })
            .await
    }

    /// Remove the debit PIN. Requires the current PIN.
    pub async fn clear_pin(
        &self,
        principal: &str,
        current_pin: &str,
    ) -> LedgerResult<AccountSnapshot> {
        let current = current_pin.to_owned();

        self.store
            .mutate(principal, move |account| {
                ensure_active(account)?;

                let existing = account
                    .pin_hash
                    .as_ref()
                    .ok_or_else(|| LedgerError::invalid_operation("No PIN is set"))?;
                if !pin::verify_pin(&current, existing)? {
                    return Err(LedgerError::InvalidPin);
                }
                account.pin_hash = None;

                Ok(account.snapshot())
            })
            .await
    }

    /// Deactivate the account. Deactivation is terminal: later mutating
    /// operations fail while snapshots and history stay readable.
    pub async fn deactivate(&self, principal: &str) -> LedgerResult<AccountSnapshot> {
        let snapshot = self
            .store
            .mutate(principal, |account| {
                ensure_active(account)?;

                account.active = false;
                Ok(account.snapshot())
            })
            .await?;

        log::info!("Deactivated account {}", principal);
        Ok(snapshot)
    }

    /// Safe snapshot of one account
    pub async fn account(&self, principal: &str) -> LedgerResult<AccountSnapshot> {
        self.store.snapshot(principal).await
    }

    /// Filtered history, most recent first
    pub async fn history(
        &self,
        principal: &str,
        filter: HistoryFilter,
    ) -> LedgerResult<Vec<LedgerEntry>> {
        self.store
            .with_account(principal, move |account| {
                history::query(&account.history, &filter)
            })
            .await
    }

    /// Sum of the entry amounts matching the filter
    pub async fn history_sum(
        &self,
        principal: &str,
        filter: HistoryFilter,
    ) -> LedgerResult<Decimal> {
        self.store
            .with_account(principal, move |account| {
                history::sum(&account.history, &filter)
            })
            .await
    }

    /// Total debited within an optional date range
    pub async fn total_spent(
        &self,
        principal: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> LedgerResult<Decimal> {
        self.store
            .with_account(principal, move |account| {
                history::total_spent(&account.history, from, to)
            })
            .await
    }
}
