//! Account store and per-account serialization
//!
//! This module owns the in-memory account state. Every account lives behind
//! its own async Mutex, so operations on the same account serialize while
//! operations on different accounts run in parallel.
//!
//! A mutation never touches committed state directly: it clones the account
//! into a draft, runs all validation and changes against the draft, persists
//! the draft, and only then commits it back. A failure at any step leaves
//! the committed state and the storage unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::{Account, AccountSnapshot};
use crate::domain::repositories::AccountRepository;
use crate::shared::error::LedgerError;
use crate::shared::types::{AccountId, LedgerResult};

type AccountCell = Arc<Mutex<Account>>;

/// Owner of all account state
pub struct AccountStore {
    accounts: RwLock<HashMap<AccountId, AccountCell>>,
    emails: RwLock<HashMap<String, AccountId>>,
    repository: Arc<dyn AccountRepository>,
}

impl AccountStore {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            emails: RwLock::new(HashMap::new()),
            repository,
        }
    }

    /// Load persisted accounts into memory, normalizing anything a crash or
    /// an older version left behind. Returns the number of accounts loaded.
    pub async fn hydrate(&self) -> LedgerResult<usize> {
        let loaded = self.repository.load_all().await?;

        let mut accounts = self.accounts.write().await;
        let mut emails = self.emails.write().await;
        accounts.clear();
        emails.clear();

        let count = loaded.len();
        for mut account in loaded {
            account.normalize();
            if let Some(previous) = emails.insert(account.email.clone(), account.id.clone()) {
                log::warn!(
                    "Duplicate email {} in storage, resolving to account {} instead of {}",
                    account.email,
                    account.id,
                    previous
                );
            }
            accounts.insert(account.id.clone(), Arc::new(Mutex::new(account)));
        }

        log::info!("Hydrated {} accounts", count);
        Ok(count)
    }

    /// Register a new account. The email must be unused.
    pub async fn insert(&self, account: Account) -> LedgerResult<AccountSnapshot> {
        // Hold both indexes for the whole check-save-commit sequence so two
        // concurrent registrations cannot claim the same email.
        let mut accounts = self.accounts.write().await;
        let mut emails = self.emails.write().await;

        if emails.contains_key(&account.email) {
            return Err(LedgerError::account_exists(account.email));
        }

        self.repository.save(&account).await?;

        let snapshot = account.snapshot();
        emails.insert(account.email.clone(), account.id.clone());
        accounts.insert(account.id.clone(), Arc::new(Mutex::new(account)));

        Ok(snapshot)
    }

    async fn cell(&self, id: &str) -> LedgerResult<AccountCell> {
        let accounts = self.accounts.read().await;
        accounts
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Resolve an email or account id to an account id
    pub async fn resolve(&self, handle: &str) -> Option<AccountId> {
        {
            let emails = self.emails.read().await;
            if let Some(id) = emails.get(handle) {
                return Some(id.clone());
            }
        }

        let accounts = self.accounts.read().await;
        accounts.contains_key(handle).then(|| handle.to_string())
    }

    /// Consistent snapshot of one account
    pub async fn snapshot(&self, id: &str) -> LedgerResult<AccountSnapshot> {
        let cell = self.cell(id).await?;
        let account = cell.lock().await;
        Ok(account.snapshot())
    }

    /// Read one account under its lock
    pub async fn with_account<T>(
        &self,
        id: &str,
        reader: impl FnOnce(&Account) -> T,
    ) -> LedgerResult<T> {
        let cell = self.cell(id).await?;
        let account = cell.lock().await;
        Ok(reader(&account))
    }

    /// Run a mutation against one account.
    ///
    /// The closure validates and mutates a draft. The draft becomes the
    /// committed state only after it has been persisted.
    pub async fn mutate<T>(
        &self,
        id: &str,
        mutation: impl FnOnce(&mut Account) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let cell = self.cell(id).await?;
        let mut committed = cell.lock().await;

        let mut draft = committed.clone();
        let output = mutation(&mut draft)?;
        draft.normalize();
        draft.touch();

        self.repository.save(&draft).await?;
        *committed = draft;

        Ok(output)
    }

    /// Run a mutation against two accounts as one logical transaction.
    ///
    /// Locks are taken in ascending id order so concurrent transfers in
    /// opposite directions cannot deadlock. The closure receives the drafts
    /// in caller order and must validate both legs before mutating either.
    pub async fn mutate_pair<T>(
        &self,
        first_id: &str,
        second_id: &str,
        mutation: impl FnOnce(&mut Account, &mut Account) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        if first_id == second_id {
            return Err(LedgerError::invalid_operation(
                "Cannot pair an account with itself",
            ));
        }

        let first_cell = self.cell(first_id).await?;
        let second_cell = self.cell(second_id).await?;

        let swapped = first_id > second_id;
        let (low_cell, high_cell) = if swapped {
            (&second_cell, &first_cell)
        } else {
            (&first_cell, &second_cell)
        };

        let mut low = low_cell.lock().await;
        let mut high = high_cell.lock().await;
        let (committed_first, committed_second) = if swapped {
            (&mut high, &mut low)
        } else {
            (&mut low, &mut high)
        };

        let mut first_draft = (**committed_first).clone();
        let mut second_draft = (**committed_second).clone();
        let output = mutation(&mut first_draft, &mut second_draft)?;

        first_draft.normalize();
        first_draft.touch();
        second_draft.normalize();
        second_draft.touch();

        let first_before = (**committed_first).clone();
        self.repository.save(&first_draft).await?;
        if let Err(err) = self.repository.save(&second_draft).await {
            // Restore the first leg so storage does not keep half a transfer
            if let Err(rollback) = self.repository.save(&first_before).await {
                log::error!(
                    "Failed to restore account {} after a partial pair save: {}",
                    first_before.id,
                    rollback
                );
            }
            return Err(err);
        }

        **committed_first = first_draft;
        **committed_second = second_draft;

        Ok(output)
    }
}
