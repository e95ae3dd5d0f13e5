//! In-memory account repository
//!
//! This module contains the in-memory repository used by tests, demos, and
//! deployments that do not need durability.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::Account;
use crate::domain::repositories::AccountRepository;
use crate::shared::types::{AccountId, LedgerResult};

/// Account repository backed by a plain map
#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<AccountId, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted accounts
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.lock().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn load_all(&self) -> LedgerResult<Vec<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.values().cloned().collect())
    }

    async fn save(&self, account: &Account) -> LedgerResult<()> {
        let mut accounts = self.accounts.lock().await;
        accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }
}
