//! Account repository for data access
//!
//! This module defines the persistence seam the account store writes through
//! before committing a mutation to memory.

use async_trait::async_trait;

use crate::domain::entities::Account;
use crate::shared::types::LedgerResult;

/// Account repository trait
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Load every persisted account, used to hydrate the store at startup
    async fn load_all(&self) -> LedgerResult<Vec<Account>>;

    /// Persist one account. A failure here must leave the previously
    /// persisted state readable.
    async fn save(&self, account: &Account) -> LedgerResult<()>;
}
