//! File-backed account repository
//!
//! This module contains the durable repository: one pretty-printed JSON file
//! per account under a data directory. Writes go through a temp file and a
//! rename so a crash never leaves a half-written account on disk.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::entities::Account;
use crate::domain::repositories::AccountRepository;
use crate::shared::constants::ACCOUNT_FILE_EXTENSION;
use crate::shared::types::LedgerResult;

/// Account repository backed by per-account JSON files
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> LedgerResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    fn account_path(&self, id: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", id, ACCOUNT_FILE_EXTENSION))
    }
}

#[async_trait]
impl AccountRepository for FileStore {
    async fn load_all(&self) -> LedgerResult<Vec<Account>> {
        let mut accounts = Vec::new();

        let mut entries = tokio::fs::read_dir(&self.data_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ACCOUNT_FILE_EXTENSION) {
                continue;
            }

            let data = tokio::fs::read(&path).await?;
            match serde_json::from_slice::<Account>(&data) {
                Ok(account) => accounts.push(account),
                Err(err) => {
                    log::warn!("Skipping unreadable account file {}: {}", path.display(), err);
                }
            }
        }

        Ok(accounts)
    }

    async fn save(&self, account: &Account) -> LedgerResult<()> {
        let path = self.account_path(&account.id);
        let tmp_path = path.with_extension(format!("{}.tmp", ACCOUNT_FILE_EXTENSION));

        let data = serde_json::to_string_pretty(account)?;
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        Ok(())
    }
}
