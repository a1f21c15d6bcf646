//! TOML-backed record of the last contact submission.

use crate::storage::AtomicTomlFile;
use chrono::{DateTime, Utc};
use folio_core::contact::SubmissionLedger;
use folio_core::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_submission: Option<DateTime<Utc>>,
}

pub struct TomlSubmissionLedger {
    file: AtomicTomlFile<LedgerRecord>,
}

impl TomlSubmissionLedger {
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

#[async_trait::async_trait]
impl SubmissionLedger for TomlSubmissionLedger {
    async fn last_submission(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.file.load()?.and_then(|r| r.last_submission))
    }

    async fn record(&self, at: DateTime<Utc>) -> Result<()> {
        self.file.save(&LedgerRecord {
            last_submission: Some(at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_ledger_has_no_submission() {
        let dir = TempDir::new().unwrap();
        let ledger = TomlSubmissionLedger::with_path(dir.path().join("ledger.toml"));
        assert_eq!(ledger.last_submission().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.toml");
        let at = Utc::now() - TimeDelta::seconds(5);

        TomlSubmissionLedger::with_path(path.clone())
            .record(at)
            .await
            .unwrap();

        let reopened = TomlSubmissionLedger::with_path(path);
        assert_eq!(reopened.last_submission().await.unwrap(), Some(at));
    }
}
