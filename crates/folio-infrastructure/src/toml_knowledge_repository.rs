//! TOML-based KnowledgeRepository implementation

use crate::storage::AtomicTomlFile;
use folio_core::error::{FolioError, Result};
use folio_core::knowledge::{KnowledgeBase, KnowledgeContent, KnowledgeRepository};
use std::path::{Path, PathBuf};
use tracing::info;

/// Stores knowledge content in a single TOML file.
///
/// Loading validates completeness, so a file missing a category or with an
/// empty template pool is rejected rather than half-used.
pub struct TomlKnowledgeRepository {
    file: AtomicTomlFile<KnowledgeContent>,
}

impl TomlKnowledgeRepository {
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait::async_trait]
impl KnowledgeRepository for TomlKnowledgeRepository {
    async fn load(&self) -> Result<KnowledgeBase> {
        let content = self.file.load()?.ok_or_else(|| {
            FolioError::not_found("knowledge file", self.path().display().to_string())
        })?;
        let knowledge = KnowledgeBase::try_from(content)?;
        info!(path = %self.path().display(), owner = knowledge.owner_name(), "loaded knowledge content");
        Ok(knowledge)
    }

    async fn save(&self, content: &KnowledgeContent) -> Result<()> {
        self.file.save(content)
    }
}
