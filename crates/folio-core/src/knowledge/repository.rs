//! Knowledge repository trait.

use super::{KnowledgeBase, KnowledgeContent};
use crate::error::Result;

/// Source of knowledge content other than the compiled-in defaults.
#[async_trait::async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Loads and validates the content.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Knowledge` or `FolioError::UnknownCategory` for
    /// incomplete content, and storage errors as they occur.
    async fn load(&self) -> Result<KnowledgeBase>;

    /// Writes `content`, replacing what is stored.
    async fn save(&self, content: &KnowledgeContent) -> Result<()>;
}
