//! Path management for Folio files.
//!
//! ```text
//! ~/.config/folio/              # Config directory
//! ├── config.toml               # Application configuration
//! ├── contact_ledger.toml       # Last contact submission time
//! ├── knowledge.toml            # Optional knowledge content override
//! └── logs/
//!     └── folio.log.YYYY-MM-DD
//! ```

use folio_core::error::{FolioError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "folio";

/// Resolves Folio's on-disk locations.
///
/// A base directory can be given to keep everything under one root, which
/// tests use with a temporary directory.
#[derive(Debug, Clone, Default)]
pub struct FolioPaths {
    base: Option<PathBuf>,
}

impl FolioPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// The config directory, e.g. `~/.config/folio/`.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| FolioError::config("cannot find config directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }

    pub fn ledger_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("contact_ledger.toml"))
    }

    /// Default location for an exported knowledge file.
    pub fn knowledge_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("knowledge.toml"))
    }

    /// Resolves a configured path; relative paths are taken from the config
    /// directory.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.config_dir()?.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_base() {
        let paths = FolioPaths::new(Some(PathBuf::from("/tmp/folio-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/folio-test/config.toml")
        );
        assert_eq!(
            paths.logs_dir().unwrap(),
            PathBuf::from("/tmp/folio-test/logs")
        );
        assert_eq!(
            paths.ledger_file().unwrap(),
            PathBuf::from("/tmp/folio-test/contact_ledger.toml")
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let paths = FolioPaths::new(Some(PathBuf::from("/srv/folio")));
        assert_eq!(
            paths.resolve(Path::new("knowledge.toml")).unwrap(),
            PathBuf::from("/srv/folio/knowledge.toml")
        );
        assert_eq!(
            paths.resolve(Path::new("/etc/k.toml")).unwrap(),
            PathBuf::from("/etc/k.toml")
        );
    }

    #[test]
    fn test_default_dir_is_named_folio() {
        if let Ok(dir) = FolioPaths::default().config_dir() {
            assert!(dir.ends_with("folio"));
        }
    }
}
