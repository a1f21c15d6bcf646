//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/folio/config.toml`.

use crate::paths::FolioPaths;
use crate::storage::AtomicTomlFile;
use folio_core::config::RootConfig;
use folio_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Loads and caches the root configuration.
///
/// A missing file is created with defaults on first access. A file that
/// cannot be read or parsed falls back to defaults with a warning; use
/// [`ConfigService::try_get_config`] to surface the error instead.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading a specific file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> RootConfig {
        self.try_get_config().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load config, using defaults");
            RootConfig::default()
        })
    }

    /// Like [`get_config`](Self::get_config) but reports load errors.
    pub fn try_get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Path of the file this service reads.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => FolioPaths::default().config_file(),
        }
    }

    /// Directory relative config entries resolve against.
    pub fn config_dir(&self) -> Result<PathBuf> {
        let path = self.config_path()?;
        Ok(path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default())
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = self.config_path()?;
        let file = AtomicTomlFile::<RootConfig>::new(path.clone());
        match file.load()? {
            Some(config) => {
                debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            None => {
                let config = RootConfig::default();
                if let Err(e) = file.save(&config) {
                    warn!(path = %path.display(), error = %e, "could not write default config");
                } else {
                    debug!(path = %path.display(), "created default config");
                }
                Ok(config)
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
