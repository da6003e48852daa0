//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! from a configuration directory, and the document parsing shared with the
//! file-backed rate-table store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::engine::{ContextLoader, FileRateTableStore, SalaryEngine};
use crate::error::{EngineError, EngineResult};

use super::types::EngineSettings;

/// Extensions recognised for configuration documents, in lookup order.
pub const DOCUMENT_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Loads engine settings and wires up the file-backed engine pieces.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── settings.yaml             # Engine settings
/// └── rates/
///     └── catalunya/
///         └── 2024/
///             ├── brackets.yaml     # Ordered withholding brackets
///             └── flat_rates.yaml   # Flat contribution rates
/// ```
///
/// Rate-table documents may be YAML or JSON.
///
/// # Example
///
/// ```no_run
/// use irpf_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// let engine = loader.engine();
/// assert!(!engine.is_loaded());
/// # Ok::<(), irpf_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads `settings.yaml` from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if the settings file
    /// is missing or is not valid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let root = path.as_ref().to_path_buf();
        let settings_path = root.join("settings.yaml");

        let content =
            fs::read_to_string(&settings_path).map_err(|_| EngineError::ConfigNotFound {
                path: settings_path.display().to_string(),
            })?;
        let settings = parse_document::<EngineSettings>(&settings_path, &content)?;

        Ok(Self { root, settings })
    }

    /// Creates a loader from settings already in memory.
    pub fn from_settings<P: AsRef<Path>>(path: P, settings: EngineSettings) -> Self {
        Self {
            root: path.as_ref().to_path_buf(),
            settings,
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the directory holding the rate tables.
    pub fn rates_root(&self) -> PathBuf {
        if self.settings.rates_dir.is_absolute() {
            self.settings.rates_dir.clone()
        } else {
            self.root.join(&self.settings.rates_dir)
        }
    }

    /// Creates an engine with the configured payment periods and no context.
    pub fn engine(&self) -> SalaryEngine {
        SalaryEngine::new(self.settings.payment_periods)
    }

    /// Creates a store reading rate tables from [`rates_root`](Self::rates_root).
    pub fn file_store(&self) -> FileRateTableStore {
        FileRateTableStore::new(self.rates_root())
    }

    /// Creates a context loader over the file store with the configured timeout.
    pub fn context_loader(&self) -> ContextLoader<FileRateTableStore> {
        ContextLoader::new(self.file_store()).with_timeout(self.settings.load_timeout())
    }
}

/// Parses a document as JSON or YAML depending on its extension.
///
/// Anything that is not `.json` is read as YAML.
pub fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> EngineResult<T> {
    let path_str = path.display().to_string();
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    if is_json {
        serde_json::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    } else {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
