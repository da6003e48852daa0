//! Rate-table stores.
//!
//! A [`RateTableStore`] supplies the bracket table and flat rates for a
//! region and year. [`FileRateTableStore`] reads them from a directory tree,
//! [`InMemoryRateTableStore`] serves tables registered up front.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{DOCUMENT_EXTENSIONS, parse_document};
use crate::error::{EngineError, EngineResult};
use crate::models::{BracketTable, FlatRates, RateTableKey, RateTables};

/// Source of rate tables keyed by region and year.
pub trait RateTableStore: Send + Sync {
    /// Retrieves the tables for `key`.
    fn load(&self, key: &RateTableKey) -> impl Future<Output = EngineResult<RateTables>> + Send;
}

/// Reads rate tables from `<root>/<region>/<year>/`.
///
/// Each year directory holds a `brackets` document and a `flat_rates`
/// document, each as `.yaml`, `.yml` or `.json` (first match wins).
#[derive(Debug, Clone)]
pub struct FileRateTableStore {
    root: PathBuf,
}

impl FileRateTableStore {
    /// Creates a store rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn year_dir(&self, key: &RateTableKey) -> EngineResult<PathBuf> {
        let is_plain = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        if !is_plain(&key.region) || !is_plain(&key.year) {
            return Err(EngineError::RatesNotFound {
                region: key.region.clone(),
                year: key.year.clone(),
            });
        }

        Ok(self.root.join(&key.region).join(&key.year))
    }

    async fn read_document<T: DeserializeOwned>(dir: &Path, stem: &str) -> EngineResult<T> {
        for extension in DOCUMENT_EXTENSIONS {
            let path = dir.join(format!("{}.{}", stem, extension));
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    debug!(path = %path.display(), "Read rate document");
                    return parse_document(&path, &content);
                }
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        Err(EngineError::ConfigNotFound {
            path: format!("{} ({})", dir.join(stem).display(), DOCUMENT_EXTENSIONS.join("|")),
        })
    }
}

impl RateTableStore for FileRateTableStore {
    async fn load(&self, key: &RateTableKey) -> EngineResult<RateTables> {
        let dir = self.year_dir(key)?;

        let exists = tokio::fs::try_exists(&dir)
            .await
            .map_err(|err| EngineError::ConfigParseError {
                path: dir.display().to_string(),
                message: err.to_string(),
            })?;
        if !exists {
            return Err(EngineError::RatesNotFound {
                region: key.region.clone(),
                year: key.year.clone(),
            });
        }

        let brackets: BracketTable = Self::read_document(&dir, "brackets").await?;
        let flat_rates: FlatRates = Self::read_document(&dir, "flat_rates").await?;

        RateTables::new(brackets, flat_rates)
    }
}

/// Serves tables registered in memory, optionally after a delay.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateTableStore {
    tables: HashMap<RateTableKey, RateTables>,
    delays: HashMap<RateTableKey, Duration>,
}

impl InMemoryRateTableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers tables for a key, replacing any previous entry.
    pub fn insert(&mut self, key: RateTableKey, tables: RateTables) {
        self.tables.insert(key, tables);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_tables(mut self, key: RateTableKey, tables: RateTables) -> Self {
        self.insert(key, tables);
        self
    }

    /// Makes every load of `key` wait for `delay` before answering.
    pub fn with_delay(mut self, key: RateTableKey, delay: Duration) -> Self {
        self.delays.insert(key, delay);
        self
    }
}

impl RateTableStore for InMemoryRateTableStore {
    async fn load(&self, key: &RateTableKey) -> EngineResult<RateTables> {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }

        self.tables
            .get(key)
            .cloned()
            .ok_or_else(|| EngineError::RatesNotFound {
                region: key.region.clone(),
                year: key.year.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bracket;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates_path() -> &'static str {
        "./config/rates"
    }

    fn create_test_tables() -> RateTables {
        RateTables::new(
            BracketTable::new(vec![Bracket::new(dec("12450"), dec("19"))]).unwrap(),
            FlatRates {
                contingencias_comunes: dec("4.7"),
                atur: dec("1.55"),
                fp: dec("0.1"),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_file_store_reads_yaml_tables() {
        let store = FileRateTableStore::new(rates_path());
        let tables = store
            .load(&RateTableKey::new("catalunya", "2024"))
            .await
            .unwrap();

        assert_eq!(tables.brackets.brackets()[0], Bracket::new(dec("12450"), dec("19")));
        assert_eq!(tables.flat_rates.contingencias_comunes, dec("4.7"));
    }

    #[tokio::test]
    async fn test_file_store_reads_json_tables() {
        let store = FileRateTableStore::new(rates_path());
        let tables = store
            .load(&RateTableKey::new("madrid", "2024"))
            .await
            .unwrap();

        assert_eq!(tables.brackets.brackets().len(), 6);
        assert_eq!(tables.flat_rates.atur, dec("1.55"));
    }

    #[tokio::test]
    async fn test_file_store_unknown_year_is_not_found() {
        let store = FileRateTableStore::new(rates_path());
        match store.load(&RateTableKey::new("catalunya", "1999")).await {
            Err(EngineError::RatesNotFound { region, year }) => {
                assert_eq!(region, "catalunya");
                assert_eq!(year, "1999");
            }
            other => panic!("Expected RatesNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_store_io_error_is_not_reported_as_missing_rates() {
        // A file used as the root makes the year directory lookup fail with
        // "not a directory" rather than "not found".
        let store = FileRateTableStore::new("./Cargo.toml");
        match store.load(&RateTableKey::new("catalunya", "2024")).await {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("catalunya"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_like_keys() {
        let store = FileRateTableStore::new(rates_path());
        let result = store.load(&RateTableKey::new("../catalunya", "2024")).await;
        assert!(matches!(result, Err(EngineError::RatesNotFound { .. })));
    }

    #[tokio::test]
    async fn test_file_store_missing_document_is_reported() {
        let store = FileRateTableStore::new("./tests/fixtures/rates");
        match store.load(&RateTableKey::new("incomplete", "2023")).await {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("flat_rates"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_store_invalid_table_is_a_parse_error() {
        let store = FileRateTableStore::new("./tests/fixtures/rates");
        match store.load(&RateTableKey::new("broken", "2024")).await {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("brackets.yaml"));
                assert!(message.contains("does not increase"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_in_memory_store_returns_registered_tables() {
        let key = RateTableKey::new("catalunya", "2024");
        let store = InMemoryRateTableStore::new().with_tables(key.clone(), create_test_tables());

        assert_eq!(store.load(&key).await.unwrap(), create_test_tables());
    }

    #[tokio::test]
    async fn test_in_memory_store_unknown_key_is_not_found() {
        let store = InMemoryRateTableStore::new();
        let result = store.load(&RateTableKey::new("madrid", "2024")).await;
        assert!(matches!(result, Err(EngineError::RatesNotFound { .. })));
    }
}
