//! Asynchronous context loading with last-load-wins semantics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{RateTableKey, RateTables};

use super::salary_engine::SalaryEngine;
use super::store::RateTableStore;

/// What happened to a load that finished without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The tables were published to the engine.
    Published(RateTableKey),
    /// A newer load was started before this one finished, so its result
    /// was discarded.
    Superseded,
}

/// Loads rate tables from a store into a shared [`SalaryEngine`].
///
/// Each call to [`load`](Self::load) takes a ticket. When the store answers,
/// the result is applied only if no newer load has started in the meantime:
/// success publishes the tables, failure clears the engine's context so no
/// calculation runs against stale tables. Results of superseded loads,
/// successful or not, leave the engine untouched.
///
/// # Example
///
/// ```
/// use irpf_engine::engine::{ContextLoader, InMemoryRateTableStore, LoadOutcome, SalaryEngine};
/// use irpf_engine::models::RateTableKey;
/// use tokio::sync::RwLock;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let loader = ContextLoader::new(InMemoryRateTableStore::new());
/// let engine = RwLock::new(SalaryEngine::default());
///
/// let result = loader.load(&engine, RateTableKey::new("catalunya", "2024")).await;
/// assert!(result.is_err());
/// assert!(!engine.read().await.is_loaded());
/// # });
/// ```
#[derive(Debug)]
pub struct ContextLoader<S> {
    store: S,
    generation: AtomicU64,
    timeout: Option<Duration>,
}

impl<S: RateTableStore> ContextLoader<S> {
    /// Creates a loader over `store` with no timeout.
    pub fn new(store: S) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
            timeout: None,
        }
    }

    /// Bounds every load by `timeout`. A load that runs out of time counts
    /// as a failed load.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads the tables for `key` and applies the result to `engine`.
    ///
    /// # Returns
    ///
    /// - `Ok(LoadOutcome::Published(key))` when the tables were published
    /// - `Ok(LoadOutcome::Superseded)` when a newer load made this one moot
    /// - `Err(_)` when this was the latest load and it failed; the engine's
    ///   context has been cleared
    pub async fn load(
        &self,
        engine: &RwLock<SalaryEngine>,
        key: RateTableKey,
    ) -> EngineResult<LoadOutcome> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(key = %key, ticket, "Loading rate tables");

        let result = self.fetch(&key).await;

        let mut engine = engine.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(key = %key, ticket, "Discarding superseded rate table load");
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(tables) => {
                engine.set_tables(key.clone(), tables);
                info!(key = %key, ticket, "Published rate tables");
                Ok(LoadOutcome::Published(key))
            }
            Err(err) => {
                engine.clear_context();
                warn!(key = %key, ticket, error = %err, "Rate table load failed, context cleared");
                Err(err)
            }
        }
    }

    async fn fetch(&self, key: &RateTableKey) -> EngineResult<RateTables> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.store.load(key))
                .await
                .map_err(|_| EngineError::LoadTimeout {
                    region: key.region.clone(),
                    year: key.year.clone(),
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                })?,
            None => self.store.load(key).await,
        }
    }
}
