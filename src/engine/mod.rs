//! The engine layer: context ownership, rate-table stores and loading.
//!
//! [`SalaryEngine`] owns the current calculation context and exposes the
//! calculation surface. [`ContextLoader`] fills it from a [`RateTableStore`].
//!
//! # Example
//!
//! ```no_run
//! use irpf_engine::config::ConfigLoader;
//! use irpf_engine::models::RateTableKey;
//! use rust_decimal::Decimal;
//! use tokio::sync::RwLock;
//!
//! # async fn run() -> irpf_engine::error::EngineResult<()> {
//! let config = ConfigLoader::load("./config")?;
//! let loader = config.context_loader();
//! let engine = RwLock::new(config.engine());
//!
//! loader.load(&engine, RateTableKey::new("catalunya", "2024")).await?;
//! let net = engine.read().await.net_salary(Decimal::from(30000))?;
//! println!("Net salary: {} EUR", net);
//! # Ok(())
//! # }
//! ```

mod context_loader;
mod salary_engine;
mod store;

pub use context_loader::{ContextLoader, LoadOutcome};
pub use salary_engine::SalaryEngine;
pub use store::{FileRateTableStore, InMemoryRateTableStore, RateTableStore};
