//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::DEFAULT_CURRENCY_SYMBOL;
use crate::Config;
use tempfile::TempDir;

/// Test environment that sets up an expense home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with the default currency symbol and no thousands separators.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("expense");
        let config = Config::create(&root, DEFAULT_CURRENCY_SYMBOL, false)
            .await
            .unwrap();

        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }
}
