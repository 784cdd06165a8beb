//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSE_HOME/config.json` and holds display settings.
//! Expenses themselves are never written to disk.

use crate::model::{AmountFormat, DEFAULT_CURRENCY_SYMBOL};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expense";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSE_HOME` and from there it loads `$EXPENSE_HOME/config.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, if needed, and writes an initial `config.json` into it.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the expense home, e.g. `$HOME/expense`
    /// - `currency_symbol` - The symbol written in front of amounts, e.g. `₱`
    /// - `thousands_separators` - Whether amounts are written with commas
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        currency_symbol: &str,
        thousands_separators: bool,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the expense home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            currency_symbol: currency_symbol.to_string(),
            thousands_separators,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `expense_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(expense_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = expense_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Expense home is missing, run 'expense init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'expense init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    pub fn thousands_separators(&self) -> bool {
        self.config_file.thousands_separators
    }

    /// How amounts should be written for display.
    pub fn amount_format(&self) -> AmountFormat {
        AmountFormat::new(self.currency_symbol(), self.thousands_separators())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expense",
///   "config_version": 1,
///   "currency_symbol": "₱",
///   "thousands_separators": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expense"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Symbol written in front of amounts
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,

    /// Whether amounts are written with thousands separators
    #[serde(default)]
    thousands_separators: bool,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency_symbol: default_currency_symbol(),
            thousands_separators: false,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
