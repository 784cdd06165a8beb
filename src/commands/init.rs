use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and writes an initial `config.json` using `args`.
///
/// Running it again over an existing home directory overwrites the configuration file.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(expense_home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let config = Config::create(
        expense_home,
        args.currency_symbol(),
        args.thousands_separators(),
    )
    .await
    .context("Unable to create the home directory and config")?;
    Ok(format!(
        "Successfully created the config at {}",
        config.config_path().display()
    )
    .into())
}
