use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expense_home().path();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args).await?.print(),

        Command::Shell(shell_args) => {
            let config = Config::load(home).await?;
            commands::shell(config, shell_args).await?.print()
        }

        Command::Mcp(_mcp_args) => commands::mcp(Config::load(home).await?).await?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber. Logs go to stderr so they never mix with shell output or
/// the MCP protocol on stdout.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG exists; use it.
        Some(_) => EnvFilter::from_default_env(),
        // Otherwise only this crate logs, at the requested level.
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
