//! Interactive shell command handler.

use crate::args::ShellArgs;
use crate::commands::Out;
use crate::session::Session;
use crate::{shell, Config, Result};
use tokio::io::BufReader;

/// Runs an interactive session on stdin and stdout until the user quits or input ends.
///
/// The expenses entered are discarded when the session ends.
pub async fn shell(config: Config, args: &ShellArgs) -> Result<Out<()>> {
    let mut session = Session::new();
    let format = config.amount_format();
    shell::run(
        &mut session,
        &format,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        args.quiet(),
    )
    .await?;
    let count = session.expenses().len();
    Ok(format!(
        "Session ended with {} expense{} totalling {}",
        count,
        if count == 1 { "" } else { "s" },
        session.total().display(&format)
    )
    .into())
}
