//! MCP server command handler.
//!
//! This module implements the `expense mcp` command which runs an MCP server
//! for AI agent integration.

use crate::commands::Out;
use crate::mcp::Io;
use crate::{mcp, Config, Result};

/// Runs the MCP server.
///
/// This launches a long-running process that communicates via JSON-RPC over stdin/stdout.
/// MCP clients launch this as a subprocess. The expenses live for as long as the process does.
pub async fn mcp(config: Config) -> Result<Out<()>> {
    mcp::run_server(config, Io::Stdio).await?;
    Ok("Done running MCP server".into())
}
