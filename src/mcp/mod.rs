//! MCP (Model Context Protocol) server implementation.
//!
//! This module provides an MCP server that exposes an expense session as tools for AI agent
//! integration. The server communicates via JSON-RPC over stdio. All tools share one `Session`
//! which lives for as long as the server runs.

mod mcp_utils;
mod tools;

use crate::model::AmountFormat;
use crate::session::Session;
use crate::Config;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::transport::stdio;
use rmcp::{tool_handler, ServerHandler, ServiceExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// The expense MCP server.
#[derive(Debug, Clone)]
pub struct ExpenseServer {
    session: Arc<Mutex<Session>>,
    format: Arc<AmountFormat>,
    tool_router: ToolRouter<ExpenseServer>,
}

impl ExpenseServer {
    /// Creates a new ExpenseServer with an empty session.
    pub fn new(config: &Config) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            format: Arc::new(config.amount_format()),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for ExpenseServer {
    /// Returns server information sent to the MCP client during initialization.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "expense".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(include_str!("docs/INTRO.md").into()),
        }
    }
}

/// Transport type for the MCP server.
#[derive(Debug, Default)]
pub(crate) enum Io {
    #[default]
    Stdio,
    /// Mock transport for testing - holds one end of a duplex channel.
    #[cfg(test)]
    Mock(tokio::io::DuplexStream),
}

/// Runs the MCP server with stdio transport or mock transport. This function starts the MCP server
/// and blocks until the client disconnects or an error occurs.
pub(crate) async fn run_server(config: Config, io: Io) -> crate::Result<()> {
    let server = ExpenseServer::new(&config);
    info!("Starting MCP server...");

    let service = match io {
        Io::Stdio => server
            .serve(stdio())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start MCP server: {e}"))?,
        #[cfg(test)]
        Io::Mock(stream) => server
            .serve(stream)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start MCP server: {e}"))?,
    };

    info!("MCP server running, waiting for requests...");

    service
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))?;

    info!("MCP server shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use rmcp::model::{CallToolRequestParam, CallToolResult, RawContent};
    use rmcp::service::{RoleClient, RunningService};
    use rmcp::ServiceExt;
    use tokio::io::duplex;

    async fn call(
        client: &RunningService<RoleClient, ()>,
        name: &'static str,
        args: serde_json::Value,
    ) -> CallToolResult {
        let arguments = match args {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        };
        client
            .call_tool(CallToolRequestParam {
                name: name.into(),
                arguments,
            })
            .await
            .unwrap_or_else(|e| panic!("{name} call failed: {e}"))
    }

    fn text(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn assert_ok(result: &CallToolResult) {
        assert!(
            !result.is_error.unwrap_or(false),
            "tool returned error: {:?}",
            result.content
        );
    }

    /// Integration test for the MCP server using an in-memory transport.
    #[tokio::test]
    async fn test_mcp_server_integration() {
        let (client_io, server_io) = duplex(4096);
        let env = TestEnv::new().await;
        let config = env.config();

        let server_handle =
            tokio::spawn(async move { run_server(config, Io::Mock(server_io)).await });

        let client = ().serve(client_io).await.expect("Failed to create client");

        let result = call(&client, "open_add_form", serde_json::json!({})).await;
        assert_ok(&result);
        assert!(text(&result).contains("Add New Expense"));

        for (field, value) in [("name", "Coffee"), ("amount", "3.50")] {
            let result = call(
                &client,
                "set_field",
                serde_json::json!({ "field": field, "value": value }),
            )
            .await;
            assert_ok(&result);
        }

        let result = call(&client, "submit_form", serde_json::json!({})).await;
        assert_ok(&result);
        assert!(text(&result).contains("Total: ₱3.50"));

        // A validation failure is a tool error, not a protocol error.
        call(&client, "open_add_form", serde_json::json!({})).await;
        call(
            &client,
            "set_field",
            serde_json::json!({ "field": "amount", "value": "12" }),
        )
        .await;
        let result = call(&client, "submit_form", serde_json::json!({})).await;
        assert!(result.is_error.unwrap_or(false));
        assert!(text(&result).contains("Please enter an expense name"));

        call(
            &client,
            "set_field",
            serde_json::json!({ "field": "name", "value": "Lunch" }),
        )
        .await;
        let result = call(&client, "submit_form", serde_json::json!({})).await;
        assert_ok(&result);
        assert!(text(&result).contains("Total: ₱15.50"));

        let result = call(&client, "view_expense", serde_json::json!({ "id": "2" })).await;
        assert_ok(&result);
        assert!(text(&result).starts_with("Lunch"));

        let result = call(&client, "delete_expense", serde_json::json!({ "id": "2" })).await;
        assert_ok(&result);

        let result = call(&client, "get_state", serde_json::json!({})).await;
        assert_ok(&result);
        assert!(text(&result).contains("Total: ₱3.50"));

        drop(client);

        let server_result = tokio::time::timeout(std::time::Duration::from_secs(5), server_handle)
            .await
            .expect("Server timed out")
            .expect("Server task panicked");

        assert!(
            server_result.is_ok(),
            "Server returned error: {:?}",
            server_result
        );
    }

    #[tokio::test]
    async fn test_list_tools() {
        let (client_io, server_io) = duplex(4096);
        let env = TestEnv::new().await;
        let config = env.config();
        let _server_handle =
            tokio::spawn(async move { run_server(config, Io::Mock(server_io)).await });

        let client = ().serve(client_io).await.expect("Failed to create client");
        let tools = client
            .list_tools(Default::default())
            .await
            .expect("Failed to list tools");
        let mut names: Vec<String> = tools.tools.iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "cancel_form",
                "close_detail",
                "delete_expense",
                "edit_from_detail",
                "get_state",
                "get_total",
                "list_expenses",
                "open_add_form",
                "open_edit_form",
                "set_field",
                "submit_form",
                "view_expense",
            ]
        );
    }
}
