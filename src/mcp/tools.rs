//! The MCP tools. Each tool locks the shared session, performs one command and returns its `Out`.

use crate::commands;
use crate::form::Field;
use crate::mcp::mcp_utils::tool_result;
use crate::mcp::ExpenseServer;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use rmcp::{tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

/// Parameters for tools that act on one expense.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "ExpenseRefParams")]
pub struct ExpenseRefParams {
    /// The id of the expense, or its 1-based position in the list returned by `list_expenses`.
    pub id: String,
}

/// Parameters for the delete_expense tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "DeleteExpenseParams")]
pub struct DeleteExpenseParams {
    /// The id of the expense, or its 1-based position in the list returned by `list_expenses`.
    /// Leave this out to delete the expense that is open in the detail view.
    #[serde(default)]
    pub id: Option<String>,
}

/// Parameters for the set_field tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "SetFieldParams")]
pub struct SetFieldParams {
    /// Which form field to set: 'name', 'amount' or 'description'.
    pub field: Field,

    /// The text to put in the field. It replaces whatever was there.
    #[serde(default)]
    pub value: String,
}

#[tool_router(vis = "pub(super)")]
impl ExpenseServer {
    /// List every expense, in the order they were added, under the running total.
    ///
    /// Returns a readable list and a JSON array of the expense objects, each with its `id`,
    /// `name`, `amount`, `description` and `created_at`.
    #[tool]
    async fn list_expenses(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        tool_result(commands::list_expenses(&session, &self.format))
    }

    /// Get the sum of all expense amounts. Amounts that are not numbers count as zero.
    #[tool]
    async fn get_total(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        tool_result(commands::total(&session, &self.format))
    }

    /// Open a blank form for a new expense. Only allowed when the screen is idle.
    #[tool]
    async fn open_add_form(&self) -> Result<CallToolResult, McpError> {
        info!("MCP: open_add_form called");
        let mut session = self.session.lock().await;
        tool_result(commands::open_add_form(&mut session))
    }

    /// Open the form filled in from an existing expense. Submitting it updates that expense in
    /// place. Only allowed when the screen is idle.
    #[tool]
    async fn open_edit_form(
        &self,
        Parameters(params): Parameters<ExpenseRefParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: open_edit_form called with id={}", params.id);
        let mut session = self.session.lock().await;
        tool_result(commands::open_edit_form(&mut session, &params.id))
    }

    /// Set one field of the open form. Nothing is validated until `submit_form`.
    #[tool]
    async fn set_field(
        &self,
        Parameters(params): Parameters<SetFieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        tool_result(commands::set_field(&mut session, params.field, params.value))
    }

    /// Save the open form: adds a new expense or updates the one being edited, then closes the
    /// form.
    ///
    /// # Errors
    ///
    /// If the name or the amount is blank this returns an error, nothing is saved and the form
    /// stays open with its contents, so it can be corrected and submitted again.
    #[tool]
    async fn submit_form(&self) -> Result<CallToolResult, McpError> {
        info!("MCP: submit_form called");
        let mut session = self.session.lock().await;
        tool_result(commands::submit_form(&mut session, &self.format))
    }

    /// Close the open form without saving.
    #[tool]
    async fn cancel_form(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        tool_result(commands::cancel_form(&mut session))
    }

    /// Open the detail view of one expense: its name, amount, description and the date it was
    /// added. Only allowed when the screen is idle.
    #[tool]
    async fn view_expense(
        &self,
        Parameters(params): Parameters<ExpenseRefParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        tool_result(commands::view_expense(&mut session, &params.id, &self.format))
    }

    /// Close the detail view.
    #[tool]
    async fn close_detail(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        tool_result(commands::close_detail(&mut session))
    }

    /// Close the detail view and open the form filled in from the expense that was being viewed.
    #[tool]
    async fn edit_from_detail(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        tool_result(commands::edit_from_detail(&mut session))
    }

    /// Delete an expense and close any open form or detail view. Deleting an expense that does
    /// not exist changes nothing, leaves the screen as it was and is not an error.
    ///
    /// # Example
    ///
    /// ```json
    /// { "id": "2" }
    /// ```
    #[tool]
    async fn delete_expense(
        &self,
        Parameters(params): Parameters<DeleteExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("MCP: delete_expense called with id={:?}", params.id);
        let mut session = self.session.lock().await;
        let out = match params.id.as_deref() {
            Some(id) => commands::delete_expense(&mut session, id, &self.format),
            None => commands::delete_selected(&mut session, &self.format),
        };
        tool_result(out)
    }

    /// Describe what is currently on screen: the list and total, the open form, or the detail
    /// view. The JSON structure includes `screen`, which is one of `idle`, `composing` or
    /// `viewing`.
    #[tool]
    async fn get_state(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        tool_result(commands::state(&session, &self.format))
    }
}
