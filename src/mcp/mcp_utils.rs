use crate::commands::Out;
use crate::error::ExpenseError;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error};

pub(super) fn to_content<T>(out: Out<T>) -> Vec<Content>
where
    T: Debug + Clone + Serialize,
{
    let mut content = vec![Content::text(out.message())];
    if let Some(object) = out.structure() {
        match Content::json(object) {
            Ok(json) => content.push(json),
            Err(e) => error!("Unable to serialize JSON output: {e}"),
        };
    }
    content
}

/// Converts a command result into a tool result. Command failures, including validation errors,
/// are reported to the client as tool errors rather than protocol errors.
pub(super) fn tool_result<T>(result: crate::Result<Out<T>>) -> Result<CallToolResult, ErrorData>
where
    T: Debug + Clone + Serialize,
{
    Ok(match result {
        Ok(out) => CallToolResult::success(to_content(out)),
        Err(e) => {
            match e.downcast_ref::<ExpenseError>() {
                Some(expense_error) => debug!("Tool call rejected: {expense_error:?}"),
                None => error!("Tool call failed: {e:#}"),
            }
            CallToolResult::error(vec![Content::text(e.to_string())])
        }
    })
}
