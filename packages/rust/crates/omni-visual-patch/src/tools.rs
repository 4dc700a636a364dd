//! Tool registry advertised by `GET /tools`.

use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;

use omni_types::EditInstruction;

/// Name of the single edit tool.
pub const EDIT_INSTRUCTION_TOOL: &str = "edit_instruction";

const EDIT_INSTRUCTION_DESCRIPTION: &str =
    "Apply Tailwind or CSS style changes to the codebase, with robust mapping and logging";

#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema generated from [`EditInstruction`].
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolSpec>,
}

#[must_use]
pub fn tool_registry() -> Vec<ToolSpec> {
    let input_schema = serde_json::to_value(schema_for!(EditInstruction)).unwrap_or_default();
    vec![ToolSpec {
        name: EDIT_INSTRUCTION_TOOL,
        description: EDIT_INSTRUCTION_DESCRIPTION,
        input_schema,
    }]
}
