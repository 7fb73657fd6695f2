//! Function schema types for model-side tool declarations

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description of a function the model may call
///
/// Serializes to the `{name, description, parameters}` object the
/// chat-completions API expects inside a `{"type": "function"}` wrapper.
/// Built once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name (must match the tool registered under it)
    pub name: String,

    /// Description of what the function does
    pub description: String,

    /// JSON Schema for the function's parameters
    pub parameters: Value,
}

impl FunctionSpec {
    /// Create a new function spec
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn function_spec_serializes_flat() {
        let spec = FunctionSpec::new(
            "get_stock_price",
            "Gets the latest stock price.",
            json!({
                "type": "object",
                "properties": {"ticker": {"type": "string"}},
                "required": ["ticker"],
            }),
        );

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["name"], "get_stock_price");
        assert_eq!(value["description"], "Gets the latest stock price.");
        assert_eq!(value["parameters"]["type"], "object");
        assert_eq!(value["parameters"]["required"][0], "ticker");
    }
}
