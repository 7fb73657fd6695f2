//! Tool registry for dispatching model-selected function calls

use crate::Tool;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry mapping function names to tools
///
/// Populated once at startup and only read afterwards. Registering a tool
/// under an already-used name replaces the previous entry.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(|e| e.into_inner());
        tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(|e| e.into_inner());
        tools.get(name).cloned()
    }

    /// All registered tools, for building the function list offered to the
    /// model
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(|e| e.into_inner());
        tools.values().cloned().collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(|e| e.into_inner());
        tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
