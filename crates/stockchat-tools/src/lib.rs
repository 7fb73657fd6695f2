//! Tool framework for stockchat
//!
//! Each invokable function is one [`Tool`] implementation: name,
//! description, parameter schema, and the callable itself in a single
//! declarative unit. [`ToolRegistry`] is the process-lifetime name map the
//! orchestrator dispatches through.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, ToolError, ToolResult};
