//! Tool registry for managing available tools

use crate::{Tool, ToolSpec};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Registry for managing tools
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
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&self, tool: Arc<dyn Tool>) {
        match self.tools.write() {
            Ok(mut tools) => {
                tools.insert(tool.name().to_string(), tool);
            }
            Err(_) => warn!("tool registry lock poisoned, dropping registration"),
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().ok()?.get(name).cloned()
    }

    /// List all registered tools
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools
            .read()
            .map(|tools| tools.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Build provider specifications for every registered tool
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.list_tools()
            .iter()
            .map(|tool| ToolSpec::for_tool(tool.as_ref()))
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.read().map(|tools| tools.len()).unwrap_or(0)
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
