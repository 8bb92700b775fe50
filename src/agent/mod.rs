//! Agents and the pipelines that sequence them
//!
//! An agent is a named role with a fixed prompt. Pipelines decide which
//! agents run, in order, for each task type.

use serde::{Deserialize, Serialize};

pub mod loader;
pub mod pipeline;

pub use loader::AgentTable;
pub use pipeline::PipelineTable;

/// A role with its prompt text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub prompt_text: String,
}

#[cfg(test)]
impl AgentSpec {
    pub fn new(id: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            prompt_text: prompt_text.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
