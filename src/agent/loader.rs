//! Agent prompt table loading

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::AgentSpec;

/// On-disk agent file (`<agents_dir>/<id>.yaml`)
#[derive(Debug, Clone, Deserialize)]
struct AgentFile {
    /// Defaults to the file stem
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    prompt: Option<String>,
}

/// Agent id -> prompt, read-only after load
#[derive(Debug, Clone, Default)]
pub struct AgentTable {
    agents: IndexMap<String, AgentSpec>,
}

impl AgentTable {
    pub fn from_specs<I: IntoIterator<Item = AgentSpec>>(specs: I) -> Self {
        let mut agents = IndexMap::new();
        for spec in specs {
            if spec.prompt_text.trim().is_empty() {
                log::warn!("Agent '{}' has no prompt text, ignoring", spec.id);
                continue;
            }
            agents.entry(spec.id.clone()).or_insert(spec);
        }
        Self { agents }
    }

    /// Load all agents from the agents directory. A missing directory yields an empty table.
    pub fn load(agents_dir: &Path) -> Result<Self> {
        let mut specs = Vec::new();

        if !agents_dir.exists() {
            log::warn!("Agents directory does not exist: {}", agents_dir.display());
            return Ok(Self::default());
        }

        let entries = fs::read_dir(agents_dir)
            .with_context(|| format!("Failed to read agents directory: {}", agents_dir.display()))?;

        let mut paths: Vec<_> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().map(|e| e == "yaml" || e == "yml").unwrap_or(false))
            .collect();
        // Sort by name for consistent ordering
        paths.sort();

        for path in paths {
            match load_agent(&path) {
                Ok(spec) => specs.push(spec),
                Err(e) => {
                    log::warn!("Failed to load agent from {}: {:#}", path.display(), e);
                }
            }
        }

        let table = Self::from_specs(specs);
        log::info!("Loaded {} agents from {}", table.len(), agents_dir.display());
        Ok(table)
    }

    pub fn get(&self, id: &str) -> Option<&AgentSpec> {
        self.agents.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentSpec> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Load a single agent from a file
fn load_agent(path: &Path) -> Result<AgentSpec> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read agent file: {}", path.display()))?;

    let file: AgentFile =
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse agent file: {}", path.display()))?;

    let id = match file.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| eyre::eyre!("Cannot derive agent id from {}", path.display()))?,
    };

    Ok(AgentSpec {
        name: file.name.unwrap_or_else(|| id.clone()),
        id,
        description: file.description,
        prompt_text: file.prompt.unwrap_or_default(),
    })
}
