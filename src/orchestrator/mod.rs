//! Pipeline orchestration
//!
//! A run is a straight line: parse the request once, look up the agent
//! sequence for its task type, and for each agent select skills and assemble
//! a context blob. Agents without a prompt are skipped. Nothing is retained
//! between runs, so one `Orchestrator` can serve concurrent runs.

use eyre::{Context, Result};
use serde::Serialize;

pub mod context;

use crate::agent::{AgentSpec, AgentTable, PipelineTable};
use crate::config::{Config, SelectionConfig};
use crate::error::ConfigError;
use crate::intent::{IntentParser, TaskDescriptor};
use crate::skill::{ScoredSkill, SkillCatalog, SkillLoader};
use context::{build_context, load_system_prompt};

/// One agent's turn: who, which skills, and the assembled blob
#[derive(Debug, Clone, Serialize)]
pub struct Stage {
    pub agent: AgentSpec,
    pub skills: Vec<ScoredSkill>,
    pub context: String,
}

/// Everything produced for one request
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub task: TaskDescriptor,
    /// Whether the task should be confirmed before it is handed off
    pub requires_approval: bool,
    pub stages: Vec<Stage>,
    /// Agent ids in the pipeline that had no registered prompt
    pub skipped: Vec<String>,
}

impl PipelineRun {
    /// Context blobs in pipeline order
    pub fn contexts(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.context.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    parser: IntentParser,
    loader: SkillLoader,
    agents: AgentTable,
    pipelines: PipelineTable,
    system_prompt: String,
}

impl Orchestrator {
    /// Fails when the catalog is empty, since every agent would silently run without skills
    pub fn new(
        catalog: SkillCatalog,
        agents: AgentTable,
        pipelines: PipelineTable,
        system_prompt: impl Into<String>,
        selection: SelectionConfig,
    ) -> Result<Self, ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        Ok(Self {
            parser: IntentParser::new(),
            loader: SkillLoader::new(catalog, selection),
            agents,
            pipelines,
            system_prompt: system_prompt.into(),
        })
    }

    /// Load catalog, agents and system prompt from the configured paths
    pub fn from_config(config: &Config) -> Result<Self> {
        let skills_dir = Config::expand_path(&config.paths.skills);
        let agents_dir = Config::expand_path(&config.paths.agents);
        let system_prompt_path = Config::expand_path(&config.paths.system_prompt);

        let catalog = SkillCatalog::load(&skills_dir)?;
        let agents = AgentTable::load(&agents_dir).context("Failed to load agents")?;
        let system_prompt = load_system_prompt(&system_prompt_path);

        Ok(Self::new(
            catalog,
            agents,
            PipelineTable::with_overrides(&config.pipelines),
            system_prompt,
            config.selection,
        )?)
    }

    /// Same orchestrator with different selection limits
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.loader = SkillLoader::new(self.loader.catalog().clone(), selection);
        self
    }

    pub fn loader(&self) -> &SkillLoader {
        &self.loader
    }

    pub fn parse(&self, text: &str) -> TaskDescriptor {
        self.parser.parse(text)
    }

    /// Parse `text` and assemble one context per pipeline agent
    pub fn run(&self, text: &str) -> PipelineRun {
        self.run_task(self.parse(text))
    }

    pub fn run_task(&self, task: TaskDescriptor) -> PipelineRun {
        let pipeline = self.pipelines.agents_for(task.task_type);
        log::info!("Task {} -> pipeline [{}]", task.task_type, pipeline.join(", "));

        let mut stages: Vec<Stage> = Vec::with_capacity(pipeline.len());
        let mut skipped = Vec::new();

        for agent_id in pipeline {
            let Some(agent) = self.agents.get(agent_id) else {
                log::warn!("No prompt registered for agent '{}', skipping", agent_id);
                skipped.push(agent_id.clone());
                continue;
            };

            let skills = self.loader.select(&task, agent_id);
            if skills.is_empty() {
                log::info!("Agent {}: no skills selected", agent_id);
            } else {
                let names: Vec<&str> = skills.iter().map(|s| s.skill.name.as_str()).collect();
                log::info!("Agent {}: skills [{}]", agent_id, names.join(", "));
            }

            let context = build_context(&self.system_prompt, agent, &task, &skills, &stages);
            stages.push(Stage {
                agent: agent.clone(),
                skills,
                context,
            });
        }

        PipelineRun {
            requires_approval: task.task_type.requires_approval(),
            task,
            stages,
            skipped,
        }
    }
}
