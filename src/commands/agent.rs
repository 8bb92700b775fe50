//! Agent table commands

use colored::*;
use eyre::{Context, Result};
use serde::Serialize;

use crate::agent::pipeline::ROLES;
use crate::agent::{AgentTable, PipelineTable};
use crate::cli::{AgentAction, OutputFormat};
use crate::config::Config;

pub fn run(action: AgentAction, config: &Config) -> Result<()> {
    match action {
        AgentAction::List { format } => list_agents(OutputFormat::resolve(format), config),
    }
}

#[derive(Serialize)]
struct AgentSummary {
    id: String,
    name: String,
    description: String,
    registered: bool,
    pipelines: Vec<String>,
}

fn list_agents(format: OutputFormat, config: &Config) -> Result<()> {
    let agents_dir = Config::expand_path(&config.paths.agents);
    let table = AgentTable::load(&agents_dir).context("Failed to load agents")?;
    let pipelines = PipelineTable::with_overrides(&config.pipelines);

    let uses = |id: &str| -> Vec<String> {
        pipelines
            .iter()
            .filter(|(_, agents)| agents.iter().any(|a| a == id))
            .map(|(task_type, _)| task_type.to_string())
            .collect()
    };

    let mut summaries: Vec<AgentSummary> = table
        .iter()
        .map(|a| AgentSummary {
            id: a.id.clone(),
            name: a.name.clone(),
            description: a.description.clone(),
            registered: true,
            pipelines: uses(&a.id),
        })
        .collect();

    // Built-in roles and pipeline agents that have no prompt file
    let referenced = ROLES
        .iter()
        .map(|r| r.to_string())
        .chain(pipelines.iter().flat_map(|(_, agents)| agents.iter().cloned()));
    for id in referenced {
        if table.get(&id).is_none() && !summaries.iter().any(|s| s.id == id) {
            summaries.push(AgentSummary {
                pipelines: uses(&id),
                name: id.clone(),
                id,
                description: String::new(),
                registered: false,
            });
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&summaries)?),
        OutputFormat::Text => {
            println!("{}", "Agents:".bold());
            println!();
            for agent in &summaries {
                if agent.registered {
                    println!("  {} {} ({})", "●".green(), agent.name.bold(), agent.id);
                    if !agent.description.is_empty() {
                        println!("    {}", agent.description.dimmed());
                    }
                } else {
                    println!("  {} {} (no prompt in {})", "✗".red(), agent.id.bold(), agents_dir.display());
                }
                if !agent.pipelines.is_empty() {
                    println!("    Pipelines: {}", agent.pipelines.join(", ").cyan());
                }
            }
        }
    }

    Ok(())
}
