//! Skill catalog commands

use colored::*;
use eyre::{Context, Result};
use serde::Serialize;

use crate::cli::{OutputFormat, SkillAction};
use crate::config::Config;
use crate::skill::{SkillCatalog, SkillRecord};

/// Run a skill subcommand
pub fn run(action: SkillAction, config: &Config) -> Result<()> {
    match action {
        SkillAction::List { format } => list_skills(OutputFormat::resolve(format), config),
        SkillAction::Info { id, format } => show_skill(&id, OutputFormat::resolve(format), config),
    }
}

/// Serializable skill info for JSON/YAML output
#[derive(Serialize)]
struct SkillInfo {
    id: String,
    name: String,
    description: String,
    keywords: Vec<String>,
    well_formed: bool,
}

impl From<&SkillRecord> for SkillInfo {
    fn from(skill: &SkillRecord) -> Self {
        Self {
            id: skill.id.clone(),
            name: skill.name.clone(),
            description: skill.description.clone(),
            keywords: skill.keywords.clone(),
            well_formed: skill.is_well_formed(),
        }
    }
}

fn load_catalog(config: &Config) -> Result<SkillCatalog> {
    let skills_dir = Config::expand_path(&config.paths.skills);
    SkillCatalog::load(&skills_dir).context("Failed to load skill catalog")
}

fn list_skills(format: OutputFormat, config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let infos: Vec<SkillInfo> = catalog.iter().map(SkillInfo::from).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&infos)?),
        OutputFormat::Text => {
            if infos.is_empty() {
                println!("No skills found.");
                println!();
                println!("Add a skill as {}", "<skills>/<id>/SKILL.md".cyan());
                return Ok(());
            }

            for info in &infos {
                let marker = if info.well_formed { "●".green() } else { "✗".red() };
                println!("  {} {} - {}", marker, info.name.bold(), info.description);
                if !info.keywords.is_empty() {
                    println!("    keywords: {}", info.keywords.join(", ").dimmed());
                }
            }
            println!();
            println!("Total: {} skill(s)", infos.len());
        }
    }

    Ok(())
}

fn show_skill(id: &str, format: OutputFormat, config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let skill = catalog
        .get(id)
        .ok_or_else(|| eyre::eyre!("Skill '{}' not found", id))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(skill)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(skill)?),
        OutputFormat::Text => {
            println!("{}", skill.name.bold());
            println!("  id: {}", skill.id);
            println!("  description: {}", skill.description);
            println!("  keywords: {}", skill.keywords.join(", "));
            if skill.agent_affinity.is_empty() {
                println!("  affinity: -");
            } else {
                println!("  affinity:");
                for (agent, weight) in &skill.agent_affinity {
                    println!("    {}: {}", agent, weight);
                }
            }
            if let Some(ref path) = skill.path {
                println!("  path: {}", path.display());
            }
            if !skill.is_well_formed() {
                println!("  {} malformed record, never selected", "✗".red());
            }
        }
    }

    Ok(())
}
