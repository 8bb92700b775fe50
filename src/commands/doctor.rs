//! Diagnose vibecode setup issues

use colored::*;
use eyre::Result;

use crate::agent::{AgentTable, PipelineTable};
use crate::config::Config;
use crate::skill::SkillCatalog;

pub fn run(config: &Config) -> Result<()> {
    println!("{}", "vibecode Doctor".bold());
    println!("{}", "═".repeat(50));
    println!();

    let mut issues = 0;

    match config.source {
        Some(ref path) => println!("{} Config file: {}", "✓".green(), path.display()),
        None => println!(
            "{} No config file found under {} (defaults in use)",
            "⚠".yellow(),
            Config::vibecode_dir().display()
        ),
    }

    // Skill catalog is the only hard requirement
    let skills_dir = Config::expand_path(&config.paths.skills);
    match SkillCatalog::load(&skills_dir) {
        Ok(catalog) if catalog.is_empty() => {
            println!("{} Skill catalog is empty: {}", "✗".red(), skills_dir.display());
            issues += 1;
        }
        Ok(catalog) => {
            println!(
                "{} Skill catalog: {} ({} skills)",
                "✓".green(),
                skills_dir.display(),
                catalog.len()
            );
            for skill in catalog.iter().filter(|s| !s.is_well_formed()) {
                println!("  {} malformed skill '{}' will never be selected", "⚠".yellow(), skill.id);
            }
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            issues += 1;
        }
    }

    let system_prompt = Config::expand_path(&config.paths.system_prompt);
    if system_prompt.is_file() {
        println!("{} System prompt: {}", "✓".green(), system_prompt.display());
    } else {
        println!(
            "{} System prompt missing: {} (built-in default in use)",
            "⚠".yellow(),
            system_prompt.display()
        );
    }

    let agents_dir = Config::expand_path(&config.paths.agents);
    let agents = AgentTable::load(&agents_dir)?;
    if agents.is_empty() {
        println!("{} No agents registered in {}", "✗".red(), agents_dir.display());
        issues += 1;
    } else {
        println!("{} Agents: {} ({} registered)", "✓".green(), agents_dir.display(), agents.len());
    }

    println!();
    println!("{}", "Pipelines:".bold());
    let pipelines = PipelineTable::with_overrides(&config.pipelines);
    for (task_type, ids) in pipelines.iter() {
        let missing: Vec<&str> = ids
            .iter()
            .filter(|id| agents.get(id).is_none())
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            println!("  {} {}: {}", "✓".green(), task_type, ids.join(" → "));
        } else {
            println!(
                "  {} {}: {} (no prompt for {}, will be skipped)",
                "⚠".yellow(),
                task_type,
                ids.join(" → "),
                missing.join(", ")
            );
        }
    }

    println!();
    if issues == 0 {
        println!("{} No blocking issues found", "✓".green());
    } else {
        println!("{} {} blocking issue(s) found", "✗".red(), issues);
    }

    Ok(())
}
