use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "vibecode Configuration".bold());
            println!();

            println!("{}:", "paths".cyan());
            println!("  skills: {}", config.paths.skills.display());
            println!("  agents: {}", config.paths.agents.display());
            println!("  system_prompt: {}", config.paths.system_prompt.display());
            println!();

            let s = &config.selection;
            println!("{}:", "selection".cyan());
            println!("  max_skills: {}", s.max_skills);
            println!("  min_score: {}", s.min_score);
            println!(
                "  weights: name={} description={} keyword={} affinity={}",
                s.weights.name, s.weights.description, s.weights.keyword, s.weights.affinity
            );

            if !config.pipelines.is_empty() {
                println!();
                println!("{}:", "pipelines".cyan());
                for (task_type, agents) in &config.pipelines {
                    println!("  {}: {}", task_type, agents.join(", "));
                }
            }
            println!();
            println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());
        }
    }

    Ok(())
}

fn lookup(key: &str, config: &Config) -> Option<String> {
    let s = &config.selection;
    match key {
        "paths.skills" => Some(config.paths.skills.display().to_string()),
        "paths.agents" => Some(config.paths.agents.display().to_string()),
        "paths.system_prompt" => Some(config.paths.system_prompt.display().to_string()),
        "selection.max_skills" => Some(s.max_skills.to_string()),
        "selection.min_score" => Some(s.min_score.to_string()),
        "selection.weights.name" => Some(s.weights.name.to_string()),
        "selection.weights.description" => Some(s.weights.description.to_string()),
        "selection.weights.keyword" => Some(s.weights.keyword.to_string()),
        "selection.weights.affinity" => Some(s.weights.affinity.to_string()),
        "log_level" | "log-level" => Some(config.log_level.as_filter().to_string()),
        _ => None,
    }
}

fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(key, config) {
        Some(v) => println!("{}", v),
        None => eyre::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_keys() {
        let config = Config::default();
        assert_eq!(lookup("selection.max_skills", &config).as_deref(), Some("3"));
        assert_eq!(lookup("selection.min_score", &config).as_deref(), Some("0.1"));
        assert_eq!(lookup("log-level", &config).as_deref(), Some("info"));
        assert!(lookup("nope", &config).is_none());
    }
}
