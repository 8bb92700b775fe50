use colored::*;
use eyre::Result;
use serde::Serialize;

use super::{request_text, selection_with};
use crate::cli::{OutputFormat, SelectionArgs};
use crate::config::Config;
use crate::orchestrator::Orchestrator;
use crate::skill::ScoreFactors;

#[derive(Serialize)]
struct SelectedSkill {
    id: String,
    name: String,
    score: f64,
    factors: ScoreFactors,
}

pub fn run(
    agent: &str,
    words: &[String],
    selection: SelectionArgs,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    let orchestrator =
        Orchestrator::from_config(config)?.with_selection(selection_with(config.selection, selection));
    let task = orchestrator.parse(&request_text(words));
    let selected = orchestrator.loader().select(&task, agent);

    let rows: Vec<SelectedSkill> = selected
        .iter()
        .map(|s| SelectedSkill {
            id: s.skill.id.clone(),
            name: s.skill.name.clone(),
            score: s.score,
            factors: s.factors,
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&rows)?),
        OutputFormat::Text => {
            println!(
                "{} {} for agent {}",
                "Task:".bold(),
                task.task_type.to_string().cyan(),
                agent.green()
            );
            if rows.is_empty() {
                println!("  No skills cleared the threshold");
            }
            for row in &rows {
                println!(
                    "  {} {:30} {:.2}  (name {:.2}, desc {:.2}, kw {:.2}, affinity {:.2})",
                    "•".green(),
                    row.name,
                    row.score,
                    row.factors.name,
                    row.factors.description,
                    row.factors.keyword,
                    row.factors.affinity
                );
            }
        }
    }

    Ok(())
}
