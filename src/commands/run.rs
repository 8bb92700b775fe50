//! Full pipeline: parse, select, assemble

use colored::*;
use eyre::Result;
use serde::Serialize;

use super::{request_text, selection_with};
use crate::cli::{OutputFormat, SelectionArgs};
use crate::config::Config;
use crate::intent::TaskDescriptor;
use crate::orchestrator::{Orchestrator, PipelineRun};

#[derive(Serialize)]
struct SkillSummary {
    id: String,
    name: String,
    score: f64,
}

#[derive(Serialize)]
struct StageReport<'a> {
    agent_id: &'a str,
    agent_name: &'a str,
    skills: Vec<SkillSummary>,
    context_chars: usize,
    context: &'a str,
}

#[derive(Serialize)]
struct RunReport<'a> {
    generated: String,
    task: &'a TaskDescriptor,
    requires_approval: bool,
    skipped: &'a [String],
    stages: Vec<StageReport<'a>>,
}

impl<'a> From<&'a PipelineRun> for RunReport<'a> {
    fn from(run: &'a PipelineRun) -> Self {
        Self {
            generated: chrono::Local::now().to_rfc3339(),
            task: &run.task,
            requires_approval: run.requires_approval,
            skipped: &run.skipped,
            stages: run
                .stages
                .iter()
                .map(|stage| StageReport {
                    agent_id: &stage.agent.id,
                    agent_name: &stage.agent.name,
                    skills: stage
                        .skills
                        .iter()
                        .map(|s| SkillSummary {
                            id: s.skill.id.clone(),
                            name: s.skill.name.clone(),
                            score: s.score,
                        })
                        .collect(),
                    context_chars: stage.context.chars().count(),
                    context: &stage.context,
                })
                .collect(),
        }
    }
}

pub fn run(words: &[String], selection: SelectionArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let text = request_text(words);
    let orchestrator =
        Orchestrator::from_config(config)?.with_selection(selection_with(config.selection, selection));

    let run = orchestrator.run(&text);
    let total_chars: usize = run.contexts().iter().map(|c| c.len()).sum();
    log::info!(
        "Run complete: {} contexts ({} bytes), {} skipped",
        run.stages.len(),
        total_chars,
        run.skipped.len()
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&RunReport::from(&run))?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&RunReport::from(&run))?),
        OutputFormat::Text => print_text(&run),
    }

    Ok(())
}

fn print_text(run: &PipelineRun) {
    println!("{} {}", "Task:".bold(), run.task.task_type.to_string().cyan());
    if !run.task.params.is_empty() {
        for (key, value) in &run.task.params {
            println!("  {}: {}", key, value.dimmed());
        }
    }
    let agents: Vec<&str> = run.stages.iter().map(|s| s.agent.name.as_str()).collect();
    println!("{} {}", "Pipeline:".bold(), agents.join(" → "));

    if run.requires_approval {
        println!(
            "{} This task changes or releases code; confirm before handing it to the assistant.",
            "⚠".yellow()
        );
    }
    for agent_id in &run.skipped {
        println!("{} No prompt for agent '{}', skipped", "⚠".yellow(), agent_id);
    }

    let total = run.stages.len();
    for (i, stage) in run.stages.iter().enumerate() {
        println!();
        println!("{}", "─".repeat(60));
        println!("{} Step {}/{}: {}", "→".blue(), i + 1, total, stage.agent.name.bold());

        if stage.skills.is_empty() {
            println!("  {} No specific skills for this agent", "ℹ".dimmed());
        } else {
            for scored in &stage.skills {
                println!("  {} {} (score: {:.2})", "•".green(), scored.skill.name, scored.score);
            }
        }
        println!("{}", "─".repeat(60));
        println!("{}", stage.context);
    }
}
