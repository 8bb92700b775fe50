use colored::*;
use eyre::Result;
use serde::Serialize;

use super::request_text;
use crate::agent::PipelineTable;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::intent::{IntentParser, TaskDescriptor};

#[derive(Serialize)]
struct ParseReport<'a> {
    #[serde(flatten)]
    task: &'a TaskDescriptor,
    requires_approval: bool,
    pipeline: &'a [String],
}

/// Classify a request without touching the skill catalog
pub fn run(words: &[String], format: OutputFormat, config: &Config) -> Result<()> {
    let task = IntentParser::new().parse(&request_text(words));
    let pipelines = PipelineTable::with_overrides(&config.pipelines);
    let report = ParseReport {
        task: &task,
        requires_approval: task.task_type.requires_approval(),
        pipeline: pipelines.agents_for(task.task_type),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&report)?),
        OutputFormat::Text => {
            println!("{} {}", "Task:".bold(), task.task_type.to_string().cyan());
            if let Some(ref command) = task.command {
                println!("{} {}", "Command:".bold(), command);
            }
            println!("{} {:?}", "Text:".bold(), task.raw_text);
            if !task.params.is_empty() {
                println!("{}", "Parameters:".bold());
                for (key, value) in &task.params {
                    println!("  {}: {}", key, value);
                }
            }
            println!("{} {}", "Pipeline:".bold(), report.pipeline.join(" → "));
            if report.requires_approval {
                println!("{} requires approval", "⚠".yellow());
            }
        }
    }

    Ok(())
}
