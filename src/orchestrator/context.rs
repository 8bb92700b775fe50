//! Context blob assembly
//!
//! One blob per pipeline stage: system prompt, agent prompt, selected skill
//! bodies, the task, and a summary of the stages that ran before it.

use std::fs;
use std::path::Path;

use super::Stage;
use crate::agent::AgentSpec;
use crate::intent::TaskDescriptor;
use crate::skill::ScoredSkill;

const SECTION_RULE_WIDTH: usize = 60;
const SKILL_RULE_WIDTH: usize = 40;

/// Used when no system prompt file is configured or readable
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are coordinating a pipeline of specialised agents working on one task.
Act as the agent named below. Follow its instructions and apply the selected
skills where they are relevant. Keep your output focused on this stage; later
agents build on what you produce.";

/// Read the system prompt, falling back to the built-in one
pub fn load_system_prompt(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => {
            log::warn!("System prompt at {} is empty, using default", path.display());
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
        Err(e) => {
            log::warn!("Failed to read system prompt {}: {}, using default", path.display(), e);
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }
}

/// Concatenate everything one agent needs into a single blob
pub fn build_context(
    system_prompt: &str,
    agent: &AgentSpec,
    task: &TaskDescriptor,
    skills: &[ScoredSkill],
    previous: &[Stage],
) -> String {
    let rule = format!("\n{}\n", "=".repeat(SECTION_RULE_WIDTH));
    let mut lines = vec![
        "# SYSTEM ORCHESTRATION".to_string(),
        system_prompt.trim().to_string(),
        rule.clone(),
        format!("# AGENT: {}", agent.name),
        agent.prompt_text.trim().to_string(),
        rule.clone(),
    ];

    if !skills.is_empty() {
        lines.push("# SELECTED SKILLS".to_string());
        for scored in skills {
            lines.push(format!("\n## Skill: {}", scored.skill.name));
            lines.push(scored.skill.content.trim().to_string());
            lines.push(format!("\n{}\n", "-".repeat(SKILL_RULE_WIDTH)));
        }
    }

    lines.push("# CURRENT TASK".to_string());
    lines.push(format!("Task type: {}", task.task_type));
    lines.push(format!("Query: {}", task.raw_text));
    if !task.params.is_empty() {
        lines.push("Parameters:".to_string());
        for (key, value) in &task.params {
            lines.push(format!("- {}: {}", key, value));
        }
    }
    lines.push(rule.clone());

    if !previous.is_empty() {
        lines.push("# PREVIOUS AGENT RESULTS".to_string());
        for stage in previous {
            lines.push(format!("- {}: prepared", stage.agent.name));
            if !stage.skills.is_empty() {
                let names: Vec<&str> = stage.skills.iter().map(|s| s.skill.name.as_str()).collect();
                lines.push(format!("  Skills: {}", names.join(", ")));
            }
        }
        lines.push(rule);
    }

    lines.join("\n")
}
