pub mod agent;
pub mod completions;
pub mod config;
pub mod doctor;
pub mod parse;
pub mod run;
pub mod select;
pub mod skill;

use crate::cli::SelectionArgs;
use crate::config::SelectionConfig;

/// Rejoin trailing CLI words into the request text
pub fn request_text(words: &[String]) -> String {
    words.join(" ")
}

/// Apply command-line overrides to the configured selection limits
pub fn selection_with(base: SelectionConfig, args: SelectionArgs) -> SelectionConfig {
    SelectionConfig {
        max_skills: args.max_skills.unwrap_or(base.max_skills),
        min_score: args.min_score.unwrap_or(base.min_score),
        ..base
    }
}
