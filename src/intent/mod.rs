//! User intent classification
//!
//! Raw request text is mapped onto a coarse [`TaskType`] which decides the
//! agent sequence, plus a handful of extracted parameters that enrich skill
//! matching.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub mod parser;

pub use parser::IntentParser;

/// Coarse classification of what the user wants done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Scan,
    Fix,
    Build,
    Design,
    Test,
    Ship,
    Unknown,
}

impl TaskType {
    pub const ALL: [TaskType; 7] = [
        TaskType::Scan,
        TaskType::Fix,
        TaskType::Build,
        TaskType::Design,
        TaskType::Test,
        TaskType::Ship,
        TaskType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Scan => "scan",
            TaskType::Fix => "fix",
            TaskType::Build => "build",
            TaskType::Design => "design",
            TaskType::Test => "test",
            TaskType::Ship => "ship",
            TaskType::Unknown => "unknown",
        }
    }

    /// Tasks that change or release code should be confirmed before handing off
    pub fn requires_approval(&self) -> bool {
        matches!(self, TaskType::Build | TaskType::Ship)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                let valid: Vec<&str> = TaskType::ALL.iter().map(|t| t.as_str()).collect();
                eyre::eyre!("Unknown task type '{}' (expected one of: {})", s, valid.join(", "))
            })
    }
}

/// A classified user request. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub task_type: TaskType,
    /// Request text (command token stripped when one was given)
    pub raw_text: String,
    /// Explicit command token, e.g. `/build`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Extracted parameters keyed by name. Ordered so joins are deterministic.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl TaskDescriptor {
    /// Text used for skill matching: the raw text followed by every parameter value
    pub fn combined_text(&self) -> String {
        let mut parts = vec![self.raw_text.as_str()];
        parts.extend(self.params.values().map(String::as_str));
        parts.retain(|p| !p.trim().is_empty());
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_from_str() {
        assert_eq!("build".parse::<TaskType>().unwrap(), TaskType::Build);
        assert_eq!(" FIX ".parse::<TaskType>().unwrap(), TaskType::Fix);
        assert!("deploy".parse::<TaskType>().is_err());
    }

    #[test]
    fn test_requires_approval() {
        assert!(TaskType::Build.requires_approval());
        assert!(TaskType::Ship.requires_approval());
        assert!(!TaskType::Scan.requires_approval());
        assert!(!TaskType::Unknown.requires_approval());
    }

    #[test]
    fn test_combined_text_skips_empty_parts() {
        let task = TaskDescriptor {
            task_type: TaskType::Fix,
            raw_text: String::new(),
            command: None,
            params: BTreeMap::from([
                ("component".to_string(), "payment processing".to_string()),
                ("symptom".to_string(), "memory leak".to_string()),
            ]),
        };
        assert_eq!(task.combined_text(), "payment processing memory leak");
    }
}
