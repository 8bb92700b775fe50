//! Command and natural-language intent parsing
//!
//! Two paths:
//! - Slash commands (`/build user auth`) map directly to a task type.
//! - Anything else is classified by the first keyword rule that matches.
//!
//! Parsing is total: text that matches nothing becomes [`TaskType::Unknown`]
//! with the input preserved verbatim.

use lazy_regex::{regex, regex_captures};
use std::collections::BTreeMap;

use super::{TaskDescriptor, TaskType};

/// Explicit command tokens
const COMMANDS: &[(&str, TaskType)] = &[
    ("/scan", TaskType::Scan),
    ("/fix", TaskType::Fix),
    ("/build", TaskType::Build),
    ("/design", TaskType::Design),
    ("/test", TaskType::Test),
    ("/ship", TaskType::Ship),
];

/// Keyword rules, evaluated in order. First rule with a matching word wins.
const KEYWORD_RULES: &[(TaskType, &[&str])] = &[
    (
        TaskType::Fix,
        &["fix", "bug", "bugs", "broken", "crash", "crashes", "error", "errors", "leak", "debug", "repair"],
    ),
    (TaskType::Test, &["test", "tests", "testing", "coverage", "unittest", "e2e"]),
    (TaskType::Ship, &["ship", "deploy", "release", "publish", "launch"]),
    (TaskType::Design, &["design", "ui", "ux", "layout", "mockup", "wireframe", "redesign"]),
    (TaskType::Scan, &["scan", "audit", "analyze", "analyse", "inspect", "review"]),
    (
        TaskType::Build,
        &["build", "create", "add", "implement", "make", "develop", "feature", "generate"],
    ),
];

/// Verbs stripped from the front of a request when extracting its subject
const LEAD_VERBS: &[&str] = &[
    "scan", "audit", "analyze", "analyse", "inspect", "review", "fix", "repair", "debug", "build", "create", "add",
    "implement", "make", "develop", "generate", "design", "redesign", "test", "ship", "deploy", "release",
    "publish", "launch",
];

/// Stateless intent parser
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentParser;

impl IntentParser {
    pub fn new() -> Self {
        Self
    }

    /// Classify `text` into a task descriptor. Never fails.
    pub fn parse(&self, text: &str) -> TaskDescriptor {
        if let Some((command, task_type, rest)) = split_command(text) {
            log::debug!("Matched command {} -> {}", command, task_type);
            return TaskDescriptor {
                task_type,
                raw_text: rest.to_string(),
                command: Some(command.to_string()),
                params: extract_params(task_type, rest),
            };
        }

        let task_type = classify(text);
        log::debug!("Classified {:?} -> {}", text, task_type);

        TaskDescriptor {
            task_type,
            raw_text: text.to_string(),
            command: None,
            params: extract_params(task_type, text),
        }
    }
}

/// Split a leading command token off `text`. The token must stand alone.
fn split_command(text: &str) -> Option<(&'static str, TaskType, &str)> {
    let trimmed = text.trim_start();
    let token_end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let token = trimmed[..token_end].to_lowercase();

    COMMANDS
        .iter()
        .find(|(cmd, _)| *cmd == token)
        .map(|(cmd, task_type)| (*cmd, *task_type, trimmed[token_end..].trim()))
}

fn classify(text: &str) -> TaskType {
    let words = words(text);

    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| words.iter().any(|w| w == k)))
        .map(|(task_type, _)| *task_type)
        .unwrap_or(TaskType::Unknown)
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Heuristic parameter extraction, keyed by task type
fn extract_params(task_type: TaskType, text: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    let text = text.trim();
    if text.is_empty() {
        return params;
    }

    match task_type {
        TaskType::Fix => {
            if let Some((_, component)) = regex_captures!(
                r"(?i)\b(?:leak|bug|error|crash|issue|problem|failure|exception|regression)s?\s+(?:in|on|with|inside)\s+(?:the\s+)?(.+?)[.!?]?$",
                text
            ) {
                params.insert("component".to_string(), component.trim().to_string());
            }
            if let Some(m) = regex!(
                r"(?i)\b(memory leak|null (?:pointer|reference)|race condition|deadlock|stack overflow|timeout|crash|exception)"
            )
            .find(text)
            {
                params.insert("symptom".to_string(), m.as_str().to_lowercase());
            }
            params.insert("bug".to_string(), subject(text));
        }
        TaskType::Build => {
            params.insert("feature".to_string(), subject(text));
        }
        TaskType::Design | TaskType::Scan | TaskType::Test => {
            let target = subject(text);
            let target = match regex_captures!(r"(?i)^(?:tests?\s+)?for\s+(.+)$", &target) {
                Some((_, rest)) => rest.to_string(),
                None => target,
            };
            params.insert("target".to_string(), target);
        }
        TaskType::Ship => {
            if let Some((_, env)) = regex_captures!(r"(?i)\bto\s+(production|prod|staging|dev|development|preview)\b", text)
            {
                params.insert("environment".to_string(), env.to_lowercase());
            }
            params.insert("target".to_string(), subject(text));
        }
        TaskType::Unknown => {}
    }

    params.retain(|_, v| !v.is_empty());
    params
}

/// The request with a leading action verb and article removed
fn subject(text: &str) -> String {
    let mut rest = text.trim();

    if let Some(first) = rest.split_whitespace().next()
        && LEAD_VERBS.contains(&first.to_lowercase().as_str())
    {
        rest = rest[first.len()..].trim_start();
    }

    match regex_captures!(r"(?i)^(?:a|an|the|some)\s+(.+)$", rest) {
        Some((_, tail)) => tail.trim().to_string(),
        None => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> TaskDescriptor {
        IntentParser::new().parse(text)
    }

    #[test]
    fn test_commands_map_directly() {
        for (cmd, expected) in COMMANDS {
            for trailing in ["", " something", " fix the bug", "   /ship it"] {
                let task = parse(&format!("{}{}", cmd, trailing));
                assert_eq!(task.task_type, *expected, "input: {}{}", cmd, trailing);
                assert_eq!(task.command.as_deref(), Some(*cmd));
            }
        }
    }

    #[test]
    fn test_command_strips_token() {
        let task = parse("/build user authentication");
        assert_eq!(task.task_type, TaskType::Build);
        assert_eq!(task.raw_text, "user authentication");
        assert_eq!(task.params.get("feature").map(String::as_str), Some("user authentication"));
    }

    #[test]
    fn test_command_token_must_stand_alone() {
        let task = parse("/building things");
        assert_eq!(task.command, None);
        assert_eq!(task.raw_text, "/building things");
    }

    #[test]
    fn test_command_is_case_insensitive() {
        assert_eq!(parse("/FIX login").task_type, TaskType::Fix);
    }

    #[test]
    fn test_keyword_fix_with_component() {
        let task = parse("fix memory leak in payment processing");
        assert_eq!(task.task_type, TaskType::Fix);
        assert_eq!(task.command, None);
        assert_eq!(task.raw_text, "fix memory leak in payment processing");
        assert_eq!(task.params.get("component").map(String::as_str), Some("payment processing"));
        assert_eq!(task.params.get("symptom").map(String::as_str), Some("memory leak"));
    }

    #[test]
    fn test_keyword_priority_fix_beats_build() {
        // "add" is a build word but "bug" is checked first
        assert_eq!(parse("add a regression check for this bug").task_type, TaskType::Fix);
    }

    #[test]
    fn test_keyword_requires_whole_word() {
        // "address" must not trigger the build rule via "add"
        assert_eq!(parse("update the mailing address").task_type, TaskType::Unknown);
    }

    #[test]
    fn test_keyword_classification() {
        assert_eq!(parse("write tests for UserService").task_type, TaskType::Test);
        assert_eq!(parse("deploy to production").task_type, TaskType::Ship);
        assert_eq!(parse("design a modern dashboard UI").task_type, TaskType::Design);
        assert_eq!(parse("audit the codebase").task_type, TaskType::Scan);
        assert_eq!(parse("create a payment page").task_type, TaskType::Build);
    }

    #[test]
    fn test_ship_environment() {
        let task = parse("deploy the api to Production");
        assert_eq!(task.params.get("environment").map(String::as_str), Some("production"));
        assert_eq!(task.params.get("target").map(String::as_str), Some("api to Production"));
    }

    #[test]
    fn test_test_target() {
        let task = parse("/test for UserService");
        assert_eq!(task.params.get("target").map(String::as_str), Some("UserService"));
    }

    #[test]
    fn test_unknown_preserves_input() {
        for input in ["", "   ", "hello there", "/unknown thing", "¿qué tal?", "  padded  "] {
            let task = parse(input);
            assert_eq!(task.task_type, TaskType::Unknown, "input: {:?}", input);
            assert_eq!(task.raw_text, input);
            assert!(task.params.is_empty());
        }
    }
}
