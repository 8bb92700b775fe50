//! SKILL.md frontmatter parsing
//!
//! Parses optional YAML frontmatter from SKILL.md files to extract metadata.
//! A file without frontmatter is all body; a file whose frontmatter is
//! present but broken is an error.
//!
//! # Format
//!
//! ```markdown
//! ---
//! name: debugging
//! description: Systematic debugging of crashes, leaks and wrong output
//! keywords: [debug, bug, crash, leak]
//! ---
//!
//! # Debugging
//! ...
//! ```

use eyre::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Metadata extracted from SKILL.md frontmatter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillMetadata {
    /// Skill name (falls back to the directory name)
    #[serde(default)]
    pub name: Option<String>,
    /// What this skill does
    #[serde(default)]
    pub description: String,
    /// Explicit match keywords
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Explicit agent affinity weights
    #[serde(default)]
    pub affinity: Option<BTreeMap<String, f64>>,
}

/// A parsed SKILL.md
#[derive(Debug, Clone)]
pub struct SkillDocument {
    pub metadata: SkillMetadata,
    pub body: String,
}

/// Parse SKILL.md from disk
pub fn parse_skill_md(path: &Path) -> Result<SkillDocument> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read SKILL.md at {}", path.display()))?;

    parse_document(&content).with_context(|| format!("Failed to parse frontmatter in {}", path.display()))
}

/// Split markdown into frontmatter metadata and body
pub fn parse_document(content: &str) -> Result<SkillDocument> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Ok(SkillDocument {
            metadata: SkillMetadata::default(),
            body: content.trim().to_string(),
        });
    }

    let rest = &trimmed[3..];
    let end_pos = rest
        .find("\n---")
        .ok_or_else(|| eyre::eyre!("No closing frontmatter delimiter (---) found"))?;

    let yaml_content = rest[..end_pos].trim();
    let after = &rest[end_pos + 4..];
    // Drop the remainder of the closing delimiter line
    let body = match after.find('\n') {
        Some(nl) => &after[nl + 1..],
        None => "",
    };

    let metadata: SkillMetadata = if yaml_content.is_empty() {
        SkillMetadata::default()
    } else {
        serde_yaml::from_str(yaml_content).context("Failed to parse YAML frontmatter")?
    };

    Ok(SkillDocument {
        metadata,
        body: body.trim().to_string(),
    })
}

/// Check if a directory contains a SKILL.md file
pub fn has_skill_md(dir: &Path) -> bool {
    dir.join("SKILL.md").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_frontmatter() {
        let content = r#"---
name: better-auth
description: Authentication with sessions and OAuth
keywords: [auth, "jwt", oauth]
affinity:
  coder: 1.0
  reviewer: 0.5
---

# Better Auth

Use sessions.
"#;

        let doc = parse_document(content).unwrap();
        assert_eq!(doc.metadata.name.as_deref(), Some("better-auth"));
        assert_eq!(doc.metadata.description, "Authentication with sessions and OAuth");
        assert_eq!(doc.metadata.keywords, Some(vec!["auth".into(), "jwt".into(), "oauth".into()]));
        let affinity = doc.metadata.affinity.unwrap();
        assert_eq!(affinity.get("reviewer"), Some(&0.5));
        assert_eq!(doc.body, "# Better Auth\n\nUse sessions.");
    }

    #[test]
    fn test_parse_minimal_frontmatter() {
        let content = "---\ndescription: Just a description\n---\nBody";
        let doc = parse_document(content).unwrap();
        assert!(doc.metadata.name.is_none());
        assert!(doc.metadata.keywords.is_none());
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let doc = parse_document("# Plain\n\nJust content\n").unwrap();
        assert!(doc.metadata.name.is_none());
        assert_eq!(doc.metadata.description, "");
        assert_eq!(doc.body, "# Plain\n\nJust content");
    }

    #[test]
    fn test_no_closing_delimiter() {
        assert!(parse_document("---\nname: broken\n# Missing closing").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(parse_document("---\nkeywords: [unterminated\n---\nbody").is_err());
    }
}
