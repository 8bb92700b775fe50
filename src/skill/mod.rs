//! Skill catalog and relevance-based selection
//!
//! This module handles:
//! - Parsing `<id>/SKILL.md` files into [`SkillRecord`]s
//! - Holding the read-only catalog in insertion order
//! - Scoring every skill against a task for a given agent
//!
//! # Skill files
//!
//! ```markdown
//! ---
//! name: better-auth
//! description: Authentication flows with sessions, OAuth and JWT
//! keywords: [auth, jwt, oauth, session]
//! affinity:
//!   coder: 1.0
//! ---
//!
//! # Better Auth
//! ...
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod affinity;
pub mod catalog;
pub mod keywords;
pub mod parser;
pub mod selector;

pub use catalog::SkillCatalog;
pub use selector::SkillLoader;

/// A unit of domain expertise that can be attached to an agent's context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Unique id (the skill's directory name)
    pub id: String,
    pub name: String,
    pub description: String,
    /// Lowercase, deduplicated, in declaration order
    pub keywords: Vec<String>,
    /// Agent id -> weight in [0, 1]
    pub agent_affinity: BTreeMap<String, f64>,
    /// Markdown body injected into context blobs
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<PathBuf>,
}

impl SkillRecord {
    /// Name with separators turned into spaces, e.g. `better-auth` -> `better auth`
    pub fn alias(&self) -> String {
        self.name.to_lowercase().replace(['-', '_'], " ").trim().to_string()
    }

    /// Affinity for `agent_id`, 0.0 when the agent is not listed
    pub fn affinity_for(&self, agent_id: &str) -> f64 {
        self.agent_affinity.get(agent_id).copied().unwrap_or(0.0)
    }

    /// Records failing this check always score 0.0
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.name.trim().is_empty()
            && self
                .agent_affinity
                .values()
                .all(|w| w.is_finite() && (0.0..=1.0).contains(w))
    }
}

#[cfg(test)]
impl SkillRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            keywords: Vec::new(),
            agent_affinity: BTreeMap::new(),
            content: String::new(),
            path: None,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = normalize_keywords(keywords);
        self
    }

    pub fn with_affinity(mut self, agent_id: impl Into<String>, weight: f64) -> Self {
        self.agent_affinity.insert(agent_id.into(), weight);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Per-factor match values, each in [0, 1], before weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreFactors {
    pub name: f64,
    pub description: f64,
    pub keyword: f64,
    pub affinity: f64,
}

/// A skill paired with its relevance to one (task, agent) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSkill {
    pub skill: SkillRecord,
    pub score: f64,
    pub factors: ScoreFactors,
}

/// Lowercase, trim, drop empties and duplicates while keeping first-seen order
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for k in keywords {
        let k = k.as_ref().trim().trim_matches(['"', '\'']).trim().to_lowercase();
        if !k.is_empty() && !out.contains(&k) {
            out.push(k);
        }
    }
    out
}
