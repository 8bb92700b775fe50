//! Relevance scoring and top-N skill selection
//!
//! ```text
//! score = w.name * name + w.description * description
//!       + w.keyword * keyword + w.affinity * affinity[agent]
//! ```
//!
//! Each factor is in [0, 1]. The weights are used as configured, with no
//! normalization and no clamp on the total.

use std::collections::HashSet;

use super::keywords::phrase;
use super::{ScoreFactors, ScoredSkill, SkillCatalog, SkillRecord};
use crate::config::{ScoringWeights, SelectionConfig};
use crate::intent::TaskDescriptor;

/// Shortest name token that may match a word prefix, e.g. `auth` in `authentication`
const MIN_NAME_TOKEN: usize = 4;

/// Slack for the `min_score` comparison. Fractional factors such as 1/3 land a
/// few ulps under their exact product, e.g. 0.3 * (1/3) = 0.09999999999999999.
const SCORE_EPSILON: f64 = 1e-9;

/// Words ignored when comparing descriptions
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "into", "that", "this", "your", "you", "are", "use", "when", "using", "how",
    "all", "any", "its", "not", "but", "via",
];

/// Lowercased combined task text, prepared once per selection
struct QueryText {
    /// Space-joined words with single-space padding on both ends
    padded: String,
    words: HashSet<String>,
}

impl QueryText {
    fn new(text: &str) -> Self {
        let joined = phrase(text);
        let words = content_words(&joined);
        Self {
            padded: format!(" {} ", joined),
            words,
        }
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty() && self.padded.trim().is_empty()
    }

    /// Whole-word (or whole-phrase) containment
    fn contains_phrase(&self, needle: &str) -> bool {
        let needle = phrase(needle);
        !needle.is_empty() && self.padded.contains(&format!(" {} ", needle))
    }
}

/// Split a phrase into words, dropping stop words and very short words
fn content_words(text: &str) -> HashSet<String> {
    phrase(text)
        .split(|c: char| c == ' ' || c == '-' || c == '.')
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Selects the most relevant skills for a task and agent
#[derive(Debug, Clone)]
pub struct SkillLoader {
    catalog: SkillCatalog,
    settings: SelectionConfig,
}

impl SkillLoader {
    pub fn new(catalog: SkillCatalog, settings: SelectionConfig) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Select using the configured `max_skills` and `min_score`
    pub fn select(&self, task: &TaskDescriptor, agent_id: &str) -> Vec<ScoredSkill> {
        self.select_with(task, agent_id, self.settings.max_skills, self.settings.min_score)
    }

    /// Score every skill and return at most `max_skills` with `score >= min_score`
    /// (within [`SCORE_EPSILON`]), highest first. Equal scores keep catalog order.
    pub fn select_with(
        &self,
        task: &TaskDescriptor,
        agent_id: &str,
        max_skills: usize,
        min_score: f64,
    ) -> Vec<ScoredSkill> {
        let query = QueryText::new(&task.combined_text());

        let mut scored: Vec<ScoredSkill> = self
            .catalog
            .iter()
            .filter_map(|skill| {
                let factors = score_factors(skill, &query, agent_id)?;
                let score = weighted(&factors, &self.settings.weights);
                log::debug!("skill={} agent={} score={:.3} {:?}", skill.id, agent_id, score, factors);
                (score + SCORE_EPSILON >= min_score).then(|| ScoredSkill {
                    skill: skill.clone(),
                    score,
                    factors,
                })
            })
            .collect();

        // sort_by is stable, so ties stay in catalog order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(max_skills);
        scored
    }
}

fn weighted(f: &ScoreFactors, w: &ScoringWeights) -> f64 {
    w.name * f.name + w.description * f.description + w.keyword * f.keyword + w.affinity * f.affinity
}

/// Factor values for one skill, or None when the record is malformed
fn score_factors(skill: &SkillRecord, query: &QueryText, agent_id: &str) -> Option<ScoreFactors> {
    if !skill.is_well_formed() {
        log::debug!("Skill '{}' is malformed, scoring 0", skill.id);
        return None;
    }

    let affinity = skill.affinity_for(agent_id);
    if query.is_empty() {
        return Some(ScoreFactors {
            affinity,
            ..ScoreFactors::default()
        });
    }

    Some(ScoreFactors {
        name: name_match(skill, query),
        description: description_match(skill, query),
        keyword: keyword_match(skill, query),
        affinity,
    })
}

/// 1.0 when the name or its alias appears as a phrase, or a significant name
/// token prefixes a query word
fn name_match(skill: &SkillRecord, query: &QueryText) -> f64 {
    if query.contains_phrase(&skill.name) || query.contains_phrase(&skill.alias()) {
        return 1.0;
    }

    let hit = skill
        .alias()
        .split_whitespace()
        .filter(|t| t.len() >= MIN_NAME_TOKEN)
        .any(|t| query.words.iter().any(|w| w.starts_with(t)));

    if hit { 1.0 } else { 0.0 }
}

/// Fraction of description words present in the query
fn description_match(skill: &SkillRecord, query: &QueryText) -> f64 {
    let desc = content_words(&skill.description);
    if desc.is_empty() {
        return 0.0;
    }
    let common = desc.iter().filter(|w| query.words.contains(*w)).count();
    common as f64 / desc.len() as f64
}

/// Fraction of keywords present in the query
fn keyword_match(skill: &SkillRecord, query: &QueryText) -> f64 {
    if skill.keywords.is_empty() {
        return 0.0;
    }
    let hits = skill.keywords.iter().filter(|k| query.contains_phrase(k)).count();
    hits as f64 / skill.keywords.len() as f64
}
