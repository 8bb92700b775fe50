//! Built-in agent/skill affinities
//!
//! Used for skills whose frontmatter carries no `affinity` map. Each agent
//! lists the skills it naturally reaches for; listed skills get weight 1.0.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

static AGENT_SKILLS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            "auditor",
            &["code-review", "sequential-thinking", "problem-solving", "debugging"][..],
        ),
        ("planner", &["planning", "sequential-thinking", "problem-solving"][..]),
        (
            "coder",
            &[
                "backend-development",
                "frontend-development",
                "web-frameworks",
                "databases",
                "better-auth",
                "payment-integration",
                "debugging",
            ][..],
        ),
        (
            "designer",
            &["ui-ux-pro-max", "frontend-design", "ui-styling", "threejs", "ai-artist"][..],
        ),
        ("reviewer", &["code-review", "sequential-thinking", "problem-solving"][..]),
        ("generalist", &["common"][..]),
        ("operator", &["devops", "chrome-devtools"][..]),
        ("medic", &["debugging", "problem-solving", "sequential-thinking"][..]),
        ("shipper", &["devops", "planning"][..]),
        ("tester", &["debugging", "code-review"][..]),
    ])
});

/// Default affinity map for a skill name
pub fn default_affinity(skill_name: &str) -> BTreeMap<String, f64> {
    AGENT_SKILLS
        .iter()
        .filter(|(_, skills)| skills.contains(&skill_name))
        .map(|(agent, _)| (agent.to_string(), 1.0))
        .collect()
}
