//! Task type -> agent sequence table

use indexmap::IndexMap;

use crate::intent::TaskType;

pub const AUDITOR: &str = "auditor";
pub const PLANNER: &str = "planner";
pub const CODER: &str = "coder";
pub const DESIGNER: &str = "designer";
pub const REVIEWER: &str = "reviewer";
pub const GENERALIST: &str = "generalist";
pub const OPERATOR: &str = "operator";
pub const MEDIC: &str = "medic";
pub const SHIPPER: &str = "shipper";
pub const TESTER: &str = "tester";

/// Every built-in role
pub const ROLES: &[&str] = &[
    AUDITOR, PLANNER, CODER, DESIGNER, REVIEWER, GENERALIST, OPERATOR, MEDIC, SHIPPER, TESTER,
];

/// Immutable pipeline lookup, built once at startup
#[derive(Debug, Clone)]
pub struct PipelineTable {
    pipelines: IndexMap<TaskType, Vec<String>>,
}

impl Default for PipelineTable {
    fn default() -> Self {
        let table = |agents: &[&str]| agents.iter().map(|a| a.to_string()).collect::<Vec<_>>();

        Self {
            pipelines: IndexMap::from([
                (TaskType::Scan, table(&[AUDITOR])),
                (TaskType::Fix, table(&[AUDITOR, MEDIC, TESTER])),
                (TaskType::Build, table(&[AUDITOR, PLANNER, CODER, REVIEWER, TESTER])),
                (TaskType::Design, table(&[DESIGNER, CODER, REVIEWER])),
                (TaskType::Test, table(&[TESTER])),
                (TaskType::Ship, table(&[REVIEWER, TESTER, SHIPPER])),
                (TaskType::Unknown, table(&[GENERALIST])),
            ]),
        }
    }
}

impl PipelineTable {
    /// Built-in pipelines with per-task overrides applied. Empty overrides are ignored.
    pub fn with_overrides(overrides: &IndexMap<TaskType, Vec<String>>) -> Self {
        let mut table = Self::default();
        for (task_type, agents) in overrides {
            if agents.is_empty() {
                log::warn!("Ignoring empty pipeline override for {}", task_type);
                continue;
            }
            table.pipelines.insert(*task_type, agents.clone());
        }
        table
    }

    /// Agent ids for `task_type`, falling back to the unknown-task pipeline
    pub fn agents_for(&self, task_type: TaskType) -> &[String] {
        self.pipelines
            .get(&task_type)
            .or_else(|| self.pipelines.get(&TaskType::Unknown))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskType, &Vec<String>)> {
        self.pipelines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipelines() {
        let table = PipelineTable::default();
        assert_eq!(table.agents_for(TaskType::Fix), ["auditor", "medic", "tester"]);
        let build = table.agents_for(TaskType::Build);
        assert!(build.iter().any(|a| a == AUDITOR));
        assert!(build.iter().any(|a| a == CODER));
        assert_eq!(table.agents_for(TaskType::Unknown), ["generalist"]);
    }

    #[test]
    fn test_every_task_type_has_a_pipeline() {
        let table = PipelineTable::default();
        for task_type in TaskType::ALL {
            assert!(!table.agents_for(task_type).is_empty());
            for agent in table.agents_for(task_type) {
                assert!(ROLES.contains(&agent.as_str()));
            }
        }
    }

    #[test]
    fn test_overrides() {
        let overrides = IndexMap::from([
            (TaskType::Fix, vec!["medic".to_string()]),
            (TaskType::Scan, vec![]),
        ]);
        let table = PipelineTable::with_overrides(&overrides);
        assert_eq!(table.agents_for(TaskType::Fix), ["medic"]);
        assert_eq!(table.agents_for(TaskType::Scan), ["auditor"]);
    }
}
