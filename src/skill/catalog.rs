//! Skill catalog loading
//!
//! Loads `<skills_dir>/<id>/SKILL.md` entries once at startup. Directory
//! names are visited in sorted order, which fixes the catalog's insertion
//! order and therefore tie-breaking during selection.

use indexmap::IndexMap;
use std::path::Path;
use walkdir::WalkDir;

use super::affinity::default_affinity;
use super::keywords::extract_keywords;
use super::parser::{has_skill_md, parse_skill_md};
use super::{SkillRecord, normalize_keywords};
use crate::error::ConfigError;

/// Read-only, insertion-ordered skill table
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: IndexMap<String, SkillRecord>,
}

impl SkillCatalog {
    /// Build from in-memory records. Later duplicates of an id are dropped.
    pub fn from_records<I: IntoIterator<Item = SkillRecord>>(records: I) -> Self {
        let mut skills = IndexMap::new();
        for record in records {
            if skills.contains_key(&record.id) {
                log::warn!("Duplicate skill id '{}', keeping the first", record.id);
                continue;
            }
            skills.insert(record.id.clone(), record);
        }
        Self { skills }
    }

    /// Load every skill directory under `skills_dir`
    pub fn load(skills_dir: &Path) -> Result<Self, ConfigError> {
        if !skills_dir.is_dir() {
            return Err(ConfigError::CatalogMissing(skills_dir.to_path_buf()));
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(skills_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ConfigError::CatalogUnreadable {
                path: skills_dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if !path.is_dir() || !has_skill_md(path) {
                continue;
            }

            let id = entry.file_name().to_string_lossy().to_string();
            match load_skill(&id, path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Failed to load skill from {}: {:#}", path.display(), e);
                }
            }
        }

        let catalog = Self::from_records(records);
        log::info!("Loaded {} skills from {}", catalog.len(), skills_dir.display());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&SkillRecord> {
        self.skills.get(id)
    }

    /// Skills in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SkillRecord> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Load one skill directory, filling in keywords and affinity when the frontmatter omits them
fn load_skill(id: &str, dir: &Path) -> eyre::Result<SkillRecord> {
    let doc = parse_skill_md(&dir.join("SKILL.md"))?;
    let meta = doc.metadata;

    let name = meta.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| id.to_string());
    let keywords = match meta.keywords {
        Some(k) if !k.is_empty() => normalize_keywords(k),
        _ => extract_keywords(&meta.description, &doc.body),
    };
    let agent_affinity = meta.affinity.unwrap_or_else(|| default_affinity(&name));

    Ok(SkillRecord {
        id: id.to_string(),
        name,
        description: meta.description,
        keywords,
        agent_affinity,
        content: doc.body,
        path: Some(dir.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_skill(root: &Path, id: &str, content: &str) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("SKILL.md"), content).unwrap();
    }

    #[test]
    fn test_load_in_directory_order() {
        let temp = TempDir::new().unwrap();
        write_skill(temp.path(), "zeta", "---\nname: zeta\n---\nZ");
        write_skill(temp.path(), "alpha", "---\nname: alpha\n---\nA");
        write_skill(temp.path(), "mid", "---\nname: mid\n---\nM");

        let catalog = SkillCatalog::load(temp.path()).unwrap();
        let ids: Vec<_> = catalog.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_defaults_filled_in() {
        let temp = TempDir::new().unwrap();
        write_skill(
            temp.path(),
            "debugging",
            "---\ndescription: Track down a bug with a debug build\n---\n# Debugging\n",
        );

        let catalog = SkillCatalog::load(temp.path()).unwrap();
        let skill = catalog.get("debugging").unwrap();
        assert_eq!(skill.name, "debugging");
        assert_eq!(skill.keywords, vec!["debug", "bug"]);
        assert_eq!(skill.affinity_for("medic"), 1.0);
        assert_eq!(skill.content, "# Debugging");
        assert!(skill.path.is_some());
    }

    #[test]
    fn test_explicit_affinity_replaces_default() {
        let temp = TempDir::new().unwrap();
        write_skill(
            temp.path(),
            "debugging",
            "---\nkeywords: [leak]\naffinity:\n  designer: 0.5\n---\nbody",
        );

        let catalog = SkillCatalog::load(temp.path()).unwrap();
        let skill = catalog.get("debugging").unwrap();
        assert_eq!(skill.keywords, vec!["leak"]);
        assert_eq!(skill.affinity_for("designer"), 0.5);
        assert_eq!(skill.affinity_for("medic"), 0.0);
    }

    #[test]
    fn test_broken_skill_skipped() {
        let temp = TempDir::new().unwrap();
        write_skill(temp.path(), "good", "---\nname: good\n---\nok");
        write_skill(temp.path(), "bad", "---\nname: [oops\n---\nbody");
        fs::create_dir_all(temp.path().join("no-skill-md")).unwrap();
        fs::write(temp.path().join("README.md"), "not a skill").unwrap();

        let catalog = SkillCatalog::load(temp.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("good").is_some());
    }

    #[test]
    fn test_missing_directory() {
        let err = SkillCatalog::load(Path::new("/nonexistent/skills")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogMissing(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let skills = temp.path().join("skills");
        write_skill(&skills, "good", "---\nname: good\n---\nok");
        fs::set_permissions(&skills, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions, nothing to check there
        let readable = fs::read_dir(&skills).is_ok();
        let result = SkillCatalog::load(&skills);
        fs::set_permissions(&skills, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::CatalogUnreadable { .. }), "{:?}", err);
        assert!(err.to_string().contains("failed to read skill catalog"));
    }

    #[test]
    fn test_empty_directory_loads_empty() {
        let temp = TempDir::new().unwrap();
        let catalog = SkillCatalog::load(temp.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_records_keeps_first_duplicate() {
        let catalog = SkillCatalog::from_records([
            SkillRecord::new("a", "first", ""),
            SkillRecord::new("b", "b", ""),
            SkillRecord::new("a", "second", ""),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().name, "first");
    }
}
