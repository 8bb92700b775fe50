use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::intent::TaskType;

/// Main vibecode configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub selection: SelectionConfig,
    /// Per-task-type agent sequences that replace the built-in pipelines
    #[serde(deserialize_with = "deserialize_pipelines")]
    pub pipelines: IndexMap<TaskType, Vec<String>>,
    pub log_level: LogLevel,
    /// File this configuration was read from, None when defaults are in use
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Pipeline keys go through `TaskType::from_str` so a typo names the valid task types
fn deserialize_pipelines<'de, D>(deserializer: D) -> std::result::Result<IndexMap<TaskType, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    IndexMap::<String, Vec<String>>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, agents)| {
            key.parse::<TaskType>()
                .map(|task_type| (task_type, agents))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub skills: PathBuf,
    pub agents: PathBuf,
    pub system_prompt: PathBuf,
}

/// Knobs for skill selection, handed to the loader at construction
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum skills attached to a single agent
    pub max_skills: usize,
    /// Inclusive lower bound on a skill's score
    pub min_score: f64,
    pub weights: ScoringWeights,
}

/// Factor weights for skill relevance. Deliberately not normalized.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    pub name: f64,
    pub description: f64,
    pub keyword: f64,
    pub affinity: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            selection: SelectionConfig::default(),
            pipelines: IndexMap::new(),
            log_level: LogLevel::default(),
            source: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let vibecode_dir = Config::vibecode_dir();

        Self {
            skills: vibecode_dir.join("skills"),
            agents: vibecode_dir.join("agents"),
            system_prompt: vibecode_dir.join("system.md"),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_skills: 3,
            min_score: 0.1,
            weights: ScoringWeights::default(),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            name: 0.5,
            description: 0.3,
            keyword: 0.15,
            affinity: 0.2,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var("VIBECODE_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from VIBECODE_CONFIG: {}", e);
                    }
                }
            }
        }

        if let Ok(vibecode_dir) = std::env::var("VIBECODE_DIR") {
            let path = PathBuf::from(vibecode_dir).join("vibecode.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from VIBECODE_DIR: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/vibecode/vibecode.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("vibecode").join("vibecode.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./vibecode.yaml (for development)
        let local_config = PathBuf::from("vibecode.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.source = Some(path.as_ref().to_path_buf());

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Get the vibecode directory (where skills, agents and the system prompt live)
    pub fn vibecode_dir() -> PathBuf {
        std::env::var("VIBECODE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("vibecode"))
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = SelectionConfig::default();
        assert_eq!(selection.max_skills, 3);
        assert_eq!(selection.min_score, 0.1);
    }

    #[test]
    fn test_default_weights_are_unnormalized() {
        let w = ScoringWeights::default();
        assert_eq!(w.name, 0.5);
        assert_eq!(w.description, 0.3);
        assert_eq!(w.keyword, 0.15);
        assert_eq!(w.affinity, 0.2);
        assert!((w.name + w.description + w.keyword + w.affinity - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_expand_path_no_expansion() {
        let path = PathBuf::from("/usr/local/bin");
        let expanded = Config::expand_path(&path);
        assert_eq!(expanded, PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test");
        let expanded = Config::expand_path(&path);
        assert!(!expanded.to_string_lossy().contains('~'));
        assert!(expanded.to_string_lossy().contains("test"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
selection:
  max_skills: 5
pipelines:
  fix: [medic]
log_level: debug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.selection.max_skills, 5);
        assert_eq!(config.selection.min_score, 0.1);
        assert_eq!(config.selection.weights, ScoringWeights::default());
        assert_eq!(config.pipelines.get(&TaskType::Fix), Some(&vec!["medic".to_string()]));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let yaml_str = serde_yaml::to_string(&config).expect("Failed to serialize");
        let parsed: Config = serde_yaml::from_str(&yaml_str).expect("Failed to deserialize");
        assert_eq!(parsed.selection, config.selection);
        assert_eq!(parsed.paths.skills, config.paths.skills);
    }

    #[test]
    fn test_unknown_pipeline_key_names_valid_types() {
        let yaml = "pipelines:\n  deploy: [shipper]\n";
        let err = serde_yaml::from_str::<Config>(yaml).unwrap_err().to_string();
        assert!(err.contains("deploy"), "{}", err);
        assert!(err.contains("ship"), "{}", err);
    }

    #[test]
    fn test_pipeline_keys_are_case_insensitive() {
        let config: Config = serde_yaml::from_str("pipelines:\n  Build: [coder]\n").unwrap();
        assert_eq!(config.pipelines.get(&TaskType::Build), Some(&vec!["coder".to_string()]));
    }

    #[test]
    fn test_load_records_source() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        fs::write(&path, "log_level: warn\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.source, Some(path));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(Config::default().source, None);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let missing = PathBuf::from("/nonexistent/vibecode.yaml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
