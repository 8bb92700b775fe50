use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "vibecode",
    about = "Turn a coding request into per-agent assistant contexts with the most relevant skills",
    version,
    after_help = "Logs are written to: ~/.local/share/vibecode/logs/vibecode.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to vibecode.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the configured selection limits
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub struct SelectionArgs {
    /// Maximum skills per agent
    #[arg(long)]
    pub max_skills: Option<usize>,

    /// Minimum relevance score (inclusive)
    #[arg(long)]
    pub min_score: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the context for every agent in the request's pipeline
    Run {
        /// Command (e.g. "/build user auth") or natural-language request.
        /// Words starting with '-' go after `--`.
        text: Vec<String>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show how a request is classified and which agents would run
    Parse {
        /// Request text; words starting with '-' go after `--`
        text: Vec<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Score skills for one agent against a request
    Select {
        /// Agent id (e.g. coder, medic)
        #[arg(long, short = 'a')]
        agent: String,

        /// Request text; words starting with '-' go after `--`
        text: Vec<String>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Inspect the skill catalog
    Skill {
        #[command(subcommand)]
        action: SkillAction,
    },

    /// Inspect the agent prompt table
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose setup issues
    Doctor,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum SkillAction {
    /// List all skills in catalog order
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show skill details
    Info {
        /// Skill id
        id: String,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum AgentAction {
    /// List registered agents and the pipelines that use them
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (dot notation)
        key: String,
    },
}
