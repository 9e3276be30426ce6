//! CLI interface for the talent matcher

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "talent-matcher")]
#[command(about = "Project staffing and activity recommendation tool")]
#[command(long_about = "Extract key information from project descriptions and CVs, then rank staff by keyword match or profile similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the key fields of a project description
    Project {
        #[command(flatten)]
        source: DescriptionSource,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Recommend staff for a project from its required skills
    Staff {
        #[command(flatten)]
        source: DescriptionSource,

        /// Whitespace-separated keywords, used instead of the description's required skills
        #[arg(short, long)]
        keywords: Option<String>,

        /// Staff roster (CSV, TSV, XLSX, XLS)
        #[arg(short, long)]
        roster: PathBuf,

        /// Number of people to recommend
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a person profile from a CV
    Profile {
        /// Path to CV file (PDF, TXT, MD)
        #[arg(long)]
        cv: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Recommend similar people and suitable activities for a person
    Activities {
        /// Staff roster (CSV, TSV, XLSX, XLS)
        #[arg(short, long)]
        roster: PathBuf,

        /// New person's CV (PDF, TXT, MD)
        #[arg(long, conflicts_with_all = ["person", "target"])]
        cv: Option<PathBuf>,

        /// New person as a tabular file with roster columns
        #[arg(long, conflicts_with = "target")]
        person: Option<PathBuf>,

        /// Name of a person already in the roster
        #[arg(long)]
        target: Option<String>,

        /// Number of activities to recommend
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Number of similar people considered (defaults to --top-n)
        #[arg(long)]
        neighbours: Option<usize>,

        #[command(flatten)]
        weights: WeightArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct DescriptionSource {
    /// Path to project description (PDF, TXT, MD)
    #[arg(short, long, conflicts_with = "text")]
    pub description: Option<PathBuf>,

    /// Project description given inline
    #[arg(short, long)]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct WeightArgs {
    /// Weight of shared skills
    #[arg(long)]
    pub skills_weight: Option<f64>,

    /// Weight of a shared institution
    #[arg(long)]
    pub education_weight: Option<f64>,

    /// Weight of shared degrees
    #[arg(long)]
    pub training_weight: Option<f64>,

    /// Weight of shared activities
    #[arg(long)]
    pub activity_weight: Option<f64>,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format: console, json, markdown, html
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output detailed results
    #[arg(long)]
    pub detailed: bool,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "similarity.skills")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
