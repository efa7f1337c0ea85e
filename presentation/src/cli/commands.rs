//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use symptom_domain::PatientSex;

/// Output format for diagnosis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with research, debate and ranked conditions
    Full,
    /// Only the ranked conditions
    Conditions,
    /// JSON output
    Json,
}

/// CLI arguments for symptom-quorum
#[derive(Parser, Debug)]
#[command(name = "symptom-quorum")]
#[command(author, version, about = "Symptom triage through multi-agent research and debate")]
#[command(long_about = r#"
Symptom Quorum turns a free-text symptom description into a ranked list of
possible conditions.

The process has four stages:
1. Discovery: candidate conditions from model reasoning and web research
2. Deep research: one agent per candidate, run in concurrent batches
3. Forum: the findings are debated and condensed into a consensus
4. Analysis: conditions are scored, tagged by body region and urgency

Results are possibilities, not diagnoses. Consult a healthcare provider.

Configuration files are loaded from (in priority order):
1. SYMPTOM_QUORUM_* environment variables
2. --config <path>              Explicit config file
3. ./symptom-quorum.toml        Project-level config
4. ~/.config/symptom-quorum/config.toml   Global config

Example:
  symptom-quorum "persistent fatigue, pale skin and shortness of breath"
  symptom-quorum --age 42 --sex female --rounds 3 "recurring headaches with nausea"
  symptom-quorum --symptoms-file notes.txt -o json
"#)]
pub struct Cli {
    /// Symptom description (at least 10 characters)
    #[arg(required_unless_present_any = ["symptoms_file", "show_config"])]
    pub symptoms: Option<String>,

    /// Read the symptom description from a file
    #[arg(long, value_name = "PATH", conflicts_with = "symptoms")]
    pub symptoms_file: Option<PathBuf>,

    /// Patient age in years (0-120)
    #[arg(long)]
    pub age: Option<u16>,

    /// Patient sex
    #[arg(long, value_name = "male|female|other")]
    pub sex: Option<PatientSex>,

    /// Relevant medical history
    #[arg(long, value_name = "TEXT")]
    pub history: Option<String>,

    /// Latitude for clinic lookup
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude for clinic lookup
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Conditions in the final ranking (overrides config)
    #[arg(long, value_name = "N")]
    pub max_conditions: Option<usize>,

    /// Deep-research agents per concurrent batch (overrides config)
    #[arg(long, value_name = "N")]
    pub batch: Option<usize>,

    /// Debate rounds in the forum (overrides config)
    #[arg(long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Both coordinates, when given
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}
