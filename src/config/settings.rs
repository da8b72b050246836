use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ldapsift_core::Verdict;

/// Capture log read when no input is given
pub const DEFAULT_INPUT: &str = "ldap_log.txt";

/// Exit status for a failure verdict under `--check`
///
/// Distinct from the status 1 used for errors such as an unreadable log.
pub const CHECK_FAILED_EXIT_CODE: u8 = 2;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check whether an LDAP search completed in a tshark text capture"
)]
pub struct Config {
    /// Capture log to classify (`-` reads stdin)
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Require milestones in protocol order (changes the verdict rule)
    #[arg(long)]
    pub strict: bool,

    /// Exit with status 2 when the verdict is failure
    #[arg(long)]
    pub check: bool,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Input file path, or `None` for stdin
    pub fn input_path(&self) -> Option<&Path> {
        Some(self.input.as_path()).filter(|path| path.as_os_str() != "-")
    }

    /// Process exit status for a verdict
    pub fn exit_status(&self, verdict: Verdict) -> u8 {
        if self.check && !verdict.is_success() {
            CHECK_FAILED_EXIT_CODE
        } else {
            0
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON report
    #[default]
    Json,
    /// Aligned plain-text summary
    Summary,
}

/// Application settings (from config file)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Input settings
    #[serde(default)]
    pub input: InputSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Verdict rule settings
    #[serde(default)]
    pub verdict: VerdictSettings,
}

/// Input settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    /// Largest capture log accepted, in bytes (unlimited when unset)
    #[serde(default)]
    pub max_bytes: Option<u64>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Indent JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

/// Verdict rule settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdictSettings {
    /// Require milestones in protocol order
    #[serde(default)]
    pub strict_order: bool,
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                return Self::load_file(p);
            }
            tracing::warn!("Config file {:?} not found, using defaults", p);
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("ldapsift/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/ldapsift/config.toml")),
            dirs::home_dir().map(|p| p.join(".ldapsift.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_file(path);
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        tracing::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.compact {
            self.output.pretty = false;
        }
        if cli.strict {
            self.verdict.strict_order = true;
        }
    }

    /// Validate and normalize settings values
    pub fn validate(&mut self) {
        const MIN_MAX_BYTES: u64 = 1;

        if let Some(max_bytes) = self.input.max_bytes.as_mut() {
            if *max_bytes < MIN_MAX_BYTES {
                *max_bytes = MIN_MAX_BYTES;
            }
        }
    }
}
