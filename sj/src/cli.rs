//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// sigmajudge - SIGMA rule comparison judge prompt tooling
#[derive(Parser, Debug)]
#[command(
    name = "sj",
    author,
    version,
    about = "Render the SIGMA rule comparison prompt and validate the judge's verdict",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the judge prompt for a candidate and a reference rule
    Render {
        /// Candidate ("GENERATED") rule file, `-` for stdin
        #[arg(long, value_name = "FILE")]
        candidate: PathBuf,

        /// Reference ("EXPECTED") rule file, `-` for stdin
        #[arg(long, value_name = "FILE")]
        reference: PathBuf,

        /// Write the prompt to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate a judge response against the expected JSON shape
    Validate {
        /// Response file (reads stdin when omitted or `-`)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Require a bare JSON object (no code fences or prose)
        #[arg(long)]
        strict: bool,

        /// Output format (text, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print the first YAML block of a model answer
    Extract {
        /// Answer file (reads stdin when omitted or `-`)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print the unrendered judge template
    Template,
}

/// Output format for the validate command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
