//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// varstat: variable type inference and descriptive statistics
#[derive(Parser)]
#[command(name = "varstat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify every column of a file and compute its statistics
    Analyze(AnalyzeArgs),

    /// Show inferred variable types and counts
    Summary {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with analysis configuration
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Share of numeric values from which a column is numeric (0.0-1.0)
    #[arg(long, value_name = "F")]
    pub numeric_threshold: Option<f64>,

    /// Distinct values from which integral columns are continuous
    #[arg(long, value_name = "N")]
    pub cardinality: Option<usize>,

    /// Number of classes for continuous columns, 1-1000 (default: Sturges' rule)
    #[arg(long, value_name = "N")]
    pub bins: Option<usize>,

    /// Use the sample (n - 1) variance instead of the population variance
    #[arg(long)]
    pub sample_variance: bool,

    /// Ordered categories for a column, e.g. `--ordinal size=S,M,L`
    #[arg(long, value_name = "COLUMN=a,b,c", value_parser = parse_ordinal)]
    pub ordinal: Vec<(String, Vec<String>)>,

    /// Field delimiter (default: auto-detect). Use `tab` or `\t` for tabs.
    #[arg(long, value_name = "C", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use text, json, or markdown.", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

fn parse_ordinal(s: &str) -> Result<(String, Vec<String>), String> {
    let (column, categories) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=a,b,c, got '{}'", s))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{}'", s));
    }
    let categories: Vec<String> = categories
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    Ok((column.to_string(), categories))
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("delimiter must be a single ASCII character, got '{}'", s)),
    }
}
