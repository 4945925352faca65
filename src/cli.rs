use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reefmap")]
#[command(about = "Coral bleaching index simulator and reef health classifier", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate the annual bleaching-index series
    Generate {
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date of the range (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Regions to simulate (comma-separated)
        #[arg(long, value_delimiter = ',')]
        regions: Option<Vec<String>>,

        /// Collapse regions to their per-date mean
        #[arg(long)]
        aggregate: bool,

        /// Seed for reproducible output
        #[arg(long, env = "REEFMAP_SEED")]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Label dataset rows as bleached under an explicit rule
    Classify {
        /// Input CSV table
        input: PathBuf,

        /// Numeric column the rule applies to
        #[arg(long = "metric-column")]
        metric_column: Option<String>,

        /// Column carrying row names in reports
        #[arg(long = "region-column")]
        region_column: Option<String>,

        /// Labeling rule
        #[arg(long, value_enum)]
        rule: Option<RuleArg>,

        /// Quantile for the quantile rules (strictly between 0 and 1)
        #[arg(long)]
        quantile: Option<f64>,

        /// Cutoff for the fixed rule
        #[arg(long)]
        threshold: Option<f64>,

        /// Comparison direction for the fixed rule
        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,

        /// Name of the appended label column
        #[arg(long = "label-column")]
        label_column: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Score a quiz submission against the answer key
    Score {
        /// Submission file: JSON map of question id to selected option
        #[arg(long)]
        answers: PathBuf,

        /// Quiz definition file (defaults to the built-in reef quiz)
        #[arg(long)]
        quiz: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    LowQuantile,
    HighQuantile,
    Fixed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Above,
    Below,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Csv => crate::io::output::OutputFormat::Csv,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<RuleArg> for crate::config::RuleKind {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::LowQuantile => crate::config::RuleKind::LowQuantile,
            RuleArg::HighQuantile => crate::config::RuleKind::HighQuantile,
            RuleArg::Fixed => crate::config::RuleKind::Fixed,
        }
    }
}

impl From<DirectionArg> for crate::classify::Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Above => crate::classify::Direction::Above,
            DirectionArg::Below => crate::classify::Direction::Below,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
