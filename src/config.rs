//! `.reefmap.toml` configuration.
//!
//! Loaded explicitly and handed to commands as a value; the computational
//! modules never read process-global state. CLI flags always win over file
//! values, which win over the built-in defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{BleachingRule, Direction};
use crate::core::{Error, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".reefmap.toml";

/// Which classification rule the config selects; parameters live alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    LowQuantile,
    HighQuantile,
    Fixed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReefmapConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub classification: ClassificationConfig,
}

/// Defaults for the `generate` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// First date of the simulated range
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last date of the simulated range
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,

    /// Regions the series covers
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,

    /// Fixed seed for reproducible output; unset means fresh entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            end_date: default_end_date(),
            regions: default_regions(),
            seed: None,
        }
    }
}

/// Defaults for the `classify` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Rule selecting which rows count as bleached
    #[serde(default = "default_rule_kind")]
    pub rule: RuleKind,

    /// Quantile for the quantile rules (open interval (0, 1))
    #[serde(default = "default_quantile")]
    pub quantile: f64,

    /// Cutoff for the fixed rule
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Comparison direction for the fixed rule
    #[serde(default = "default_direction")]
    pub direction: Direction,

    /// Numeric column the rule applies to
    #[serde(default = "default_metric_column")]
    pub metric_column: String,

    /// Column carrying row names in reports, when present in the data
    #[serde(default)]
    pub region_column: Option<String>,

    /// Name of the appended label column
    #[serde(default = "default_label_column")]
    pub label_column: String,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            rule: default_rule_kind(),
            quantile: default_quantile(),
            threshold: None,
            direction: default_direction(),
            metric_column: default_metric_column(),
            region_column: None,
            label_column: default_label_column(),
        }
    }
}

impl ClassificationConfig {
    /// Assemble the effective rule from kind plus parameters.
    pub fn rule(&self) -> Result<BleachingRule> {
        match self.rule {
            RuleKind::LowQuantile => Ok(BleachingRule::LowQuantile { q: self.quantile }),
            RuleKind::HighQuantile => Ok(BleachingRule::HighQuantile { q: self.quantile }),
            RuleKind::Fixed => {
                let value = self.threshold.ok_or_else(|| {
                    Error::configuration("the fixed rule requires a threshold value")
                })?;
                Ok(BleachingRule::FixedThreshold {
                    value,
                    direction: self.direction,
                })
            }
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1980, 1, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 8, 31).unwrap_or_default()
}

fn default_regions() -> Vec<String> {
    [
        "South Korea",
        "Australia",
        "Indonesia",
        "Philippines",
        "Japan",
        "Maldives",
        "Hawaii",
    ]
    .iter()
    .map(|region| region.to_string())
    .collect()
}

fn default_rule_kind() -> RuleKind {
    RuleKind::LowQuantile
}

fn default_quantile() -> f64 {
    0.2
}

fn default_direction() -> Direction {
    Direction::Above
}

fn default_metric_column() -> String {
    "coral_cover".to_string()
}

fn default_label_column() -> String {
    "bleached".to_string()
}

impl ReefmapConfig {
    /// Validate cross-field constraints the serde layer cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.generation.end_date < self.generation.start_date {
            return Err(Error::configuration(format!(
                "generation.end_date {} precedes generation.start_date {}",
                self.generation.end_date, self.generation.start_date
            )));
        }
        if self.generation.regions.is_empty() {
            return Err(Error::configuration("generation.regions must not be empty"));
        }
        let q = self.classification.quantile;
        if q <= 0.0 || q >= 1.0 {
            return Err(Error::configuration(format!(
                "classification.quantile must lie strictly between 0 and 1, got {q}"
            )));
        }
        if self.classification.label_column.is_empty() {
            return Err(Error::configuration(
                "classification.label_column must not be empty",
            ));
        }
        Ok(())
    }
}

/// Load configuration from an explicit path, or from `.reefmap.toml` in the
/// working directory when present, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ReefmapConfig> {
    let candidate = match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let fallback = PathBuf::from(CONFIG_FILE);
            if !fallback.exists() {
                return Ok(ReefmapConfig::default());
            }
            fallback
        }
    };

    let content = fs::read_to_string(&candidate)?;
    let config: ReefmapConfig = toml::from_str(&content).map_err(|e| {
        Error::configuration(format!("failed to parse {}: {e}", candidate.display()))
    })?;
    config.validate()?;
    Ok(config)
}
