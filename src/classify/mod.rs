//! Threshold-based bleaching classification.
//!
//! Labels every row of a batch as bleached or not from a single numeric
//! column. The source dashboards never agreed on the rule (one revision
//! flagged the lowest coral-cover quantile, the other the highest
//! temperature quantile), so the rule is always an explicit caller choice
//! rather than a default baked in here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::stats;
use crate::core::{ClassifiedRecord, Error, RegionRecord, Result, TabularDataset};

/// Comparison direction for the fixed-threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

/// Rule deriving the bleached flag from a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BleachingRule {
    /// Bleached when the value sits strictly below the q-th quantile of the
    /// batch ("critically low relative to the rest").
    LowQuantile { q: f64 },
    /// Bleached when the value sits strictly above the q-th quantile of the
    /// batch ("anomalously high relative to the rest").
    HighQuantile { q: f64 },
    /// Bleached when the value compares against a fixed cutoff in the given
    /// direction.
    FixedThreshold { value: f64, direction: Direction },
}

impl BleachingRule {
    /// Quantile rules require q strictly inside (0, 1).
    pub fn validate(&self) -> Result<()> {
        match *self {
            BleachingRule::LowQuantile { q } | BleachingRule::HighQuantile { q } => {
                if q > 0.0 && q < 1.0 {
                    Ok(())
                } else {
                    Err(Error::InvalidQuantile(q))
                }
            }
            BleachingRule::FixedThreshold { .. } => Ok(()),
        }
    }

    /// Short human-readable rendering for report headers and logs.
    pub fn describe(&self) -> String {
        match *self {
            BleachingRule::LowQuantile { q } => format!("low-quantile(q={q})"),
            BleachingRule::HighQuantile { q } => format!("high-quantile(q={q})"),
            BleachingRule::FixedThreshold { value, direction } => match direction {
                Direction::Above => format!("fixed(> {value})"),
                Direction::Below => format!("fixed(< {value})"),
            },
        }
    }
}

/// Label every value against `rule`, aligned 1:1 with input order.
///
/// Quantile cutoffs are computed over the whole batch, so a row's label
/// depends on the batch composition but never on row order. All comparisons
/// are strict, which makes a batch of identical values all-false under both
/// quantile rules.
pub fn classify(values: &[f64], rule: &BleachingRule) -> Result<Vec<bool>> {
    rule.validate()?;
    if values.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let labels = match *rule {
        BleachingRule::LowQuantile { q } => {
            let cutoff = stats::quantile(values, q)?;
            values.iter().map(|&value| value < cutoff).collect()
        }
        BleachingRule::HighQuantile { q } => {
            let cutoff = stats::quantile(values, q)?;
            values.iter().map(|&value| value > cutoff).collect()
        }
        BleachingRule::FixedThreshold { value: cutoff, direction } => values
            .iter()
            .map(|&value| match direction {
                Direction::Above => value > cutoff,
                Direction::Below => value < cutoff,
            })
            .collect(),
    };
    Ok(labels)
}

/// Pair typed records with their derived labels.
pub fn classify_records(
    records: &[RegionRecord],
    rule: &BleachingRule,
) -> Result<Vec<ClassifiedRecord>> {
    let metrics: Vec<f64> = records.iter().map(|record| record.metric).collect();
    let labels = classify(&metrics, rule)?;
    Ok(records
        .iter()
        .cloned()
        .zip(labels)
        .map(|(record, bleached)| ClassifiedRecord { record, bleached })
        .collect())
}

/// Everything the writers need about one classification run.
///
/// `dataset` and `labels` carry the column-for-column export; `records` is
/// the typed view used by the terminal report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub generated_at: DateTime<Utc>,
    pub metric_column: String,
    pub label_column: String,
    pub rule: BleachingRule,
    pub dataset: TabularDataset,
    pub labels: Vec<bool>,
    pub records: Vec<ClassifiedRecord>,
}

impl ClassificationReport {
    pub fn bleached_rows(&self) -> usize {
        self.labels.iter().filter(|&&label| label).count()
    }

    pub fn total_rows(&self) -> usize {
        self.labels.len()
    }
}

/// Classify a loaded dataset on a named numeric column.
///
/// `region_column`, when present, names the column used as the region label
/// of the typed records; rows fall back to their 1-based index otherwise.
pub fn classify_dataset(
    dataset: &TabularDataset,
    metric_column: &str,
    region_column: Option<&str>,
    rule: &BleachingRule,
    label_column: &str,
) -> Result<ClassificationReport> {
    let metrics = dataset.numeric_column(metric_column)?;
    let labels = classify(&metrics, rule)?;

    let region_names = match region_column {
        Some(column) => dataset.text_column(column)?,
        None => (1..=dataset.len()).map(|row| format!("row {row}")).collect(),
    };
    let records = region_names
        .into_iter()
        .zip(&metrics)
        .zip(&labels)
        .map(|((region, &metric), &bleached)| ClassifiedRecord {
            record: RegionRecord { region, metric },
            bleached,
        })
        .collect();

    Ok(ClassificationReport {
        generated_at: Utc::now(),
        metric_column: metric_column.to_string(),
        label_column: label_column.to_string(),
        rule: *rule,
        dataset: dataset.clone(),
        labels,
        records,
    })
}
