use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::classify::classify_dataset;
use crate::config::{load_config, ClassificationConfig, RuleKind};
use crate::io::csv::read_dataset;
use crate::io::output::{create_writer, output_target, OutputFormat};

/// Effective `classify` settings after flag parsing.
pub struct ClassifyArgs {
    pub input: PathBuf,
    pub metric_column: Option<String>,
    pub region_column: Option<String>,
    pub rule: Option<RuleKind>,
    pub quantile: Option<f64>,
    pub threshold: Option<f64>,
    pub direction: Option<crate::classify::Direction>,
    pub label_column: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Merge CLI flags over the config file's classification section.
fn effective_settings(args: &ClassifyArgs, base: &ClassificationConfig) -> ClassificationConfig {
    ClassificationConfig {
        rule: args.rule.unwrap_or(base.rule),
        quantile: args.quantile.unwrap_or(base.quantile),
        threshold: args.threshold.or(base.threshold),
        direction: args.direction.unwrap_or(base.direction),
        metric_column: args
            .metric_column
            .clone()
            .unwrap_or_else(|| base.metric_column.clone()),
        region_column: args.region_column.clone().or_else(|| base.region_column.clone()),
        label_column: args
            .label_column
            .clone()
            .unwrap_or_else(|| base.label_column.clone()),
    }
}

pub fn handle_classify(args: ClassifyArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = effective_settings(&args, &config.classification);
    let rule = settings.rule()?;

    let dataset = read_dataset(&args.input)?;
    info!(
        "classifying {} row(s) of {} with {}",
        dataset.len(),
        args.input.display(),
        rule.describe()
    );

    let report = classify_dataset(
        &dataset,
        &settings.metric_column,
        settings.region_column.as_deref(),
        &rule,
        &settings.label_column,
    )?;
    info!(
        "{} of {} row(s) flagged bleached",
        report.bleached_rows(),
        report.total_rows()
    );

    let mut writer = create_writer(args.format, output_target(args.output.as_deref())?);
    writer.write_classification(&report)
}
