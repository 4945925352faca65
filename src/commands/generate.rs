use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

use crate::config::load_config;
use crate::io::output::{create_writer, output_target, OutputFormat};
use crate::series::SeriesGenerator;

/// Effective `generate` settings after flag parsing.
pub struct GenerateArgs {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub regions: Option<Vec<String>>,
    pub aggregate: bool,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn handle_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let start = args.start.unwrap_or(config.generation.start_date);
    let end = args.end.unwrap_or(config.generation.end_date);
    let regions = args
        .regions
        .unwrap_or_else(|| config.generation.regions.clone());
    let seed = args.seed.or(config.generation.seed);

    let mut generator = match seed {
        Some(seed) => SeriesGenerator::from_seed(seed),
        None => SeriesGenerator::from_entropy(),
    };

    info!(
        "generating series: {} region(s), {start} to {end}, aggregate={}",
        regions.len(),
        args.aggregate
    );
    let points = generator.generate(start, end, &regions, args.aggregate)?;

    let mut writer = create_writer(args.format, output_target(args.output.as_deref())?);
    writer.write_series(&points)
}
