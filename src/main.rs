use anyhow::Result;
use clap::Parser;
use reefmap::cli::{Cli, Commands};
use reefmap::commands::{
    handle_classify, handle_generate, handle_score, init_config, ClassifyArgs, GenerateArgs,
    ScoreArgs,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            start,
            end,
            regions,
            aggregate,
            seed,
            format,
            output,
            config,
        } => handle_generate(GenerateArgs {
            start,
            end,
            regions,
            aggregate,
            seed,
            format: format.into(),
            output,
            config,
        }),
        Commands::Classify {
            input,
            metric_column,
            region_column,
            rule,
            quantile,
            threshold,
            direction,
            label_column,
            format,
            output,
            config,
        } => handle_classify(ClassifyArgs {
            input,
            metric_column,
            region_column,
            rule: rule.map(Into::into),
            quantile,
            threshold,
            direction: direction.map(Into::into),
            label_column,
            format: format.into(),
            output,
            config,
        }),
        Commands::Score {
            answers,
            quiz,
            format,
            output,
        } => handle_score(ScoreArgs {
            answers,
            quiz,
            format: format.into(),
            output,
        }),
        Commands::Init { force } => init_config(force),
    }
}
