//! CLI command implementations for reefmap operations.
//!
//! Each submodule handles one subcommand: resolving effective settings from
//! flags and configuration, running the corresponding pipeline, and handing
//! the result to an output writer.
//!
//! Available commands:
//! - **generate**: simulate the annual bleaching-index series
//! - **classify**: label dataset rows as bleached under an explicit rule
//! - **score**: score a quiz submission against the answer key
//! - **init**: initialize a new reefmap configuration file

pub mod classify;
pub mod generate;
pub mod init;
pub mod score;

pub use classify::{handle_classify, ClassifyArgs};
pub use generate::{handle_generate, GenerateArgs};
pub use init::init_config;
pub use score::{handle_score, ScoreArgs};
