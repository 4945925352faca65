use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".reefmap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Reefmap Configuration

[generation]
start_date = "1980-01-01"
end_date = "2020-08-31"
regions = [
    "South Korea",
    "Australia",
    "Indonesia",
    "Philippines",
    "Japan",
    "Maldives",
    "Hawaii",
]
# seed = 42

[classification]
# One of: "low-quantile", "high-quantile", "fixed"
rule = "low-quantile"
quantile = 0.2
# threshold = 30.0
# direction = "above"
metric_column = "coral_cover"
# region_column = "region"
label_column = "bleached"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .reefmap.toml configuration file");

    Ok(())
}
