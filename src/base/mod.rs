/// Defines the framework config.
pub mod config;

pub use config::{config, init_config, load_config, Config};

use anyhow::Context;
use std::fs;

/// Starts logging as the given config describes, creating the log directory if needed.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    fs::create_dir_all(&config.log_directory).with_context(|| {
        format!(
            "Failed to create log directory {}",
            config.log_directory.display()
        )
    })?;

    modbase_util::logging::init_logger(&config.log_filter, &config.log_directory)
}
