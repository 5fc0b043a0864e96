use std::io;

use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::{RuntimeConfig, config_location};
use crate::cli::{Cli, Shell, run_demo};
use crate::config::{ConfigError, FileConfig};
use crate::filesystem::FileSystemManager;

pub struct Application;

impl Application {
    pub fn run(cli: Cli) -> Result<(), ApplicationError> {
        let (config_path, required) = config_location(&cli);
        let file_config = FileConfig::read(&config_path, required).context(ConfigLoadSnafu)?;
        debug!("Loaded config: {:?}", file_config);

        let terminal_color = supports_color::on(Stream::Stdout).is_some();
        let runtime_config = RuntimeConfig::resolve(&cli, &file_config, terminal_color);
        colored::control::set_override(runtime_config.color);
        info!("Starting with {:?}", runtime_config);

        let stdout = io::stdout();
        if runtime_config.demo {
            return run_demo(&mut stdout.lock()).context(TerminalSnafu);
        }

        let fs = FileSystemManager::new(runtime_config.mode);
        Shell::new(fs, stdout.lock(), runtime_config.color)
            .run(io::stdin().lock())
            .context(TerminalSnafu)?;

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the configuration"))]
    ConfigLoadError { source: ConfigError },
    #[snafu(display("Failed to talk to the terminal"))]
    TerminalError { source: io::Error },
}
