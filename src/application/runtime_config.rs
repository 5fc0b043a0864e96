use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::FileConfig;
use crate::filesystem::Mode;

/// Settings the application runs with after merging, highest priority
/// first, the command line, the config file and the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub mode: Mode,
    pub color: bool,
    pub demo: bool,
}

impl RuntimeConfig {
    /// `terminal_color` is whether stdout can show colors at all.
    pub fn resolve(cli: &Cli, file: &FileConfig, terminal_color: bool) -> Self {
        Self {
            mode: cli.mode.or(file.mode).unwrap_or_default(),
            color: !cli.no_color && file.color.unwrap_or(true) && terminal_color,
            demo: cli.demo,
        }
    }
}

/// Where to look for the config file and whether it has to exist.
pub fn config_location(cli: &Cli) -> (PathBuf, bool) {
    match &cli.config {
        Some(path) => (path.clone(), true),
        None => (crate::config::default_config_path(), false),
    }
}
