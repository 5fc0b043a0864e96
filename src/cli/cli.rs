use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::filesystem::Mode;

/// Interactive simulator of single-level, two-level and hierarchical
/// directory structures.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Directory structure to start in. Overrides the config file
    #[clap(long, short, value_enum)]
    pub mode: Option<Mode>,

    /// Path to a YAML config file [default: dirsim.yaml, if present]
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,

    /// Run the demonstration script and exit
    #[clap(long)]
    pub demo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["dirsim"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.mode, None);
        assert_eq!(cli.config, None);
        assert!(!cli.no_color);
        assert!(!cli.demo);
    }

    #[test]
    fn parses_every_flag() {
        let cli = Cli::try_parse_from([
            "dirsim",
            "--log-level",
            "debug",
            "--mode",
            "two-level",
            "--config",
            "custom.yaml",
            "--no-color",
            "--demo",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.mode, Some(Mode::TwoLevel));
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert!(cli.no_color);
        assert!(cli.demo);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["dirsim", "--mode", "flat"]).is_err());
    }
}
