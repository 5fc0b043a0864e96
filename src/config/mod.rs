#[allow(clippy::module_inception)]
pub mod config;

pub use config::{ConfigError, FileConfig, default_config_path};
