use std::{
    borrow::Cow,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::Mode;

pub const CONFIG_FILE_NAME: &str = "dirsim.yaml";

pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Settings read from `dirsim.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub mode: Option<Mode>,
    pub color: Option<bool>,
}

impl FileConfig {
    /// Reads the config at `path`. When `required` is false a missing file
    /// yields the defaults instead of an error.
    pub fn read(path: &Path, required: bool) -> Result<Self, ConfigError> {
        debug!("Opening config file: {}", path.display());
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).context(ReadSnafu {
                    file_path: path.display().to_string(),
                });
            }
        };
        debug!("Successfully read config file: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    fn parse_mode(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Option<Mode>, ConfigError> {
        let Some(value) = top_level.get(&key("mode")) else {
            return Ok(None);
        };
        let raw = value.as_str().context(InvalidModeValueSnafu {
            value: format!("{value:?}"),
        })?;
        raw.parse::<Mode>()
            .ok()
            .map(Some)
            .context(InvalidModeValueSnafu { value: raw })
    }

    fn parse_color(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Option<bool>, ConfigError> {
        let Some(value) = top_level.get(&key("color")) else {
            return Ok(None);
        };
        match value {
            Yaml::Value(Scalar::Boolean(color)) => Ok(Some(*color)),
            _ => InvalidColorValueSnafu {
                value: format!("{value:?}"),
            }
            .fail(),
        }
    }
}

fn key(name: &'static str) -> Yaml<'static> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

impl TryFrom<&str> for FileConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            // An empty file is treated as an empty config
            return Ok(Self::default());
        };
        ensure!(documents.len() == 1, MalformedConfigSnafu);

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;
        for (name, _) in top_level.iter() {
            match name.as_str() {
                Some("mode" | "color") => {}
                _ => debug!("Ignoring unknown config key: {:?}", name),
            }
        }

        Ok(FileConfig {
            mode: Self::parse_mode(top_level)?,
            color: Self::parse_color(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file, expected a single document"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display(
        "Invalid mode {} in config, expected single, two-level or hierarchical",
        value
    ))]
    InvalidModeValue { value: String },
    #[snafu(display("Invalid color {} in config, expected true or false", value))]
    InvalidColorValue { value: String },
}
