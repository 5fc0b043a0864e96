use std::str::FromStr;

use clap::ValueEnum;
use derive_more::Display;

use crate::filesystem::FsError;

/// Deepest directory a hierarchical tree may create children in.
pub const MAX_DEPTH: usize = 10;

/// The directory-structure policy the simulator is enforcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, ValueEnum)]
pub enum Mode {
    /// Every file lives in the root; no subdirectories
    #[display("single")]
    Single,
    /// The root holds one directory per user, and those hold only files
    #[display("two-level")]
    TwoLevel,
    /// Arbitrary nesting up to [`MAX_DEPTH`]
    #[default]
    #[display("hierarchical")]
    Hierarchical,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Single, Mode::TwoLevel, Mode::Hierarchical];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Single => "Single-Level",
            Mode::TwoLevel => "Two-Level",
            Mode::Hierarchical => "Hierarchical",
        }
    }

    /// Whether `cd` is meaningful in this mode.
    pub fn allows_navigation(&self) -> bool {
        !matches!(self, Mode::Single)
    }

    /// Checks whether a directory may be created inside a directory sitting
    /// at `depth` hops below the root.
    pub fn check_directory_creation(&self, depth: usize) -> Result<(), FsError> {
        match self {
            Mode::Single => Err(FsError::UnsupportedOperation {
                operation: "Subdirectories".into(),
                mode: *self,
            }),
            Mode::TwoLevel if depth >= 1 => Err(FsError::DepthExceeded {
                max_levels: 2,
                mode: *self,
            }),
            Mode::Hierarchical if depth >= MAX_DEPTH => Err(FsError::DepthExceeded {
                max_levels: MAX_DEPTH,
                mode: *self,
            }),
            _ => Ok(()),
        }
    }
}

impl FromStr for Mode {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.to_string() == s)
            .ok_or_else(|| FsError::InvalidMode { mode: s.to_string() })
    }
}
