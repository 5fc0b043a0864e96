use snafu::Snafu;

use crate::filesystem::Mode;

/// Every way an operation on the simulated filesystem can be refused.
///
/// None of these are fatal: the manager leaves its tree, cursor and log
/// untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FsError {
    #[snafu(display(
        "Invalid mode '{}'. Use: single, two-level, or hierarchical",
        mode
    ))]
    InvalidMode { mode: String },
    #[snafu(display("Name cannot be empty"))]
    EmptyName,
    #[snafu(display("Invalid character '{}' in name", character))]
    InvalidCharacter { character: char },
    #[snafu(display(
        "Name exceeds maximum length of {} characters ({} given)",
        max_length,
        length
    ))]
    NameTooLong { length: usize, max_length: usize },
    #[snafu(display("'{}' already exists", name))]
    AlreadyExists { name: String },
    #[snafu(display("'{}' not found", name))]
    NotFound { name: String },
    #[snafu(display("Directory '{}' is not empty", name))]
    NotEmpty { name: String },
    #[snafu(display("{} not allowed in {} structure", operation, mode.label()))]
    UnsupportedOperation { operation: String, mode: Mode },
    #[snafu(display(
        "Maximum depth ({} levels) exceeded in {} structure",
        max_levels,
        mode.label()
    ))]
    DepthExceeded { max_levels: usize, mode: Mode },
    #[snafu(display("Path not found: '{}'", segment))]
    PathNotFound { segment: String },
    #[snafu(display("'{}' is not a directory", name))]
    NotADirectory { name: String },
    #[snafu(display("Already at root directory"))]
    AlreadyAtRoot,
}
