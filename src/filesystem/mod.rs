//! In-memory filesystem simulation.
//!
//! This module provides a tree of files and directories held in an arena,
//! and a manager that mutates and queries it under one of three classic
//! directory-structure policies (single-level, two-level, hierarchical).

mod error;
mod log;
mod manager;
mod mode;
mod node;
mod pattern;
mod records;
mod render;
mod tree;

pub use error::FsError;
pub use manager::FileSystemManager;
pub use mode::Mode;
pub use node::{EntryKind, Node, NodeId, format_size};
pub use records::{DirectoryEntry, NodeInfo, SearchMatch};
pub use tree::Tree;
