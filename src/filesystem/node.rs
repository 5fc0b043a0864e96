use chrono::{DateTime, Local};
use derive_more::Display;
use hashlink::LinkedHashMap;
use snafu::OptionExt;

use crate::filesystem::error::{AlreadyExistsSnafu, NotADirectorySnafu, NotFoundSnafu};
use crate::filesystem::FsError;

/// Cosmetic permission label every node reports.
pub const ACCESS_MODE: &str = "Read / Write";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Handle of a node inside a [`Tree`](super::Tree) arena.
///
/// Handles are never reused, so a handle to a deleted node stays dangling
/// instead of silently pointing at a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct NodeId(pub(super) usize);

/// Whether a listing or search record describes a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryKind {
    #[display("Dir")]
    Directory,
    #[display("File")]
    File,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    File {
        extension: String,
    },
    /// Children keyed by name, in insertion order. This map is the only
    /// owning edge between a directory and its children.
    Directory {
        children: LinkedHashMap<String, NodeId>,
    },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(super) name: String,
    pub(super) kind: NodeKind,
    pub(super) parent: Option<NodeId>,
    created_at: DateTime<Local>,
    modified_at: DateTime<Local>,
    size: u64,
}

impl Node {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let extension = extension_of(&name).to_string();
        Self::new(name, NodeKind::File { extension }, size)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(
            name.into(),
            NodeKind::Directory {
                children: LinkedHashMap::new(),
            },
            0,
        )
    }

    fn new(name: String, kind: NodeKind, size: u64) -> Self {
        let now = Local::now();
        Self {
            name,
            kind,
            parent: None,
            created_at: now,
            modified_at: now,
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Local> {
        self.modified_at
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn access_mode(&self) -> &'static str {
        ACCESS_MODE
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::File { .. } => EntryKind::File,
            NodeKind::Directory { .. } => EntryKind::Directory,
        }
    }

    /// Extension of a file, `None` for directories.
    pub fn extension(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { extension } => Some(extension),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn format_size(&self) -> String {
        format_size(self.size)
    }

    /// Human readable file classification, `None` for directories.
    pub fn file_type(&self) -> Option<String> {
        self.extension().map(file_type_for)
    }

    /// The classification shown in metadata views.
    pub fn type_label(&self) -> String {
        self.file_type().unwrap_or_else(|| "Directory".to_string())
    }

    pub fn children(&self) -> Option<&LinkedHashMap<String, NodeId>> {
        match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub fn get_child(&self, name: &str) -> Option<NodeId> {
        self.children().and_then(|children| children.get(name).copied())
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.get_child(name).is_some()
    }

    /// Files count as empty.
    pub fn is_empty(&self) -> bool {
        self.children().is_none_or(|children| children.is_empty())
    }

    /// Registers `id` under `name`, failing if the name is taken or this
    /// node is a file.
    pub(super) fn add_child(&mut self, name: &str, id: NodeId) -> Result<(), FsError> {
        let NodeKind::Directory { children } = &mut self.kind else {
            return NotADirectorySnafu { name: &self.name }.fail();
        };
        if children.contains_key(name) {
            return AlreadyExistsSnafu { name }.fail();
        }
        children.insert(name.to_string(), id);
        self.touch();
        Ok(())
    }

    /// Unlinks the child called `name` and hands back its handle.
    pub(super) fn remove_child(&mut self, name: &str) -> Result<NodeId, FsError> {
        let NodeKind::Directory { children } = &mut self.kind else {
            return NotADirectorySnafu { name: &self.name }.fail();
        };
        let id = children.remove(name).context(NotFoundSnafu { name })?;
        self.touch();
        Ok(id)
    }

    /// Changes the name, re-deriving the extension of files. Timestamps stay.
    pub(super) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        if let NodeKind::File { extension } = &mut self.kind {
            *extension = extension_of(name).to_string();
        }
    }

    fn touch(&mut self) {
        self.modified_at = Local::now();
    }
}

/// The part of `name` after its last `.`, or `""` when there is none.
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default()
}

pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

pub fn file_type_for(extension: &str) -> String {
    let ext = extension.to_lowercase();
    let known = match ext.as_str() {
        "pdf" => "PDF Document",
        "doc" | "docx" => "Word Document",
        "txt" => "Text Document",
        "png" => "PNG Image",
        "jpg" | "jpeg" => "JPEG Image",
        "mp3" => "Audio File",
        "mp4" => "Video File",
        "" => "Unknown File Type",
        _ => return format!("{} File", ext.to_uppercase()),
    };
    known.to_string()
}
