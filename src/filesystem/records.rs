use crate::ext::TimestampExt;
use crate::filesystem::{EntryKind, Node};

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: String,
    pub created: String,
}

impl From<&Node> for DirectoryEntry {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name().to_string(),
            kind: node.entry_kind(),
            size: node.format_size(),
            created: node.created_at().listing_stamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub size: String,
}

/// Metadata shown by `info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    pub size: String,
    pub file_type: String,
    pub access_mode: String,
    pub created_on: String,
}

impl NodeInfo {
    /// The five labelled fields in display order.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("File Name", self.name.as_str()),
            ("File Size", self.size.as_str()),
            ("File Type", self.file_type.as_str()),
            ("Access Mode", self.access_mode.as_str()),
            ("Created On", self.created_on.as_str()),
        ]
    }
}

impl From<&Node> for NodeInfo {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name().to_string(),
            size: node.format_size(),
            file_type: node.type_label(),
            access_mode: node.access_mode().to_string(),
            created_on: node.created_at().info_stamp(),
        }
    }
}
