use rand::Rng;
use snafu::{OptionExt, ensure};
use tracing::{debug, info, warn};

use crate::filesystem::error::{
    AlreadyAtRootSnafu, AlreadyExistsSnafu, EmptyNameSnafu, NameTooLongSnafu, NotADirectorySnafu,
    NotEmptySnafu, NotFoundSnafu, PathNotFoundSnafu, UnsupportedOperationSnafu,
};
use crate::filesystem::log::{LogEntry, Operation, OperationLog, Status};
use crate::filesystem::pattern::WildcardPattern;
use crate::filesystem::render::render_children;
use crate::filesystem::{
    DirectoryEntry, EntryKind, FsError, Mode, Node, NodeId, NodeInfo, SearchMatch, Tree,
};

pub const MAX_NAME_LENGTH: usize = 255;
pub const INVALID_NAME_CHARACTERS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Sizes given to files created without one, in KiB.
const RANDOM_SIZE_KIB: std::ops::RangeInclusive<u64> = 1..=100;

/// One simulated filesystem: the node tree, the cursor into it, the active
/// structural mode and the audit log.
///
/// Every operation either succeeds completely or returns an [`FsError`]
/// leaving all of that state as it was.
#[derive(Debug, Clone)]
pub struct FileSystemManager {
    tree: Tree,
    cwd: NodeId,
    mode: Mode,
    log: OperationLog,
}

impl Default for FileSystemManager {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl FileSystemManager {
    pub fn new(mode: Mode) -> Self {
        let tree = Tree::new();
        Self {
            cwd: tree.root(),
            tree,
            mode,
            log: OperationLog::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn at_root(&self) -> bool {
        self.cwd == self.tree.root()
    }

    /// Looks up a direct child of the current directory.
    pub fn get_child(&self, name: &str) -> Option<&Node> {
        self.tree
            .get_child(self.cwd, name)
            .and_then(|id| self.tree.node(id))
    }

    /// Switches to the mode named `mode` and wipes the filesystem, even when
    /// that mode is already active.
    pub fn set_mode(&mut self, mode: &str) -> Result<String, FsError> {
        let mode = mode.parse::<Mode>()?;
        self.switch_mode(mode);
        Ok(format!(
            "Switched to {} Directory - Root cleared",
            mode.to_string().to_uppercase()
        ))
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        info!("Switching to {} mode", mode);
        self.mode = mode;
        self.reset();
    }

    /// Drops every node, returns the cursor to the root and clears the log.
    pub fn reset(&mut self) {
        debug!("Resetting filesystem ({} nodes released)", self.tree.len());
        self.tree = Tree::new();
        self.cwd = self.tree.root();
        self.log.clear();
    }

    pub fn validate_name(name: &str) -> Result<(), FsError> {
        ensure!(!name.is_empty(), EmptyNameSnafu);
        if let Some(character) = name.chars().find(|c| INVALID_NAME_CHARACTERS.contains(c)) {
            return Err(FsError::InvalidCharacter { character });
        }
        let length = name.chars().count();
        ensure!(
            length <= MAX_NAME_LENGTH,
            NameTooLongSnafu {
                length,
                max_length: MAX_NAME_LENGTH
            }
        );
        Ok(())
    }

    /// Creates a file in the current directory. Without an explicit size the
    /// file gets a random whole number of KiB between 1 and 100.
    pub fn create_file(&mut self, name: &str, size: Option<u64>) -> Result<String, FsError> {
        Self::validate_name(name)?;
        ensure!(
            !self.tree.has_child(self.cwd, name),
            AlreadyExistsSnafu { name }
        );

        let size = size.unwrap_or_else(|| rand::thread_rng().gen_range(RANDOM_SIZE_KIB) * 1024);
        let id = self.tree.add_child(self.cwd, Node::file(name, size))?;
        let formatted = crate::filesystem::format_size(size);
        debug!("Created file {} ({} bytes)", self.tree.path(id), size);

        self.log.record(
            Operation::Create,
            self.tree.path(id),
            Status::Success,
            format!("File created in {} ({})", self.cwd_label(), formatted),
        );
        Ok(format!("Created file '{name}' ({formatted})"))
    }

    pub fn create_directory(&mut self, name: &str) -> Result<String, FsError> {
        Self::validate_name(name)?;
        self.mode
            .check_directory_creation(self.tree.depth(self.cwd))?;
        ensure!(
            !self.tree.has_child(self.cwd, name),
            AlreadyExistsSnafu { name }
        );

        let id = self.tree.add_child(self.cwd, Node::directory(name))?;
        debug!("Created directory {}", self.tree.path(id));

        self.log.record(
            Operation::Mkdir,
            self.tree.path(id),
            Status::Success,
            format!("Folder created in {}", self.cwd_label()),
        );
        Ok(format!("Created directory '{name}'"))
    }

    /// Deletes a child of the current directory. Non-empty directories are
    /// only removed when `recursive` is set.
    pub fn delete(&mut self, name: &str, recursive: bool) -> Result<String, FsError> {
        let node = self.get_child(name).context(NotFoundSnafu { name })?;
        ensure!(recursive || node.is_empty(), NotEmptySnafu { name });

        let kind = node.entry_kind();
        let path = self.tree.path(node_id(&self.tree, self.cwd, name)?);
        let released = self.tree.remove_child(self.cwd, name)?;
        debug!("Deleted {} ({} nodes released)", path, released);

        self.log.record(
            Operation::Delete,
            path,
            Status::Success,
            format!("{} deleted (recursive={})", kind_word(kind), recursive),
        );
        Ok(format!("Deleted '{name}'"))
    }

    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<String, FsError> {
        Self::validate_name(new_name)?;
        let id = node_id(&self.tree, self.cwd, old_name)?;
        ensure!(
            !self.tree.has_child(self.cwd, new_name),
            AlreadyExistsSnafu { name: new_name }
        );

        let old_path = self.tree.path(id);
        let kind = self.tree.node(id).map(Node::entry_kind);
        self.tree.rename_child(self.cwd, old_name, new_name)?;
        debug!("Renamed {} to {}", old_path, self.tree.path(id));

        self.log.record(
            Operation::Rename,
            old_path,
            Status::Success,
            format!(
                "{} renamed to '{}'",
                kind.map(kind_word).unwrap_or("Node"),
                new_name
            ),
        );
        Ok(format!("Renamed '{old_name}' to '{new_name}'"))
    }

    pub fn get_info(&self, name: &str) -> Result<NodeInfo, FsError> {
        self.get_child(name)
            .map(NodeInfo::from)
            .context(NotFoundSnafu { name })
    }

    /// Moves the cursor. On success returns the new current path; on failure
    /// the cursor has not moved.
    pub fn change_directory(&mut self, path: &str) -> Result<String, FsError> {
        ensure!(
            self.mode.allows_navigation(),
            UnsupportedOperationSnafu {
                operation: "Directory navigation",
                mode: self.mode
            }
        );

        match path {
            "" | "." => return Ok(self.current_path()),
            ".." => {
                self.cwd = self.tree.parent(self.cwd).context(AlreadyAtRootSnafu)?;
                return Ok(self.current_path());
            }
            _ => {}
        }

        let target = self.resolve(path)?;
        self.cwd = target;
        debug!("Changed directory to {}", self.current_path());
        Ok(self.current_path())
    }

    /// Walks `path` from the root or the cursor without touching the cursor.
    fn resolve(&self, path: &str) -> Result<NodeId, FsError> {
        let start = if path.starts_with('/') {
            self.tree.root()
        } else {
            self.cwd
        };

        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(start, |current, segment| match segment {
                "." => Ok(current),
                ".." => Ok(self.tree.parent(current).unwrap_or(current)),
                name => {
                    let child = self
                        .tree
                        .get_child(current, name)
                        .context(PathNotFoundSnafu { segment: name })?;
                    let is_directory = self.tree.node(child).is_some_and(Node::is_directory);
                    ensure!(is_directory, NotADirectorySnafu { name });
                    Ok(child)
                }
            })
    }

    pub fn current_path(&self) -> String {
        self.tree.path(self.cwd)
    }

    /// Direct children of the cursor, directories first, then by name.
    pub fn list_contents(&self) -> Vec<DirectoryEntry> {
        let mut entries = self
            .tree
            .children(self.cwd)
            .map(|(_, node)| DirectoryEntry::from(node))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            (a.kind == EntryKind::File, &a.name).cmp(&(b.kind == EntryKind::File, &b.name))
        });
        entries
    }

    /// Finds every node below the cursor whose name matches the wildcard
    /// `query`, in pre-order.
    pub fn search(&mut self, query: &str) -> Vec<SearchMatch> {
        let mut results = Vec::new();
        match WildcardPattern::new(query) {
            Ok(pattern) => self.collect_matches(self.cwd, &pattern, &mut results),
            Err(e) => warn!("Could not compile search pattern '{}': {}", query, e),
        }
        debug!("Search for '{}' found {} match(es)", query, results.len());

        match results.first() {
            Some(first) => {
                let found_in = first
                    .path
                    .rsplit('/')
                    .nth(1)
                    .filter(|parent| !parent.is_empty())
                    .unwrap_or("Root");
                let details = format!("{} result(s), first found in {}", results.len(), found_in);
                self.log
                    .record(Operation::Search, query, Status::Success, details);
            }
            None => {
                self.log
                    .record(Operation::Search, query, Status::NoResults, "No results found");
            }
        }
        results
    }

    fn collect_matches(&self, dir: NodeId, pattern: &WildcardPattern, results: &mut Vec<SearchMatch>) {
        for (id, node) in self.tree.children(dir) {
            if pattern.matches(node.name()) {
                results.push(SearchMatch {
                    name: node.name().to_string(),
                    path: self.tree.path(id),
                    kind: node.entry_kind(),
                    size: node.format_size(),
                });
            }
            if node.is_directory() {
                self.collect_matches(id, pattern, results);
            }
        }
    }

    /// Renders the subtree below the cursor.
    pub fn get_tree(&self) -> String {
        render_children(&self.tree, self.cwd)
    }

    /// Renders the whole filesystem under a `Root/` heading.
    pub fn get_full_tree(&self) -> String {
        let body = render_children(&self.tree, self.tree.root());
        if body.is_empty() {
            "Root/".to_string()
        } else {
            format!("Root/\n{body}")
        }
    }

    pub fn get_logs(&self) -> &[LogEntry] {
        self.log.entries()
    }

    fn cwd_label(&self) -> String {
        match self.tree.node(self.cwd).map(Node::name) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "Root".to_string(),
        }
    }
}

fn node_id(tree: &Tree, dir: NodeId, name: &str) -> Result<NodeId, FsError> {
    tree.get_child(dir, name).context(NotFoundSnafu { name })
}

fn kind_word(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "Folder",
        EntryKind::File => "File",
    }
}
