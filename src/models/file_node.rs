use serde::{Deserialize, Serialize};

// =============================================================================
// Wire Format
// =============================================================================

/// Node shape as sent by the backend (`GET /project/files`).
///
/// Folders carry a `children` array (possibly empty); files carry `null`
/// or omit the key entirely.
#[derive(Clone, Debug, Deserialize, Serialize)]
struct RawNode {
    name: String,
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modified: Option<u64>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

impl From<RawNode> for FileNode {
    fn from(raw: RawNode) -> Self {
        match raw.children {
            Some(children) => FileNode::Folder {
                name: raw.name,
                path: raw.path,
                modified: raw.modified,
                children: children.into_iter().map(FileNode::from).collect(),
            },
            None => {
                let extension = raw
                    .extension
                    .filter(|ext| !ext.is_empty())
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .or_else(|| extension_of(&raw.name));
                FileNode::File {
                    name: raw.name,
                    path: raw.path,
                    extension,
                    modified: raw.modified,
                }
            }
        }
    }
}

impl From<FileNode> for RawNode {
    fn from(node: FileNode) -> Self {
        match node {
            FileNode::File {
                name,
                path,
                extension,
                modified,
            } => RawNode {
                name,
                path,
                extension,
                modified,
                children: None,
            },
            FileNode::Folder {
                name,
                path,
                children,
                modified,
            } => RawNode {
                name,
                path,
                extension: None,
                modified,
                children: Some(children.into_iter().map(RawNode::from).collect()),
            },
        }
    }
}

/// Derive a file extension from its name.
///
/// Returns the text after the last `.`, or `None` for names without a dot
/// and for dotfiles such as `.gitignore`.
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_string())
}

// =============================================================================
// FileNode
// =============================================================================

/// A file or folder of the project tree.
///
/// `path` is unique across the tree and doubles as the key for selection
/// and expansion tracking. A folder's path is a strict prefix of every
/// descendant's path.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum FileNode {
    File {
        name: String,
        path: String,
        extension: Option<String>,
        /// Last modification time (Unix seconds)
        modified: Option<u64>,
    },
    Folder {
        name: String,
        path: String,
        children: Vec<FileNode>,
        /// Last modification time (Unix seconds)
        modified: Option<u64>,
    },
}

impl FileNode {
    /// Create a file node, deriving its extension from the name.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        FileNode::File {
            extension: extension_of(&name),
            name,
            path: path.into(),
            modified: None,
        }
    }

    /// Create a folder node.
    pub fn folder(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<FileNode>,
    ) -> Self {
        FileNode::Folder {
            name: name.into(),
            path: path.into(),
            children,
            modified: None,
        }
    }

    /// Set the modification timestamp (builder style).
    pub fn with_modified(mut self, timestamp: u64) -> Self {
        match &mut self {
            FileNode::File { modified, .. } | FileNode::Folder { modified, .. } => {
                *modified = Some(timestamp);
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            FileNode::File { name, .. } | FileNode::Folder { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FileNode::File { path, .. } | FileNode::Folder { path, .. } => path,
        }
    }

    pub fn modified(&self) -> Option<u64> {
        match self {
            FileNode::File { modified, .. } | FileNode::Folder { modified, .. } => *modified,
        }
    }

    /// Extension of a file (always `None` for folders).
    pub fn extension(&self) -> Option<&str> {
        match self {
            FileNode::File { extension, .. } => extension.as_deref(),
            FileNode::Folder { .. } => None,
        }
    }

    /// Children of a folder (empty slice for files).
    pub fn children(&self) -> &[FileNode] {
        match self {
            FileNode::Folder { children, .. } => children,
            FileNode::File { .. } => &[],
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FileNode::Folder { .. })
    }

    /// Hidden entries are dotfiles and dot-folders.
    pub fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }

    /// Find a node by path anywhere in a forest.
    pub fn find<'a>(nodes: &'a [FileNode], path: &str) -> Option<&'a FileNode> {
        for node in nodes {
            if node.path() == path {
                return Some(node);
            }
            if let FileNode::Folder { children, .. } = node
                && is_within(path, node.path())
                && let Some(found) = Self::find(children, path)
            {
                return Some(found);
            }
        }
        None
    }

    /// Collect the paths of every folder in a forest, depth-first.
    pub fn folder_paths(nodes: &[FileNode]) -> Vec<String> {
        let mut paths = Vec::new();
        collect_folder_paths(nodes, &mut paths);
        paths
    }
}

fn collect_folder_paths(nodes: &[FileNode], out: &mut Vec<String>) {
    for node in nodes {
        if let FileNode::Folder { path, children, .. } = node {
            out.push(path.clone());
            collect_folder_paths(children, out);
        }
    }
}

/// Check whether `path` equals `ancestor` or lies beneath it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    let ancestor = ancestor.trim_end_matches('/');
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

// =============================================================================
// FileRef
// =============================================================================

/// Lightweight reference to a file, used for selection, tabs and recents.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileRef {
    pub name: String,
    pub path: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}
