//! Tree filtering for the explorer search box.
//!
//! [`filter_tree`] derives a new tree that keeps every node matching the
//! query plus the ancestors needed to reach it. The canonical tree is never
//! touched; retained nodes are fresh copies.

use regex::{Regex, RegexBuilder};

use crate::models::{FileNode, SearchFilters};
use crate::utils::timer;

/// Characters that split a name into words for whole-word matching.
const WORD_SEPARATORS: &[char] = &[' ', '-', '_', '.', '/'];

// =============================================================================
// Query
// =============================================================================

/// A search term with its filters and the reference time for
/// `modified_within`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub filters: SearchFilters,
    /// Reference time in Unix seconds
    pub now: u64,
}

impl SearchQuery {
    /// Build a query stamped with the current time.
    pub fn new(term: impl Into<String>, filters: SearchFilters) -> Self {
        Self::at(term, filters, timer::unix_now())
    }

    /// Build a query with an explicit reference time.
    pub fn at(term: impl Into<String>, filters: SearchFilters, now: u64) -> Self {
        Self {
            term: term.into(),
            filters,
            now,
        }
    }

    /// An empty term disables filtering entirely.
    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }
}

// =============================================================================
// Predicate
// =============================================================================

/// Name matcher compiled once per query.
enum NameMatcher {
    Regex(Regex),
    /// The pattern failed to compile: nothing matches.
    InvalidRegex,
    WholeWord { term: String, case_sensitive: bool },
    Substring { needle: String, case_sensitive: bool },
}

impl NameMatcher {
    fn new(term: &str, filters: &SearchFilters) -> Self {
        if filters.regex {
            return match RegexBuilder::new(term)
                .case_insensitive(!filters.case_sensitive)
                .build()
            {
                Ok(re) => NameMatcher::Regex(re),
                Err(e) => {
                    log::debug!("Invalid search pattern '{}': {}", term, e);
                    NameMatcher::InvalidRegex
                }
            };
        }

        let case_sensitive = filters.case_sensitive;
        let folded = if case_sensitive {
            term.to_string()
        } else {
            term.to_lowercase()
        };

        if filters.whole_word {
            NameMatcher::WholeWord {
                term: folded,
                case_sensitive,
            }
        } else {
            NameMatcher::Substring {
                needle: folded,
                case_sensitive,
            }
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Regex(re) => re.is_match(name),
            NameMatcher::InvalidRegex => false,
            NameMatcher::WholeWord {
                term,
                case_sensitive,
            } => name.split(WORD_SEPARATORS).any(|token| {
                if *case_sensitive {
                    token == term
                } else {
                    token.to_lowercase() == *term
                }
            }),
            NameMatcher::Substring {
                needle,
                case_sensitive,
            } => {
                if *case_sensitive {
                    name.contains(needle.as_str())
                } else {
                    name.to_lowercase().contains(needle.as_str())
                }
            }
        }
    }
}

struct Predicate<'a> {
    name: NameMatcher,
    query: &'a SearchQuery,
}

impl<'a> Predicate<'a> {
    fn new(query: &'a SearchQuery) -> Self {
        Self {
            name: NameMatcher::new(&query.term, &query.filters),
            query,
        }
    }

    /// Hidden entries are pruned together with their subtree, unless the
    /// entry's own name matches the term.
    fn excludes_subtree(&self, node: &FileNode) -> bool {
        !self.query.filters.show_hidden && node.is_hidden() && !self.name.matches(node.name())
    }

    /// File-only attribute filters: extension and modification time.
    fn matches_file_attributes(&self, node: &FileNode) -> bool {
        let filters = &self.query.filters;

        if !filters.file_types.is_empty() {
            let ext = node.extension().map(str::to_lowercase);
            if !ext.is_some_and(|ext| filters.file_types.contains(&ext)) {
                return false;
            }
        }

        if let Some(window) = filters.modified_within {
            let Some(modified) = node.modified() else {
                return false;
            };
            if self.query.now.saturating_sub(modified) > window.as_secs() {
                return false;
            }
        }

        true
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Derive the filtered tree for a query.
///
/// - A file is kept iff its name matches and it passes the attribute filters.
/// - A folder is kept iff its name matches or any child is kept; its children
///   are always the filtered list, in original order.
/// - An empty term returns a copy of the input unchanged.
pub fn filter_tree(nodes: &[FileNode], query: &SearchQuery) -> Vec<FileNode> {
    if !query.is_active() {
        return nodes.to_vec();
    }
    let predicate = Predicate::new(query);
    filter_nodes(nodes, &predicate)
}

fn filter_nodes(nodes: &[FileNode], predicate: &Predicate<'_>) -> Vec<FileNode> {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, predicate))
        .collect()
}

fn filter_node(node: &FileNode, predicate: &Predicate<'_>) -> Option<FileNode> {
    if predicate.excludes_subtree(node) {
        return None;
    }

    match node {
        FileNode::File { name, .. } => (predicate.name.matches(name)
            && predicate.matches_file_attributes(node))
        .then(|| node.clone()),
        FileNode::Folder {
            name,
            path,
            children,
            modified,
        } => {
            let kept = filter_nodes(children, predicate);
            (predicate.name.matches(name) || !kept.is_empty()).then(|| FileNode::Folder {
                name: name.clone(),
                path: path.clone(),
                children: kept,
                modified: *modified,
            })
        }
    }
}
