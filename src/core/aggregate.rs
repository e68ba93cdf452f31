//! Result counts for a filtered tree.

use crate::models::{FileNode, SearchSummary};

/// Count files and folders in a (filtered) forest.
///
/// Every node present is counted exactly once.
pub fn aggregate(nodes: &[FileNode]) -> SearchSummary {
    let mut summary = SearchSummary::default();
    count_into(nodes, &mut summary);
    summary
}

fn count_into(nodes: &[FileNode], summary: &mut SearchSummary) {
    for node in nodes {
        match node {
            FileNode::File { .. } => summary.total_files += 1,
            FileNode::Folder { children, .. } => {
                summary.total_folders += 1;
                count_into(children, summary);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{SearchQuery, filter_tree};
    use crate::models::SearchFilters;

    fn count_nodes(nodes: &[FileNode]) -> usize {
        nodes.iter().map(|n| 1 + count_nodes(n.children())).sum()
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(aggregate(&[]), SearchSummary::default());
    }

    #[test]
    fn test_filtered_sample() {
        let tree = vec![FileNode::folder(
            "src",
            "src",
            vec![
                FileNode::file("a.js", "src/a.js"),
                FileNode::file("b.py", "src/b.py"),
            ],
        )];
        let filtered = filter_tree(&tree, &SearchQuery::at("a", SearchFilters::default(), 0));
        assert_eq!(
            aggregate(&filtered),
            SearchSummary {
                total_files: 1,
                total_folders: 1,
            }
        );
    }

    #[test]
    fn test_nested_folders_counted_once() {
        let tree = vec![FileNode::folder(
            "a",
            "a",
            vec![
                FileNode::folder(
                    "b",
                    "a/b",
                    vec![
                        FileNode::file("x1", "a/b/x1"),
                        FileNode::file("x2", "a/b/x2"),
                        FileNode::folder("c", "a/b/c", vec![FileNode::file("x3", "a/b/c/x3")]),
                    ],
                ),
                FileNode::file("x4", "a/x4"),
            ],
        )];

        let summary = aggregate(&tree);
        assert_eq!(summary.total_folders, 3);
        assert_eq!(summary.total_files, 4);
        assert_eq!(summary.total_files + summary.total_folders, count_nodes(&tree));
    }

    #[test]
    fn test_empty_folder_counts_as_folder() {
        let tree = vec![FileNode::folder("empty", "empty", vec![])];
        assert_eq!(
            aggregate(&tree),
            SearchSummary {
                total_files: 0,
                total_folders: 1,
            }
        );
    }
}
