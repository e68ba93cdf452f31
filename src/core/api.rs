//! Backend API seam.
//!
//! [`FileApi`] is the boundary between the engine and the remote project
//! service. The browser implementation lives in `utils::fetch`; tests use
//! in-memory mocks.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::UPSTREAM_USER_PREFIX;
use crate::core::error::FetchError;
use crate::models::FileNode;

// =============================================================================
// API Trait
// =============================================================================

/// Remote operations on the project tree.
///
/// All paths passed in are already normalized by the reconciler.
#[allow(async_fn_in_trait)]
pub trait FileApi {
    /// `GET /project/files`
    async fn fetch_tree(&self) -> Result<Vec<FileNode>, FetchError>;
    /// `POST /project/file/create` with `{ filePath }`
    async fn create_file(&self, path: &str) -> Result<(), FetchError>;
    /// `POST /project/folder/create` with `{ folderPath }`
    async fn create_folder(&self, path: &str) -> Result<(), FetchError>;
    /// `DELETE /project/file/delete` with `{ filePath }`
    async fn delete_file(&self, path: &str) -> Result<(), FetchError>;
    /// `DELETE /project/folder/delete` with `{ folderPath }`
    async fn delete_folder(&self, path: &str) -> Result<(), FetchError>;
    /// `PATCH /project/file/rename` with `{ oldPath, newPath }`
    async fn rename_file(&self, old_path: &str, new_path: &str) -> Result<(), FetchError>;
}

// =============================================================================
// Response Parsing
// =============================================================================

/// Tree payload: either a list of roots or a single root folder.
#[derive(Deserialize)]
#[serde(untagged)]
enum TreePayload {
    Forest(Vec<FileNode>),
    Root(FileNode),
}

/// Interpret a backend response.
///
/// A body carrying a string `error` field is a failure whatever the status.
/// Non-2xx responses without such a field map to [`FetchError::HttpError`];
/// a 2xx body that is not JSON maps to [`FetchError::JsonParseError`].
pub fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, FetchError> {
    let ok = (200..300).contains(&status);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !ok => return Err(FetchError::HttpError(status)),
        Err(e) => return Err(FetchError::JsonParseError(e.to_string())),
    };

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(FetchError::Backend(message.to_string()));
    }
    if !ok {
        return Err(FetchError::HttpError(status));
    }

    serde_json::from_value(value).map_err(|e| FetchError::JsonParseError(e.to_string()))
}

/// Interpret a tree response from `GET /project/files`.
pub fn parse_tree(status: u16, body: &str) -> Result<Vec<FileNode>, FetchError> {
    match parse_response::<TreePayload>(status, body)? {
        TreePayload::Forest(nodes) => Ok(nodes),
        TreePayload::Root(node) => Ok(vec![node]),
    }
}

/// Interpret a mutation response, ignoring the returned metadata.
pub fn parse_ack(status: u16, body: &str) -> Result<(), FetchError> {
    parse_response::<Value>(status, body).map(|_| ())
}

// =============================================================================
// Path Normalization
// =============================================================================

/// Strip every leading `/` from a path.
pub fn strip_leading_slashes(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Normalize a delete target: leading slashes, then the upstream
/// `../user/` prefix.
pub fn normalize_delete_path(path: &str) -> &str {
    let path = strip_leading_slashes(path);
    path.strip_prefix(UPSTREAM_USER_PREFIX).unwrap_or(path)
}

/// Last path segment.
pub fn leaf_name(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

/// Check if a file name is acceptable as a rename target.
///
/// Valid names are non-empty and contain only ASCII letters, digits,
/// spaces, `-`, `_` and `.`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Response Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_tree_forest() {
        let body = r#"[{"name":"a.js","path":"a.js","children":null}]"#;
        let tree = parse_tree(200, body).unwrap();
        assert_eq!(tree, vec![FileNode::file("a.js", "a.js")]);
    }

    #[test]
    fn test_parse_tree_single_root() {
        let body = r#"{"name":"user","path":"","children":[]}"#;
        let tree = parse_tree(200, body).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_folder());
    }

    #[test]
    fn test_parse_tree_malformed_body() {
        assert!(matches!(
            parse_tree(200, "<html>oops</html>"),
            Err(FetchError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_error_field_wins_over_status() {
        assert_eq!(
            parse_ack(200, r#"{"error":"File exists"}"#),
            Err(FetchError::Backend("File exists".to_string()))
        );
        assert_eq!(
            parse_ack(400, r#"{"error":"Bad path"}"#),
            Err(FetchError::Backend("Bad path".to_string()))
        );
    }

    #[test]
    fn test_non_2xx_without_message() {
        assert_eq!(parse_ack(500, "Internal Server Error"), Err(FetchError::HttpError(500)));
        assert_eq!(parse_ack(404, r#"{"status":"missing"}"#), Err(FetchError::HttpError(404)));
    }

    #[test]
    fn test_ack_accepts_metadata() {
        assert_eq!(parse_ack(201, r#"{"name":"a.js","path":"a.js"}"#), Ok(()));
    }

    // =========================================================================
    // Path Tests
    // =========================================================================

    #[test]
    fn test_strip_leading_slashes() {
        assert_eq!(strip_leading_slashes("///src/a.js"), "src/a.js");
        assert_eq!(strip_leading_slashes("src/a.js"), "src/a.js");
        assert_eq!(strip_leading_slashes(""), "");
    }

    #[test]
    fn test_normalize_delete_path() {
        assert_eq!(normalize_delete_path("/../user/src/a.js"), "src/a.js");
        assert_eq!(normalize_delete_path("../user/src"), "src");
        assert_eq!(normalize_delete_path("//src/a.js"), "src/a.js");
        assert_eq!(normalize_delete_path("other/../user/x"), "other/../user/x");
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("src/a.js"), "a.js");
        assert_eq!(leaf_name("a.js"), "a.js");
        assert_eq!(leaf_name("src/"), "src");
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("a.js"));
        assert!(is_valid_name("My File-1_final.txt"));
        assert!(is_valid_name(".env"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a?.js"));
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name("naïve.txt"));
        assert!(!is_valid_name("x*"));
    }
}
