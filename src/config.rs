//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the explorer.

use crate::utils::dom;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the explorer header.
pub const APP_NAME: &str = "Explorer";

/// Maximum log level forwarded to the console.
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

// =============================================================================
// Backend Configuration
// =============================================================================

/// Backend base URL used when no override is stored.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";

/// localStorage key holding a base URL override.
pub const API_BASE_URL_KEY: &str = "explorer.api_base_url";

/// REST endpoint paths (relative to the base URL).
pub mod endpoints {
    pub const FILES: &str = "/project/files";
    pub const FILE_CREATE: &str = "/project/file/create";
    pub const FOLDER_CREATE: &str = "/project/folder/create";
    pub const FILE_DELETE: &str = "/project/file/delete";
    pub const FOLDER_DELETE: &str = "/project/folder/delete";
    pub const FILE_RENAME: &str = "/project/file/rename";
}

/// Prefix the backend prepends to paths relative to the user's home.
pub const UPSTREAM_USER_PREFIX: &str = "../user/";

// =============================================================================
// Tree Store Configuration
// =============================================================================

/// Total fetch attempts before the tree store gives up.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

/// Backoff unit; the wait after attempt `n` is `n * RETRY_BACKOFF_MS`.
pub const RETRY_BACKOFF_MS: u32 = 1000;

// =============================================================================
// Search Configuration
// =============================================================================

/// Quiet period before a search term is considered settled.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Choices offered by the "modified within" selector (label, seconds).
pub const MODIFIED_WITHIN_CHOICES: &[(&str, u64)] = &[
    ("Last hour", 60 * 60),
    ("Last day", 24 * 60 * 60),
    ("Last week", 7 * 24 * 60 * 60),
    ("Last month", 30 * 24 * 60 * 60),
];

// =============================================================================
// Recent Files
// =============================================================================

/// localStorage key for the recent files list.
pub const RECENT_FILES_KEY: &str = "explorer.recent_files";

/// Maximum number of recent files kept.
pub const MAX_RECENT_FILES: usize = 5;

// =============================================================================
// Live Channel
// =============================================================================

/// Live channel configuration (Socket.IO over WebSocket).
pub mod live {
    /// Socket.IO handshake path and query.
    pub const SOCKET_PATH: &str = "/socket.io/?EIO=4&transport=websocket";
    /// Event name that asks the explorer to re-fetch the tree.
    pub const REFRESH_EVENT: &str = "file:refresh";
    /// Delay before reconnecting after the socket drops.
    pub const RECONNECT_DELAY_MS: u32 = 3000;
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the explorer.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

// =============================================================================
// Runtime API Configuration
// =============================================================================

/// Resolved backend endpoints for this session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash (e.g. `http://localhost:4000`)
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the base URL: a stored override wins over the default.
    pub fn resolve() -> Self {
        let stored = dom::local_storage()
            .and_then(|storage| storage.get_item(API_BASE_URL_KEY).ok().flatten())
            .filter(|url| !url.trim().is_empty());

        match stored {
            Some(url) => {
                log::info!("Using API base URL override: {}", url);
                Self::new(&url)
            }
            None => Self::new(DEFAULT_API_BASE_URL),
        }
    }

    /// Full URL for an endpoint path.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// WebSocket URL of the live channel.
    pub fn socket_url(&self) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.base_url.clone()
        };
        format!("{}{}", ws_base, live::SOCKET_PATH)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
