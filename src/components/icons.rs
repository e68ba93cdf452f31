//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronDown as ChevronDown, LuChevronRight as ChevronRight,
        LuChevronsDownUp as CollapseAll, LuChevronsUpDown as ExpandAll, LuFile as File,
        LuFilePlus as FilePlus, LuFolder as Folder, LuFolderOpen as FolderOpen,
        LuFolderPlus as FolderPlus, LuHistory as Recent, LuPencil as Edit,
        LuRefreshCw as Refresh, LuSearch as Search, LuTrash2 as Trash, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowsCollapse as CollapseAll,
        BsArrowsExpand as ExpandAll, BsChevronDown as ChevronDown,
        BsChevronRight as ChevronRight, BsClockHistory as Recent, BsFileEarmark as File,
        BsFileEarmarkPlus as FilePlus, BsFolder2Open as FolderOpen, BsFolderFill as Folder,
        BsFolderPlus as FolderPlus, BsPencil as Edit, BsSearch as Search, BsTrash as Trash,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(FILE, File);
themed_icon!(SEARCH, Search);
themed_icon!(CLOSE, Close);
themed_icon!(REFRESH, Refresh);
themed_icon!(NEW_FILE, FilePlus);
themed_icon!(NEW_FOLDER, FolderPlus);
themed_icon!(DELETE, Trash);
themed_icon!(EDIT, Edit);
themed_icon!(RECENT, Recent);
themed_icon!(EXPAND_ALL, ExpandAll);
themed_icon!(COLLAPSE_ALL, CollapseAll);
