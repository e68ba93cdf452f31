//! UI components built with Leptos.
//!
//! - [`explorer`] - Project file explorer (tree, search, tabs, actions)
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod explorer;
pub mod icons;
