//! Browser bindings for the explorer engine.
//!
//! Provides:
//! - [`HttpFileApi`] - Backend client over the Fetch API
//! - [`LiveSocket`] - Socket.IO live channel with reconnection
//! - [`LocalStorage`] - Persisted key-value storage
//! - [`BrowserDelay`], [`Debouncer`] - Timers
//! - [`logger`] - `log` backend for the browser console

pub mod dom;
mod fetch;
pub mod logger;
mod socket;
pub mod storage;
pub mod timer;

pub use fetch::HttpFileApi;
pub use socket::LiveSocket;
pub use storage::LocalStorage;
pub use timer::{BrowserDelay, Debouncer};
