//! Clock, delays and debouncing.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;

use crate::core::tree_store::Delay;

/// Current Unix time in seconds.
#[cfg(target_arch = "wasm32")]
pub fn unix_now() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

/// Current Unix time in seconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// [`Delay`] backed by `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDelay;

impl Delay for BrowserDelay {
    async fn delay(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

/// Runs the latest scheduled callback once input has been quiet for a while.
///
/// Scheduling again before the timeout fires cancels the pending call.
/// Dropping the debouncer cancels it too.
#[derive(Clone)]
pub struct Debouncer {
    quiet_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(quiet_ms: u32) -> Self {
        Self {
            quiet_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn schedule(&self, f: impl FnOnce() + 'static) {
        let timeout = Timeout::new(self.quiet_ms, f);
        // Replacing drops (and so cancels) the previous timeout
        self.pending.borrow_mut().replace(timeout);
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}
