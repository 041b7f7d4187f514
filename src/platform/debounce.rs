//! Timer-backed debouncing for bursty browser events
//!
//! Resize and orientation events arrive dozens of times per second while a
//! drag is in progress. [`DebouncedTask`] collapses each burst into one
//! callback that fires after the events stop.

use wasm_bindgen::prelude::*;
use web_sys::window;

/// One debounced callback slot backed by `setTimeout`.
///
/// Scheduling while a timer is pending cancels the old timer first, so only
/// the last scheduled closure ever runs.
pub struct DebouncedTask {
    delay_ms: i32,
    pending: Option<i32>,
}

impl DebouncedTask {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Run `callback` once the delay elapses with no further schedule calls
    pub fn schedule(&mut self, callback: impl FnOnce() + 'static) {
        self.cancel();

        let Some(win) = window() else {
            return;
        };

        let closure = Closure::once(callback);
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.delay_ms,
        ) {
            Ok(handle) => {
                self.pending = Some(handle);
                closure.forget();
            }
            Err(_) => log::warn!("setTimeout failed, debounced callback dropped"),
        }
    }

    /// Drop any pending callback without running it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Some(win) = window() {
                win.clear_timeout_with_handle(handle);
            }
        }
    }
}

impl Drop for DebouncedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
