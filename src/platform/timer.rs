//! Cancellable periodic timer on top of `setInterval`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// A running `setInterval`; dropping it cancels the interval
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    /// Call `callback` every `period_ms` (rounded, at least 1 ms)
    pub fn start(period_ms: f64, callback: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let period_ms = (period_ms.round() as i32).max(1);
        let closure = Closure::<dyn FnMut()>::new(callback);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| log::error!("setInterval failed: {:?}", e))
            .ok()?;
        log::debug!("Tick interval started ({} ms)", period_ms);
        Some(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
            log::debug!("Tick interval stopped");
        }
    }
}
