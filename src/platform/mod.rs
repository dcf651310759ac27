//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Host collaborators (drawing surface, stats, log, alerts)
//! - Wall-clock time
//! - Periodic tick timer (browser only)

use crate::event_log::LogEntry;
use crate::renderer::Frame;
use crate::sim::SimStats;

#[cfg(target_arch = "wasm32")]
pub mod timer;

/// Everything the simulator needs from the surrounding UI
pub trait Host {
    /// Present a rendered frame on the drawing surface
    fn draw(&mut self, frame: &Frame);

    /// Update the stats panel
    fn show_stats(&mut self, stats: &SimStats);

    /// Replace the log panel contents (newest first)
    fn show_log(&mut self, entries: &[LogEntry]);

    /// Audible alert for a collision
    fn collision_alert(&mut self) {}
}

/// Wall-clock time in ms since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall-clock time in ms since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

/// Format a timestamp in the browser's local time for the log panel
#[cfg(target_arch = "wasm32")]
pub fn format_clock(timestamp_ms: f64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp_ms));
    String::from(date.to_locale_time_string("en-US"))
}

/// Format a timestamp as local `HH:MM:SS` for the log panel
#[cfg(not(target_arch = "wasm32"))]
pub fn format_clock(timestamp_ms: f64) -> String {
    use chrono::{DateTime, Local};

    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|d| d.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
