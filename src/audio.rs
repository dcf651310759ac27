//! Collision alert using the Web Audio API
//!
//! Procedurally generated beeps - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Alert beep pitch (A5)
const ALERT_FREQ: f32 = 880.0;
/// Beep length and spacing (seconds)
const BEEP_DURATION: f64 = 0.15;
const BEEP_SPACING: f64 = 0.2;
const BEEP_COUNT: u32 = 3;
const ALERT_VOLUME: f32 = 0.3;
/// Alerts closer together than this are dropped (ms)
const MIN_ALERT_GAP_MS: f64 = 600.0;

/// Plays the collision alert
pub struct AlertPlayer {
    ctx: Option<AudioContext>,
    last_alert_ms: f64,
}

impl Default for AlertPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertPlayer {
    pub fn new() -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - alerts disabled");
        }
        Self {
            ctx,
            last_alert_ms: f64::NEG_INFINITY,
        }
    }

    /// Three short high beeps
    pub fn play_alert(&mut self, now_ms: f64) {
        if now_ms - self.last_alert_ms < MIN_ALERT_GAP_MS {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers start the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let t = ctx.current_time();
        for i in 0..BEEP_COUNT {
            self.play_beep(ctx, t + i as f64 * BEEP_SPACING);
        }
        self.last_alert_ms = now_ms;
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_beep(&self, ctx: &AudioContext, at: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, ALERT_FREQ) else {
            return;
        };

        gain.gain().set_value_at_time(ALERT_VOLUME, at).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, at + BEEP_DURATION)
            .ok();

        osc.start_with_when(at).ok();
        osc.stop_with_when(at + BEEP_DURATION).ok();
    }
}
