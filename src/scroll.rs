//! Scroll mode state machine
//!
//! Owns the idle/auto mode flag and the auto-scroll interval. The interval
//! is only meaningful while auto-scrolling; `period` exposes it to the event
//! loop, which arms the repeating timer (initial delay and repeat are both
//! one interval).

use std::time::Duration;

/// Seconds between auto-scrolled lines when scrolling starts.
pub const DEFAULT_INTERVAL: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Waiting for keystrokes
    #[default]
    Idle,
    /// A line is rendered on every timer tick
    Auto,
}

/// Current scroll mode and interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    mode: Mode,
    interval: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current interval in seconds. Only meaningful while `mode` is `Auto`.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Timer period the event loop should honor; `None` means disarmed.
    /// A live timer exists iff the mode is `Auto`.
    pub fn period(&self) -> Option<Duration> {
        match self.mode {
            Mode::Auto => Some(Duration::from_secs_f64(self.interval)),
            Mode::Idle => None,
        }
    }

    /// Idle -> Auto. The first entry uses multiplier 1.0, leaving the
    /// interval at its default.
    pub fn start_auto(&mut self, multiplier: f64) {
        self.mode = Mode::Auto;
        self.interval *= multiplier;
        tracing::debug!(interval = self.interval, "auto-scroll started");
    }

    /// Multiply the interval while auto-scrolling; ignored when idle.
    pub fn adjust_speed(&mut self, multiplier: f64) {
        if self.mode != Mode::Auto {
            return;
        }
        self.interval *= multiplier;
        tracing::debug!(interval = self.interval, "scroll interval adjusted");
    }

    /// Auto -> Idle. Disarms the timer and resets the interval.
    pub fn stop_auto(&mut self) {
        self.mode = Mode::Idle;
        self.interval = DEFAULT_INTERVAL;
        tracing::debug!("auto-scroll stopped");
    }
}
