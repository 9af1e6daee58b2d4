//! Game clock.
//!
//! Every operation has an `_at` form taking the current instant so the clock
//! can be driven deterministically; the plain forms use `Instant::now()`.

use chessmate_core::Color;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Time control settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControl {
    /// Initial time in seconds (0 = unlimited)
    pub initial_time: u64,
    /// Increment per move in seconds
    pub increment: u64,
}

impl TimeControl {
    pub fn new(minutes: u64, increment_secs: u64) -> Self {
        Self {
            initial_time: minutes * 60,
            increment: increment_secs,
        }
    }

    pub fn unlimited() -> Self {
        Self {
            initial_time: 0,
            increment: 0,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.initial_time == 0
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(10, 5)
    }
}

impl std::fmt::Display for TimeControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unlimited() {
            write!(f, "Unlimited")
        } else {
            write!(f, "{}+{}", self.initial_time / 60, self.increment)
        }
    }
}

/// Chess clock for both players
#[derive(Debug, Clone)]
pub struct ChessClock {
    time_control: TimeControl,
    /// Remaining milliseconds, indexed by `Color::idx()`
    remaining_ms: [u64; 2],
    /// Side whose clock is running and since when
    running: Option<(Color, Instant)>,
}

impl ChessClock {
    pub fn new(time_control: TimeControl) -> Self {
        let initial_ms = time_control.initial_time * 1000;
        Self {
            time_control,
            remaining_ms: [initial_ms; 2],
            running: None,
        }
    }

    pub fn time_control(&self) -> TimeControl {
        self.time_control
    }

    pub fn is_enabled(&self) -> bool {
        !self.time_control.is_unlimited()
    }

    pub fn running_for(&self) -> Option<Color> {
        self.running.map(|(c, _)| c)
    }

    pub fn start(&mut self, color: Color) {
        self.start_at(color, Instant::now());
    }

    pub fn start_at(&mut self, color: Color, now: Instant) {
        if self.is_enabled() {
            self.running = Some((color, now));
        }
    }

    /// Stop the running clock and credit the increment.
    pub fn stop_and_increment(&mut self) {
        self.stop_and_increment_at(Instant::now());
    }

    pub fn stop_and_increment_at(&mut self, now: Instant) {
        if let Some((color, started)) = self.running.take() {
            let elapsed_ms = now.saturating_duration_since(started).as_millis() as u64;
            let increment_ms = self.time_control.increment * 1000;
            let slot = &mut self.remaining_ms[color.idx()];
            // A flagged player does not get the increment back
            *slot = match slot.checked_sub(elapsed_ms) {
                Some(left) if left > 0 => left + increment_ms,
                _ => 0,
            };
        }
    }

    /// Stop the running clock without an increment, returning whose it was.
    pub fn pause(&mut self) -> Option<Color> {
        self.pause_at(Instant::now())
    }

    pub fn pause_at(&mut self, now: Instant) -> Option<Color> {
        let (color, started) = self.running.take()?;
        let elapsed_ms = now.saturating_duration_since(started).as_millis() as u64;
        let slot = &mut self.remaining_ms[color.idx()];
        *slot = slot.saturating_sub(elapsed_ms);
        Some(color)
    }

    pub fn remaining_time(&self, color: Color) -> Duration {
        self.remaining_time_at(color, Instant::now())
    }

    /// Remaining time for a player, accounting for a running clock.
    pub fn remaining_time_at(&self, color: Color, now: Instant) -> Duration {
        let base_ms = self.remaining_ms[color.idx()];
        let elapsed_ms = match self.running {
            Some((c, started)) if c == color => {
                now.saturating_duration_since(started).as_millis() as u64
            }
            _ => 0,
        };
        Duration::from_millis(base_ms.saturating_sub(elapsed_ms))
    }

    pub fn is_timeout(&self, color: Color) -> bool {
        self.is_timeout_at(color, Instant::now())
    }

    pub fn is_timeout_at(&self, color: Color, now: Instant) -> bool {
        self.is_enabled() && self.remaining_time_at(color, now).is_zero()
    }

    /// Format time as MM:SS, with tenths under ten seconds.
    pub fn format_time(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let mins = total_secs / 60;
        let secs = total_secs % 60;

        if duration.as_millis() < 10_000 {
            let tenths = (duration.as_millis() % 1000) / 100;
            format!("{}:{:02}.{}", mins, secs, tenths)
        } else {
            format!("{}:{:02}", mins, secs)
        }
    }
}
