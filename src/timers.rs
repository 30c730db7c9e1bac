//! Countdown timers driven by the tick loop.
//!
//! | Timer   | Armed by                           | Expiry triggers            |
//! |---------|------------------------------------|----------------------------|
//! | `sleep` | startup, waking, petting, leaving home | fall asleep            |
//! | `heart` | entering Heart                     | cursor walking re-enabled  |
//! | `home`  | entering home                      | leave home                 |
//!
//! A countdown never goes below zero and reports expiry exactly once: on the
//! tick it reaches zero it disarms itself, and stays silent until reset.

/// A single non-negative countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    remaining_ms: u32,
    armed: bool,
}

impl Countdown {
    /// A disarmed countdown at zero.
    pub const fn idle() -> Self {
        Self {
            remaining_ms: 0,
            armed: false,
        }
    }

    pub const fn armed(ms: u32) -> Self {
        Self {
            remaining_ms: ms,
            armed: true,
        }
    }

    /// Re-arm with a fresh duration.
    pub fn reset(&mut self, ms: u32) {
        self.remaining_ms = ms;
        self.armed = true;
    }

    /// Stop counting without firing.
    pub fn disarm(&mut self) {
        self.remaining_ms = 0;
        self.armed = false;
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Counting down with time left (the "timer > 0" condition).
    pub fn is_running(&self) -> bool {
        self.armed && self.remaining_ms > 0
    }

    /// Decrement by `elapsed_ms`.  Returns `true` on the tick the countdown
    /// reaches zero; further ticks return `false` until [`reset`](Self::reset).
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.armed = false;
            return true;
        }
        false
    }
}

/// Which countdowns expired during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expired {
    pub sleep: bool,
    pub heart: bool,
    pub home: bool,
}

/// The pet's three countdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerBank {
    pub sleep: Countdown,
    pub heart: Countdown,
    pub home: Countdown,
}

impl TimerBank {
    /// Startup state: sleep armed, heart and home idle.
    pub fn new(sleep_ms: u32) -> Self {
        Self {
            sleep: Countdown::armed(sleep_ms),
            heart: Countdown::idle(),
            home: Countdown::idle(),
        }
    }

    /// Decrement every armed countdown once.
    pub fn tick(&mut self, elapsed_ms: u32) -> Expired {
        Expired {
            sleep: self.sleep.tick(elapsed_ms),
            heart: self.heart.tick(elapsed_ms),
            home: self.home.tick(elapsed_ms),
        }
    }
}
