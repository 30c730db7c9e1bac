//! Pet configuration parameters
//!
//! All tunable parameters for the desktop pet.
//! Values can be overridden from a JSON file via [`ConfigPort`](crate::app::ports::ConfigPort);
//! any field missing from the file keeps its default.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::geometry::{Bounds, Point, Size};

/// Inclusive millisecond range a countdown is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsRange {
    pub min: u32,
    pub max: u32,
}

impl MsRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Core pet configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    // --- Timing ---
    /// Tick interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Status snapshot interval (milliseconds)
    pub status_interval_ms: u32,

    // --- Geometry ---
    /// Pixels moved per tick while walking or homing
    pub move_step_px: i32,
    /// Pet bounding box width
    pub pet_width: i32,
    /// Pet bounding box height
    pub pet_height: i32,
    /// Screen width; the pet never queries the platform for it
    pub screen_width: i32,
    /// Screen height
    pub screen_height: i32,
    /// Leftmost x the pet may occupy
    pub min_x: i32,
    /// Distance kept from the right screen edge (`max_x = screen_width - right_margin`)
    pub right_margin: i32,
    /// Start position, measured from the right edge
    pub start_from_right: i32,
    /// Start position, measured from the bottom edge
    pub start_from_bottom: i32,

    // --- Sleep ---
    /// Sleep countdown drawn at startup, on waking, and on leaving home
    pub sleep_delay_ms: MsRange,
    /// Sleep countdown drawn while the pointer rests on the pet
    pub petted_sleep_delay_ms: MsRange,
    /// Per-tick probability of waking while asleep (0.0 – 1.0)
    pub wake_probability: f64,

    // --- Heart ---
    /// Heart countdown set when the pet is petted
    pub heart_duration_ms: u32,
    /// Delay between entering Heart and the homing check
    pub homing_delay_ms: u32,

    // --- Home ---
    pub home_x: i32,
    pub home_y: i32,
    /// Distance under which a walking pet enters home
    pub home_radius_px: i32,
    /// Dwell countdown drawn on each visit
    pub home_dwell_ms: MsRange,
    /// Offset from home where the pet reappears
    pub home_exit_offset_x: i32,
    pub home_exit_offset_y: i32,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 200,     // 5 Hz
            status_interval_ms: 10_000,

            // Geometry
            move_step_px: 6,
            pet_width: 40,
            pet_height: 35,
            screen_width: 1920,
            screen_height: 1080,
            min_x: 10,
            right_margin: 110,
            start_from_right: 200,
            start_from_bottom: 85,

            // Sleep
            sleep_delay_ms: MsRange::new(10_000, 20_000),
            petted_sleep_delay_ms: MsRange::new(5_000, 10_000),
            wake_probability: 0.05,

            // Heart
            heart_duration_ms: 5_000,
            homing_delay_ms: 5_000,

            // Home
            home_x: 100,
            home_y: 100,
            home_radius_px: 50,
            home_dwell_ms: MsRange::new(3_000, 8_000),
            home_exit_offset_x: -50,
            home_exit_offset_y: 30,
        }
    }
}

impl PetConfig {
    /// Reject values the state machine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.status_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("status_interval_ms must be > 0"));
        }
        if self.move_step_px <= 0 {
            return Err(ConfigError::ValidationFailed("move_step_px must be > 0"));
        }
        if self.pet_width <= 0 || self.pet_height <= 0 {
            return Err(ConfigError::ValidationFailed("pet size must be positive"));
        }
        if self.bounds().max_x < self.min_x {
            return Err(ConfigError::ValidationFailed("screen too narrow for min_x/right_margin"));
        }
        if !self.sleep_delay_ms.is_valid()
            || !self.petted_sleep_delay_ms.is_valid()
            || !self.home_dwell_ms.is_valid()
        {
            return Err(ConfigError::ValidationFailed("range min must not exceed max"));
        }
        if !(0.0..=1.0).contains(&self.wake_probability) {
            return Err(ConfigError::ValidationFailed("wake_probability must be within 0..=1"));
        }
        if self.home_radius_px < 0 {
            return Err(ConfigError::ValidationFailed("home_radius_px must be >= 0"));
        }
        if !self.bounds().contains(self.home()) {
            return Err(ConfigError::ValidationFailed("home must lie inside the movement bounds"));
        }
        Ok(())
    }

    /// Region the pet's top-left corner may occupy.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.min_x,
            max_x: self.screen_width.saturating_sub(self.right_margin),
            min_y: 0,
            max_y: self.screen_height.saturating_sub(self.pet_height).max(0),
        }
    }

    pub fn pet_size(&self) -> Size {
        Size::new(self.pet_width, self.pet_height)
    }

    pub fn start_position(&self) -> Point {
        Point::new(
            self.screen_width.saturating_sub(self.start_from_right),
            self.screen_height.saturating_sub(self.start_from_bottom),
        )
    }

    pub fn home(&self) -> Point {
        Point::new(self.home_x, self.home_y)
    }

    /// Where the pet reappears after a home visit.
    pub fn home_exit_position(&self) -> Point {
        Point::new(
            self.home_x.saturating_add(self.home_exit_offset_x),
            self.home_y.saturating_add(self.home_exit_offset_y),
        )
    }
}
