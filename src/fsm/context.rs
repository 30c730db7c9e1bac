//! Shared mutable context threaded through every FSM handler.
//!
//! `PetContext` is the single struct that behavior handlers read from and
//! write to.  It contains the latest cursor sample, the timers that expired
//! this tick, the pet geometry, presentation outputs, and requests for the
//! service to schedule or cancel tasks.  Think of it as the "blackboard" in
//! a blackboard architecture.

use log::warn;

use crate::app::ports::RandomSource;
use crate::config::{MsRange, PetConfig};
use crate::cursor::CursorSample;
use crate::geometry::PetGeometry;
use crate::timers::{Expired, TimerBank};

// ---------------------------------------------------------------------------
// Presentation commands (written by handlers; applied by the service)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationCommands {
    /// Whether the pet surface should be shown.
    pub visible: bool,
}

impl Default for PresentationCommands {
    fn default() -> Self {
        Self { visible: true }
    }
}

// ---------------------------------------------------------------------------
// Task requests (handlers cannot touch the scheduler directly)
// ---------------------------------------------------------------------------

/// Work a handler asks the service to schedule once the tick completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRequest {
    /// One-shot check that starts homing if the pet is still in Heart.
    ScheduleHoming { delay_ms: u32 },
    /// Begin the step-per-tick walk toward home.
    StartHomingWalk,
    /// Cancel any pending homing step.
    StopHomingWalk,
}

/// Requests are drained after every tick and every forced transition.
pub const MAX_REQUESTS: usize = 4;

// ---------------------------------------------------------------------------
// The context itself
// ---------------------------------------------------------------------------

/// The blackboard shared between the FSM engine and all behavior handlers.
pub struct PetContext {
    // -- Timing --
    /// Ticks since the current behavior was entered (set by the engine).
    pub ticks_in_state: u64,

    // -- Inputs for this tick --
    pub cursor: CursorSample,
    pub expired: Expired,
    /// Frames in the current behavior's animation (0 if it has none).
    pub frames_in_behavior: usize,

    // -- Owned state --
    pub geometry: PetGeometry,
    pub timers: TimerBank,
    /// Walking may enter home.  Cleared on leaving home until the pet has
    /// walked farther from home than where it reappeared.
    pub home_armed: bool,

    // -- Outputs --
    pub commands: PresentationCommands,
    pub requests: heapless::Vec<TaskRequest, MAX_REQUESTS>,

    pub config: PetConfig,
    rng: Box<dyn RandomSource>,
}

impl PetContext {
    /// Build the startup context: pet at its start position, sleep timer
    /// drawn from the normal range, heart and home idle.
    pub fn new(config: PetConfig, mut rng: Box<dyn RandomSource>) -> Self {
        let start = config.start_position();
        let sleep_ms = rng.between(config.sleep_delay_ms.min, config.sleep_delay_ms.max);
        Self {
            ticks_in_state: 0,
            home_armed: true,
            cursor: CursorSample::still(start),
            expired: Expired::default(),
            frames_in_behavior: 0,
            geometry: PetGeometry::new(start, config.pet_size(), config.bounds()),
            timers: TimerBank::new(sleep_ms),
            commands: PresentationCommands::default(),
            requests: heapless::Vec::new(),
            config,
            rng,
        }
    }

    /// Draw a duration uniformly from `range`.
    pub fn draw(&mut self, range: MsRange) -> u32 {
        self.rng.between(range.min, range.max)
    }

    /// Bernoulli trial with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.chance(p)
    }

    /// Queue a request for the service.  A full queue drops the request.
    pub fn request(&mut self, req: TaskRequest) {
        if self.requests.push(req).is_err() {
            warn!("task request queue full, dropping {req:?}");
        }
    }

    /// Drain queued requests in the order they were made.
    pub fn take_requests(&mut self) -> heapless::Vec<TaskRequest, MAX_REQUESTS> {
        core::mem::take(&mut self.requests)
    }

    /// Distance from the pet's top-left corner to the home point.
    pub fn home_distance(&self) -> f64 {
        self.geometry.distance_to(self.config.home())
    }

    /// Clear per-tick inputs before the next tick is sampled.
    pub fn clear_inputs(&mut self) {
        self.expired = Expired::default();
        self.cursor = CursorSample::still(self.cursor.at);
    }
}
