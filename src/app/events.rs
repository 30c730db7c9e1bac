//! Outbound application events.
//!
//! The [`PetService`](super::service::PetService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to the console, record them in a
//! test, etc.

use serde::Serialize;

use crate::fsm::Behavior;
use crate::geometry::Point;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum PetEvent {
    /// The service has started (carries the initial behavior).
    Started(Behavior),

    /// The FSM transitioned between behaviors.
    BehaviorChanged { from: Behavior, to: Behavior },

    /// The pet reached home and hid for `dwell_ms`.
    EnteredHome { dwell_ms: u32 },

    /// The pet reappeared outside home.
    LeftHome { at: Point },

    /// A named animation could not be loaded.
    AssetMissing(&'static str),

    /// The active behavior had no frames; the pet fell back to Idle.
    FellBackToIdle { from: Behavior },

    /// The primary button was pressed on the pet.
    Clicked { at: Point },

    /// Periodic status snapshot.
    Status(PetSnapshot),

    /// Teardown finished; carries the number of tasks cancelled.
    Stopped { cancelled_tasks: usize },
}

/// A point-in-time snapshot suitable for logging or serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PetSnapshot {
    pub behavior: &'static str,
    pub x: i32,
    pub y: i32,
    pub visible: bool,
    pub sleep_ms: u32,
    pub heart_ms: u32,
    pub home_ms: u32,
    pub ticks: u64,
    pub pending_tasks: usize,
}
