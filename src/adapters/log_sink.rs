//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured pet events through the
//! `log` facade (stderr via `env_logger` in the binary).  Status snapshots
//! are rendered as one JSON object per line so they can be grepped.

use log::{info, warn};

use crate::app::events::PetEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PetEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PetEvent) {
        match event {
            PetEvent::Status(s) => match serde_json::to_string(s) {
                Ok(json) => info!("STATUS | {json}"),
                Err(e) => warn!("STATUS | unserializable snapshot: {e}"),
            },
            PetEvent::BehaviorChanged { from, to } => {
                info!("BEHAVIOR | {from} -> {to}");
            }
            PetEvent::EnteredHome { dwell_ms } => {
                info!("HOME | entered, dwell={dwell_ms}ms");
            }
            PetEvent::LeftHome { at } => {
                info!("HOME | left at ({}, {})", at.x, at.y);
            }
            PetEvent::AssetMissing(name) => {
                warn!("ASSET | '{name}' missing, behavior will fall back to Idle");
            }
            PetEvent::FellBackToIdle { from } => {
                warn!("ASSET | {from} has no frames, fell back to Idle");
            }
            PetEvent::Clicked { at } => {
                info!("INPUT | left click at ({}, {})", at.x, at.y);
            }
            PetEvent::Started(behavior) => {
                info!("START | initial_behavior={behavior}");
            }
            PetEvent::Stopped { cancelled_tasks } => {
                info!("STOP | cancelled {cancelled_tasks} tasks");
            }
        }
    }
}
