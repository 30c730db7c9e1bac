//! Animation playback.
//!
//! Each behavior plays a named looping frame sequence.  Sequences are
//! loaded once at startup through a [`FrameSource`]; a missing sequence is
//! reported and the behavior simply has no frames, which the service
//! treats as a reason to fall back to Idle.

use log::{debug, warn};

use crate::app::events::PetEvent;
use crate::app::ports::{EventSink, FrameSource};
use crate::fsm::Behavior;

/// Opaque reference to one loaded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Frame sequences for every behavior plus the playback cursor.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    sequences: [Vec<FrameHandle>; Behavior::COUNT],
    index: usize,
}

impl AnimationSet {
    /// Load every behavior's sequence.  Behaviors sharing an asset share
    /// its frames; each missing asset is reported once.
    pub fn load(source: &mut impl FrameSource, sink: &mut impl EventSink) -> Self {
        let mut set = Self::default();
        let mut loaded: Vec<(&'static str, Vec<FrameHandle>)> = Vec::new();

        for behavior in Behavior::ALL {
            let Some(name) = behavior.asset_name() else {
                continue;
            };
            if let Some((_, frames)) = loaded.iter().find(|(n, _)| *n == name) {
                set.sequences[behavior as usize] = frames.clone();
                continue;
            }
            let frames = match source.load_animation(name) {
                Ok(frames) if !frames.is_empty() => {
                    debug!("loaded {} frames for '{name}'", frames.len());
                    frames
                }
                Ok(_) => {
                    warn!("animation '{name}' has no frames");
                    sink.emit(&PetEvent::AssetMissing(name));
                    Vec::new()
                }
                Err(e) => {
                    warn!("{e}");
                    sink.emit(&PetEvent::AssetMissing(name));
                    Vec::new()
                }
            };
            set.sequences[behavior as usize] = frames.clone();
            loaded.push((name, frames));
        }
        set
    }

    pub fn frame_count(&self, behavior: Behavior) -> usize {
        self.sequences[behavior as usize].len()
    }

    /// A behavior can be shown if it needs no frames or has some.
    pub fn is_playable(&self, behavior: Behavior) -> bool {
        behavior.asset_name().is_none() || self.frame_count(behavior) > 0
    }

    /// Restart playback from the first frame.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// The frame to show now, advancing the cursor and wrapping at the end.
    pub fn next_frame(&mut self, behavior: Behavior) -> Option<FrameHandle> {
        let seq = &self.sequences[behavior as usize];
        if seq.is_empty() {
            return None;
        }
        if self.index >= seq.len() {
            self.index = 0;
        }
        let frame = seq[self.index];
        self.index = (self.index + 1) % seq.len();
        Some(frame)
    }
}
