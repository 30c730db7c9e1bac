//! Mock desktop adapters for integration tests.
//!
//! Records every presentation call so tests can assert on the full
//! command history without a window system, and lets the test place the
//! pointer wherever it likes.

use deskpet::PetRuntime;
use deskpet::adapters::frames::BuiltinFrames;
use deskpet::adapters::random::FixedRandom;
use deskpet::animation::{AnimationSet, FrameHandle};
use deskpet::app::events::PetEvent;
use deskpet::app::ports::{EventSink, FrameSource, PointerPort, PresentationPort};
use deskpet::config::{MsRange, PetConfig};
use deskpet::error::Error;
use deskpet::geometry::Point;

// ── Presentation call record ──────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    MoveTo(Point),
    Show,
    Hide,
    Frame(FrameHandle),
    Release,
}

// ── MockDesktop ───────────────────────────────────────────────

pub struct MockDesktop {
    pub pointer: Point,
    pub calls: Vec<SurfaceCall>,
}

#[allow(dead_code)]
impl MockDesktop {
    pub fn new(pointer: Point) -> Self {
        Self {
            pointer,
            calls: Vec::new(),
        }
    }

    /// Last position the surface was moved to.
    pub fn position(&self) -> Option<Point> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    pub fn visible(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SurfaceCall::Show => Some(true),
                SurfaceCall::Hide | SurfaceCall::Release => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn count(&self, call: &SurfaceCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn frames_shown(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Frame(_)))
            .count()
    }
}

impl PointerPort for MockDesktop {
    fn pointer_position(&mut self) -> Point {
        self.pointer
    }
}

impl PresentationPort for MockDesktop {
    fn move_to(&mut self, at: Point) {
        self.calls.push(SurfaceCall::MoveTo(at));
    }

    fn show(&mut self) {
        self.calls.push(SurfaceCall::Show);
    }

    fn hide(&mut self) {
        self.calls.push(SurfaceCall::Hide);
    }

    fn set_frame(&mut self, frame: FrameHandle) {
        self.calls.push(SurfaceCall::Frame(frame));
    }

    fn release(&mut self) {
        self.calls.push(SurfaceCall::Release);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<PetEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&PetEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PetEvent) {
        self.events.push(event.clone());
    }
}

// ── Frames with holes ─────────────────────────────────────────

/// Built-in frames except for the listed animations.
pub struct PartialFrames {
    pub missing: &'static [&'static str],
    pub inner: BuiltinFrames,
}

impl FrameSource for PartialFrames {
    fn load_animation(&mut self, name: &'static str) -> Result<Vec<FrameHandle>, Error> {
        if self.missing.contains(&name) {
            return Err(Error::AssetMissing(name));
        }
        self.inner.load_animation(name)
    }
}

// ── Builders ──────────────────────────────────────────────────

pub type TestPet = PetRuntime<MockDesktop, RecordingSink>;

/// Config whose start position is `at`.
#[allow(dead_code)]
pub fn config_starting_at(at: Point) -> PetConfig {
    let base = PetConfig::default();
    PetConfig {
        start_from_right: base.screen_width - at.x,
        start_from_bottom: base.screen_height - at.y,
        ..base
    }
}

#[allow(dead_code)]
pub fn pinned(range_ms: u32) -> MsRange {
    MsRange::new(range_ms, range_ms)
}

/// A started pet that never wakes on its own (`roll = 1.0`).
#[allow(dead_code)]
pub fn pet(config: PetConfig, pointer: Point) -> TestPet {
    pet_with(config, pointer, 1.0, &[])
}

pub fn pet_with(
    config: PetConfig,
    pointer: Point,
    roll: f64,
    missing: &'static [&'static str],
) -> TestPet {
    let mut sink = RecordingSink::default();
    let mut frames = PartialFrames {
        missing,
        inner: BuiltinFrames::new(),
    };
    let animations = AnimationSet::load(&mut frames, &mut sink);
    let mut pet = PetRuntime::new(
        config,
        animations,
        Box::new(FixedRandom::new(roll)),
        MockDesktop::new(pointer),
        sink,
    );
    pet.start();
    pet
}

/// Put the pointer in the middle of the pet.
#[allow(dead_code)]
pub fn point_at_pet(pet: &mut TestPet) {
    let p = pet.service().position();
    pet.desktop_mut().pointer = Point::new(p.x + 10, p.y + 10);
}
