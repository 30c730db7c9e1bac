//! Port traits: the hexagonal boundary between domain logic and the desktop.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PetService (domain)
//! ```
//!
//! Driven adapters (pointer, presentation surface, frame loader, event
//! sinks, config files, randomness) implement these traits.  The
//! [`PetService`](super::service::PetService) consumes them via generics,
//! so the domain core never touches a real window or mouse.

use crate::animation::FrameHandle;
use crate::config::PetConfig;
use crate::error::Error;
use crate::geometry::Point;
use crate::scheduler::{Fired, Scheduler};

// ───────────────────────────────────────────────────────────────
// Pointer port (driven adapter: desktop → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain samples the global pointer once per tick.
pub trait PointerPort {
    /// Current pointer position in screen coordinates.
    fn pointer_position(&mut self) -> Point;
}

// ───────────────────────────────────────────────────────────────
// Presentation port (driven adapter: domain → desktop)
// ───────────────────────────────────────────────────────────────

/// Write-side port: a borderless, always-on-top, transparent surface.
pub trait PresentationPort {
    /// Place the surface's top-left corner.
    fn move_to(&mut self, at: Point);

    fn show(&mut self);

    fn hide(&mut self);

    /// Display one animation frame.
    fn set_frame(&mut self, frame: FrameHandle);

    /// Release the surface.  Called exactly once during teardown.
    fn release(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Frame source (driven adapter: assets → domain)
// ───────────────────────────────────────────────────────────────

/// Loads named animation sequences.
pub trait FrameSource {
    /// Frames for `name` in playback order.
    ///
    /// Returns [`Error::AssetMissing`] when the animation does not exist;
    /// the caller degrades instead of aborting.
    fn load_animation(&mut self, name: &'static str) -> Result<Vec<FrameHandle>, Error>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`PetEvent`](super::events::PetEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::PetEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: file → domain)
// ───────────────────────────────────────────────────────────────

/// Loads pet configuration.
///
/// Implementations MUST validate before returning.  Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<PetConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Random source (driven adapter: RNG → domain)
// ───────────────────────────────────────────────────────────────

/// Injectable randomness so behavior can be replayed deterministically.
pub trait RandomSource {
    /// `true` with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform integer in the inclusive range `[low, high]`.
    fn between(&mut self, low: u32, high: u32) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the pet)
// ───────────────────────────────────────────────────────────────

/// Callback trait the [`Scheduler`] invokes for each due task.
///
/// The scheduler itself knows nothing about behaviors or the desktop; the
/// runtime implements this by forwarding to the service.  The delegate
/// receives the scheduler back so callbacks can schedule and cancel tasks.
pub trait SchedulerDelegate<T> {
    fn on_task_fired(&mut self, fired: Fired<T>, scheduler: &mut Scheduler<T>);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config file at the given location.
    NotFound,
    /// The file is not valid JSON for [`PetConfig`].
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error reading the file.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
