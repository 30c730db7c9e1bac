//! Pointer sampling.
//!
//! Each tick the sampler receives the raw pointer coordinate and classifies
//! it twice: against the pet's bounding box (on-pet or elsewhere) and against
//! the previous sample (moved or unchanged).  A stationary pointer must never
//! force a walking-direction decision, which is what keeps the pet from
//! oscillating when the pointer sits at the pet's own x.

use crate::geometry::{Direction, PetGeometry, Point};

/// Classification of one pointer reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSample {
    /// Raw pointer coordinate.
    pub at: Point,
    /// Pointer lies inside the pet's bounding box.
    pub on_pet: bool,
    /// Pointer differs from the previous tick's reading.
    pub moved: bool,
}

impl CursorSample {
    /// A sample that triggers nothing: off the pet and stationary.
    pub const fn still(at: Point) -> Self {
        Self {
            at,
            on_pet: false,
            moved: false,
        }
    }

    /// Which way the pet should walk to follow this pointer.
    pub fn direction_from(&self, pet: Point) -> Direction {
        if self.at.x < pet.x {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Remembers the previous pointer reading.
#[derive(Debug, Clone)]
pub struct CursorSampler {
    previous: Point,
}

impl CursorSampler {
    pub fn new(initial: Point) -> Self {
        Self { previous: initial }
    }

    /// Classify `at` and remember it as the new previous sample.
    pub fn sample(&mut self, at: Point, geometry: &PetGeometry) -> CursorSample {
        let moved = at != self.previous;
        self.previous = at;
        CursorSample {
            at,
            on_pet: geometry.contains(at),
            moved,
        }
    }
}
