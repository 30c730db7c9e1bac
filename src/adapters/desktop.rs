//! Headless desktop adapter.
//!
//! Stands in for a real window system: the "surface" is a record of what
//! would be on screen, reported through the log, and the pointer wanders
//! on its own.  Now and then it drifts onto the pet so petting, hearts and
//! the home routine all show up in an unattended run.

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::FrameHandle;
use crate::app::ports::{PointerPort, PresentationPort};
use crate::config::PetConfig;
use crate::error::Error;
use crate::geometry::{Point, Size};

/// Chance per sample that the pointer lands on the pet.
const VISIT_CHANCE: f64 = 0.04;
/// Chance per sample that the pointer jumps somewhere else on screen.
const WANDER_CHANCE: f64 = 0.16;

#[derive(Debug, Clone, Copy, Default)]
struct Surface {
    position: Point,
    visible: bool,
    frame: Option<FrameHandle>,
    released: bool,
}

pub struct HeadlessDesktop {
    screen: Size,
    pet: Size,
    rng: StdRng,
    pointer: Point,
    surface: Surface,
}

impl HeadlessDesktop {
    /// Create the surface.  Fails if the configured screen has no area.
    pub fn open(config: &PetConfig, seed: u64) -> Result<Self, Error> {
        if config.screen_width <= 0 || config.screen_height <= 0 {
            return Err(Error::Init("screen has no area"));
        }
        info!(
            "headless desktop {}x{}",
            config.screen_width, config.screen_height
        );
        Ok(Self {
            screen: Size::new(config.screen_width, config.screen_height),
            pet: config.pet_size(),
            rng: StdRng::seed_from_u64(seed),
            pointer: Point::new(config.screen_width / 2, config.screen_height / 2),
            surface: Surface::default(),
        })
    }

    pub fn position(&self) -> Point {
        self.surface.position
    }

    pub fn is_visible(&self) -> bool {
        self.surface.visible
    }

    pub fn current_frame(&self) -> Option<FrameHandle> {
        self.surface.frame
    }

    pub fn is_released(&self) -> bool {
        self.surface.released
    }
}

impl PointerPort for HeadlessDesktop {
    fn pointer_position(&mut self) -> Point {
        let roll: f64 = self.rng.r#gen();
        if roll < VISIT_CHANCE && self.surface.visible {
            let p = self.surface.position;
            self.pointer = Point::new(p.x + self.pet.width / 2, p.y + self.pet.height / 2);
        } else if roll < VISIT_CHANCE + WANDER_CHANCE {
            self.pointer = Point::new(
                self.rng.gen_range(0..self.screen.width),
                self.rng.gen_range(0..self.screen.height),
            );
        }
        self.pointer
    }
}

impl PresentationPort for HeadlessDesktop {
    fn move_to(&mut self, at: Point) {
        debug!("surface -> ({}, {})", at.x, at.y);
        self.surface.position = at;
    }

    fn show(&mut self) {
        debug!("surface shown");
        self.surface.visible = true;
    }

    fn hide(&mut self) {
        debug!("surface hidden");
        self.surface.visible = false;
    }

    fn set_frame(&mut self, frame: FrameHandle) {
        trace!("frame {}", frame.0);
        self.surface.frame = Some(frame);
    }

    fn release(&mut self) {
        if self.surface.released {
            warn!("surface released twice");
            return;
        }
        self.surface.released = true;
        self.surface.visible = false;
        info!("surface released");
    }
}
