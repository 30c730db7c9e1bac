//! Screen geometry: points, the movement bounds, and the pet's clamped position.
//!
//! ```text
//!  (min_x, min_y) ┌───────────────────────────┐
//!                 │        Bounds             │
//!                 │   ┌──────┐                │
//!                 │   │ pet  │ 40 × 35        │
//!                 │   └──────┘                │
//!                 └───────────────────────────┘ (max_x, max_y)
//! ```
//!
//! [`PetGeometry`] is the only owner of the pet position.  Every mutation
//! goes through [`Bounds::clamp`], so `min_x <= x <= max_x` holds after any
//! call; out-of-range requests are clamped, never wrapped or rejected.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Inclusive region for the pet's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min_x, self.max_x.max(self.min_x)),
            p.y.clamp(self.min_y, self.max_y.max(self.min_y)),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }
}

/// Horizontal walking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The pet's position, hit box, and movement bounds.
#[derive(Debug, Clone)]
pub struct PetGeometry {
    position: Point,
    size: Size,
    bounds: Bounds,
}

impl PetGeometry {
    pub fn new(start: Point, size: Size, bounds: Bounds) -> Self {
        Self {
            position: bounds.clamp(start),
            size,
            bounds,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Move to `p`, clamped.  Returns `true` if the position changed.
    pub fn set_position(&mut self, p: Point) -> bool {
        let next = self.bounds.clamp(p);
        let changed = next != self.position;
        self.position = next;
        changed
    }

    /// Shift by `(dx, dy)`, clamped.  Returns `true` if the position changed.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        let p = self.position;
        self.set_position(Point::new(p.x.saturating_add(dx), p.y.saturating_add(dy)))
    }

    /// One walking step.  At a bound the pet keeps pressing but does not advance.
    pub fn walk(&mut self, direction: Direction, step: i32) -> bool {
        match direction {
            Direction::Left => self.move_by(-step, 0),
            Direction::Right => self.move_by(step, 0),
        }
    }

    /// Inclusive hit test against the pet's bounding box.
    pub fn contains(&self, p: Point) -> bool {
        let o = self.position;
        (o.x..=o.x + self.size.width).contains(&p.x) && (o.y..=o.y + self.size.height).contains(&p.y)
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        self.position.distance_to(p)
    }

    /// Take one straight-line step of length `step` toward `target`.
    ///
    /// Never overshoots: if the target is closer than `step` the pet lands on
    /// it (subject to clamping).  Returns `true` if the position changed.
    pub fn step_toward(&mut self, target: Point, step: i32) -> bool {
        let distance = self.distance_to(target);
        if distance <= f64::from(step) {
            return self.set_position(target);
        }
        let ux = f64::from(target.x - self.position.x) / distance;
        let uy = f64::from(target.y - self.position.y) / distance;
        let dx = (ux * f64::from(step)).round() as i32;
        let dy = (uy * f64::from(step)).round() as i32;
        self.move_by(dx, dy)
    }
}
