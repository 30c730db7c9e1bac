//! Function-pointer finite state machine engine.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  StateTable                                                │
//! │  ┌─────────────┬───────────┬──────────┬───────────────────┐│
//! │  │ Behavior    │ on_enter  │ on_exit  │ on_update         ││
//! │  ├─────────────┼───────────┼──────────┼───────────────────┤│
//! │  │ Idle        │ fn(ctx)   │ -        │ fn(ctx)->Option<> ││
//! │  │ IdleToSleep │ fn(ctx)   │ -        │ fn(ctx)->Option<> ││
//! │  │ Sleeping    │ fn(ctx)   │ -        │ fn(ctx)->Option<> ││
//! │  │ SleepToIdle │ fn(ctx)   │ -        │ fn(ctx)->Option<> ││
//! │  │ WalkLeft    │ -         │ -        │ fn(ctx)->Option<> ││
//! │  │ WalkRight   │ -         │ -        │ fn(ctx)->Option<> ││
//! │  │ Heart       │ fn(ctx)   │ -        │ fn(ctx)->Option<> ││
//! │  │ Homing      │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> ││
//! │  │ InHome      │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> ││
//! │  └─────────────┴───────────┴──────────┴───────────────────┘│
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** behavior.
//! If it returns `Some(next)`, the engine runs `on_exit` for the current
//! behavior, then `on_enter` for the next, and updates the current pointer.
//! All functions receive `&mut PetContext`, which holds the cursor sample,
//! expired timers, geometry, and the outbound presentation/task requests.

pub mod context;
pub mod states;

use context::PetContext;
use log::{info, warn};

use crate::error::Error;
use crate::geometry::Direction;

// ---------------------------------------------------------------------------
// Behavior identity
// ---------------------------------------------------------------------------

/// The pet's current activity.  Exactly one is active at any time.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Behavior {
    Idle = 0,
    IdleToSleep = 1,
    Sleeping = 2,
    SleepToIdle = 3,
    WalkLeft = 4,
    WalkRight = 5,
    Heart = 6,
    Homing = 7,
    InHome = 8,
}

impl Behavior {
    /// Total number of behaviors, used to size the table array.
    pub const COUNT: usize = 9;

    pub const ALL: [Behavior; Behavior::COUNT] = [
        Self::Idle,
        Self::IdleToSleep,
        Self::Sleeping,
        Self::SleepToIdle,
        Self::WalkLeft,
        Self::WalkRight,
        Self::Heart,
        Self::Homing,
        Self::InHome,
    ];

    /// Convert a table index back to `Behavior`.  An index outside the
    /// known set self-heals to `Idle`.
    pub fn from_index(idx: usize) -> Self {
        let raw = u8::try_from(idx).unwrap_or(u8::MAX);
        Self::try_from(raw).unwrap_or_else(|e| {
            warn!("{e}, resetting to Idle");
            Self::Idle
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::IdleToSleep => "IdleToSleep",
            Self::Sleeping => "Sleeping",
            Self::SleepToIdle => "SleepToIdle",
            Self::WalkLeft => "WalkLeft",
            Self::WalkRight => "WalkRight",
            Self::Heart => "Heart",
            Self::Homing => "Homing",
            Self::InHome => "InHome",
        }
    }

    /// Case-insensitive lookup by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Animation played while this behavior is active.  `InHome` is
    /// hidden and needs none.
    pub fn asset_name(self) -> Option<&'static str> {
        match self {
            Self::Idle => Some("idle"),
            Self::IdleToSleep => Some("idle_to_sleep"),
            Self::Sleeping => Some("sleep"),
            Self::SleepToIdle => Some("sleep_to_idle"),
            Self::WalkLeft | Self::Homing => Some("walk_left"),
            Self::WalkRight => Some("walk_right"),
            Self::Heart => Some("heart"),
            Self::InHome => None,
        }
    }

    /// Direction of the per-tick walking step, if this is a walking behavior.
    pub fn walk_direction(self) -> Option<Direction> {
        match self {
            Self::WalkLeft => Some(Direction::Left),
            Self::WalkRight => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn is_walking(self) -> bool {
        self.walk_direction().is_some()
    }

    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::WalkLeft,
            Direction::Right => Self::WalkRight,
        }
    }
}

impl TryFrom<u8> for Behavior {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or(Error::StateCorrupted(raw))
    }
}

impl core::fmt::Display for Behavior {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each transition.
pub type StateActionFn = fn(&mut PetContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut PetContext) -> Option<Behavior>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single behavior.
pub struct StateDescriptor {
    pub id: Behavior,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The behavior state machine.
///
/// Owns the state table and threads a [`PetContext`] through every
/// handler call.  It is the single authority on the current behavior.
pub struct Fsm {
    /// Fixed-size table indexed by `Behavior as usize`.
    table: [StateDescriptor; Behavior::COUNT],
    /// Index of the currently active behavior.
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current behavior was entered.
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given table, starting in `initial`.
    pub fn new(table: [StateDescriptor; Behavior::COUNT], initial: Behavior) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut PetContext) {
        info!("FSM starting in behavior: {}", self.current_state());
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current behavior.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut PetContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.force_transition(next_id, ctx);
        }
    }

    /// Transition immediately, bypassing `on_update`.  Used for
    /// timer callbacks that arrive between ticks and for recovery.
    /// A transition to the current behavior is a no-op.
    pub fn force_transition(&mut self, next: Behavior, ctx: &mut PetContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current behavior.
    pub fn current_state(&self) -> Behavior {
        Behavior::from_index(self.current)
    }

    /// Ticks run since [`start`](Self::start).
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: Behavior, ctx: &mut PetContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
