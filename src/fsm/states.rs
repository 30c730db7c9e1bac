//! Concrete behavior handler functions and table builder.
//!
//! Each behavior is defined by three plain `fn` pointers, no closures and
//! no dynamic dispatch.  The classic embedded C FSM pattern expressed in
//! safe Rust.
//!
//! ```text
//!            ┌──[moved]──▶ WALK_LEFT / WALK_RIGHT ──[near home]──▶ IN_HOME
//!            │                    │                                  │
//!  IDLE ─────┼──[pointer on pet]──┼──▶ HEART ──[homing delay]──▶ HOMING
//!    ▲       │                    │                                  │
//!    │       └──[sleep expired]───┴──▶ SLEEPING           [arrived]──┘
//!    │                                   │                       │
//!    │                              [wake roll]            [dwell done]
//!    │                                   ▼                       │
//!    └───────────────────────────── SLEEP_TO_IDLE ◀── IDLE ◀─────┘
//! ```
//!
//! Handlers never touch the scheduler.  Anything time-based beyond the
//! countdowns is requested through [`TaskRequest`] and applied by the
//! service after the tick.

use super::context::{PetContext, TaskRequest};
use super::{Behavior, StateDescriptor};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static behavior table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; Behavior::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: Behavior::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: IdleToSleep
        StateDescriptor {
            id: Behavior::IdleToSleep,
            name: "IdleToSleep",
            on_enter: Some(idle_to_sleep_enter),
            on_exit: None,
            on_update: idle_to_sleep_update,
        },
        // Index 2: Sleeping
        StateDescriptor {
            id: Behavior::Sleeping,
            name: "Sleeping",
            on_enter: Some(sleeping_enter),
            on_exit: None,
            on_update: sleeping_update,
        },
        // Index 3: SleepToIdle
        StateDescriptor {
            id: Behavior::SleepToIdle,
            name: "SleepToIdle",
            on_enter: Some(sleep_to_idle_enter),
            on_exit: None,
            on_update: sleep_to_idle_update,
        },
        // Index 4: WalkLeft
        StateDescriptor {
            id: Behavior::WalkLeft,
            name: "WalkLeft",
            on_enter: None,
            on_exit: None,
            on_update: walk_left_update,
        },
        // Index 5: WalkRight
        StateDescriptor {
            id: Behavior::WalkRight,
            name: "WalkRight",
            on_enter: None,
            on_exit: None,
            on_update: walk_right_update,
        },
        // Index 6: Heart
        StateDescriptor {
            id: Behavior::Heart,
            name: "Heart",
            on_enter: Some(heart_enter),
            on_exit: None,
            on_update: heart_update,
        },
        // Index 7: Homing
        StateDescriptor {
            id: Behavior::Homing,
            name: "Homing",
            on_enter: Some(homing_enter),
            on_exit: Some(homing_exit),
            on_update: homing_update,
        },
        // Index 8: InHome
        StateDescriptor {
            id: Behavior::InHome,
            name: "InHome",
            on_enter: Some(in_home_enter),
            on_exit: Some(in_home_exit),
            on_update: in_home_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared cursor tracking (Idle, WalkLeft, WalkRight, Heart)
// ═══════════════════════════════════════════════════════════════════════════

/// Decide the next behavior from timers and the pointer.
///
/// Priority: sleep expiry, then petting, then home proximity (walking
/// only, and only once the pet has been clear of home since its last
/// visit), then pointer direction.  While the heart countdown runs the pet
/// does not start walking.  A stationary pointer changes nothing.
fn track_cursor(ctx: &mut PetContext, current: Behavior) -> Option<Behavior> {
    if ctx.expired.sleep {
        return Some(Behavior::Sleeping);
    }

    if ctx.cursor.on_pet {
        let range = ctx.config.petted_sleep_delay_ms;
        let delay = ctx.draw(range);
        ctx.timers.sleep.reset(delay);
        if current != Behavior::Heart && !ctx.timers.heart.is_running() {
            return Some(Behavior::Heart);
        }
        return None;
    }

    let radius = f64::from(ctx.config.home_radius_px);
    let distance = ctx.home_distance();
    if !ctx.home_armed && distance > home_clearance(ctx) {
        debug!("clear of home, re-arming entry");
        ctx.home_armed = true;
    }
    if ctx.home_armed && current.is_walking() && distance < radius {
        return Some(Behavior::InHome);
    }

    if ctx.timers.heart.is_running() || !ctx.cursor.moved {
        return None;
    }

    let next = Behavior::for_direction(ctx.cursor.direction_from(ctx.geometry.position()));
    (next != current).then_some(next)
}

/// Distance the pet must walk from home, after leaving it, before walking
/// back in counts as arriving.  One step beyond both the home radius and
/// the exit point.
fn home_clearance(ctx: &PetContext) -> f64 {
    let cfg = &ctx.config;
    let exit = cfg.home().distance_to(cfg.home_exit_position());
    exit.max(f64::from(cfg.home_radius_px)) + f64::from(cfg.move_step_px)
}

/// Transitional animations finish once every frame has been shown.
fn animation_finished(ctx: &PetContext) -> bool {
    ctx.ticks_in_state >= ctx.frames_in_behavior.max(1) as u64
}

fn rearm_sleep(ctx: &mut PetContext) {
    let range = ctx.config.sleep_delay_ms;
    let delay = ctx.draw(range);
    ctx.timers.sleep.reset(delay);
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE / WALK
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut PetContext) -> Option<Behavior> {
    track_cursor(ctx, Behavior::Idle)
}

fn walk_left_update(ctx: &mut PetContext) -> Option<Behavior> {
    track_cursor(ctx, Behavior::WalkLeft)
}

fn walk_right_update(ctx: &mut PetContext) -> Option<Behavior> {
    track_cursor(ctx, Behavior::WalkRight)
}

// ═══════════════════════════════════════════════════════════════════════════
//  SLEEP cycle
// ═══════════════════════════════════════════════════════════════════════════

fn idle_to_sleep_enter(ctx: &mut PetContext) {
    ctx.timers.sleep.disarm();
}

fn idle_to_sleep_update(ctx: &mut PetContext) -> Option<Behavior> {
    animation_finished(ctx).then_some(Behavior::Sleeping)
}

fn sleeping_enter(ctx: &mut PetContext) {
    ctx.timers.sleep.disarm();
    info!("SLEEPING: wake chance {} per tick", ctx.config.wake_probability);
}

fn sleeping_update(ctx: &mut PetContext) -> Option<Behavior> {
    let p = ctx.config.wake_probability;
    ctx.chance(p).then_some(Behavior::SleepToIdle)
}

fn sleep_to_idle_enter(ctx: &mut PetContext) {
    rearm_sleep(ctx);
    debug!("waking, sleep in {} ms", ctx.timers.sleep.remaining_ms());
}

fn sleep_to_idle_update(ctx: &mut PetContext) -> Option<Behavior> {
    animation_finished(ctx).then_some(Behavior::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  HEART
// ═══════════════════════════════════════════════════════════════════════════

fn heart_enter(ctx: &mut PetContext) {
    ctx.timers.heart.reset(ctx.config.heart_duration_ms);
    ctx.request(TaskRequest::ScheduleHoming {
        delay_ms: ctx.config.homing_delay_ms,
    });
    info!(
        "HEART: homing in {} ms unless interrupted",
        ctx.config.homing_delay_ms
    );
}

fn heart_update(ctx: &mut PetContext) -> Option<Behavior> {
    track_cursor(ctx, Behavior::Heart)
}

// ═══════════════════════════════════════════════════════════════════════════
//  HOMING
// ═══════════════════════════════════════════════════════════════════════════

fn homing_enter(ctx: &mut PetContext) {
    ctx.timers.sleep.disarm();
    ctx.request(TaskRequest::StartHomingWalk);
    info!(
        "HOMING: {:.0} px from home",
        ctx.home_distance()
    );
}

fn homing_exit(ctx: &mut PetContext) {
    ctx.request(TaskRequest::StopHomingWalk);
}

/// The walk itself is driven by scheduled steps; the pointer is ignored.
fn homing_update(_ctx: &mut PetContext) -> Option<Behavior> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  IN HOME
// ═══════════════════════════════════════════════════════════════════════════

fn in_home_enter(ctx: &mut PetContext) {
    let range = ctx.config.home_dwell_ms;
    let dwell = ctx.draw(range);
    ctx.timers.home.reset(dwell);
    ctx.timers.sleep.disarm();
    ctx.commands.visible = false;
    info!("IN_HOME: resting for {dwell} ms");
}

fn in_home_update(ctx: &mut PetContext) -> Option<Behavior> {
    ctx.expired.home.then_some(Behavior::Idle)
}

fn in_home_exit(ctx: &mut PetContext) {
    let exit = ctx.config.home_exit_position();
    ctx.geometry.set_position(exit);
    ctx.timers.home.disarm();
    ctx.home_armed = false;
    rearm_sleep(ctx);
    ctx.commands.visible = true;
    info!("left home at {:?}", ctx.geometry.position());
}
