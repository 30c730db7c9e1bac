//! Pet service: the hexagonal core.
//!
//! [`PetService`] owns the FSM, the shared context, the cursor sampler and
//! animation playback.  It exposes a desktop-agnostic API: all I/O flows
//! through port traits injected at call sites, and all timing flows through
//! a [`Scheduler`] the caller owns, making the entire service testable with
//! mock adapters and simulated time.
//!
//! ```text
//!  PointerPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                  │        PetService          │
//! Presentation ◀───│  FSM · Timers · Animation  │
//!                  └────────────────────────────┘
//!                          ▲            │
//!                   Fired<PetTask>   schedule / cancel
//!                          │            ▼
//!                  ┌────────────────────────────┐
//!                  │     Scheduler<PetTask>     │
//!                  └────────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::animation::AnimationSet;
use crate::config::PetConfig;
use crate::cursor::CursorSampler;
use crate::error::Error;
use crate::fsm::context::{PetContext, TaskRequest};
use crate::fsm::states::build_state_table;
use crate::fsm::{Behavior, Fsm};
use crate::geometry::Point;
use crate::scheduler::{Fired, Scheduler, TaskHandle};
use crate::timers::TimerBank;

use super::commands::PetCommand;
use super::events::{PetEvent, PetSnapshot};
use super::ports::{EventSink, PointerPort, PresentationPort, RandomSource};

/// Work the service schedules on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetTask {
    /// The periodic behavior tick.
    Tick,
    /// Periodic status snapshot.
    Status,
    /// Start homing if the pet is still in Heart.
    StartHoming,
    /// One step of the walk toward home.
    HomingStep,
}

/// What the presentation surface currently shows.
#[derive(Debug, Clone, Copy)]
struct Shown {
    visible: bool,
    position: Point,
}

// ───────────────────────────────────────────────────────────────
// PetService
// ───────────────────────────────────────────────────────────────

/// The pet service orchestrates all domain logic.
pub struct PetService {
    fsm: Fsm,
    ctx: PetContext,
    sampler: CursorSampler,
    animations: AnimationSet,
    tick_task: Option<TaskHandle>,
    status_task: Option<TaskHandle>,
    homing_task: Option<TaskHandle>,
    step_task: Option<TaskHandle>,
    shown: Shown,
    started: bool,
    closed: bool,
}

impl PetService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM or schedule anything; call [`start`](Self::start) next.
    pub fn new(config: PetConfig, animations: AnimationSet, rng: Box<dyn RandomSource>) -> Self {
        let ctx = PetContext::new(config, rng);
        let start = ctx.geometry.position();
        Self {
            fsm: Fsm::new(build_state_table(), Behavior::Idle),
            sampler: CursorSampler::new(start),
            ctx,
            animations,
            tick_task: None,
            status_task: None,
            homing_task: None,
            step_task: None,
            shown: Shown {
                visible: false,
                position: start,
            },
            started: false,
            closed: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Idle, show the pet at its start position and
    /// schedule the periodic tick and status tasks.
    pub fn start(
        &mut self,
        sched: &mut Scheduler<PetTask>,
        io: &mut impl PresentationPort,
        sink: &mut impl EventSink,
    ) {
        if self.started {
            warn!("PetService already started");
            return;
        }
        self.started = true;
        self.fsm.start(&mut self.ctx);

        let cfg = &self.ctx.config;
        self.tick_task = sched.schedule_repeating("tick", cfg.tick_interval_ms, PetTask::Tick);
        self.status_task =
            sched.schedule_repeating("status", cfg.status_interval_ms, PetTask::Status);

        io.move_to(self.shown.position);
        io.show();
        self.shown.visible = true;

        sink.emit(&PetEvent::Started(self.fsm.current_state()));
        info!(
            "PetService started in {} at {:?}",
            self.fsm.current_state(),
            self.shown.position
        );
    }

    /// Dispatch one due task.  Tasks that fire after teardown are ignored.
    pub fn on_task_fired(
        &mut self,
        fired: Fired<PetTask>,
        sched: &mut Scheduler<PetTask>,
        io: &mut (impl PointerPort + PresentationPort),
        sink: &mut impl EventSink,
    ) {
        if self.closed {
            debug!("ignoring '{}' after teardown", fired.label);
            return;
        }
        match fired.task {
            PetTask::Tick => self.tick(sched, io, sink),
            PetTask::Status => sink.emit(&PetEvent::Status(self.snapshot(sched))),
            PetTask::StartHoming => {
                if self.homing_task == Some(fired.handle) {
                    self.homing_task = None;
                }
                self.start_homing(sched, io, sink);
            }
            PetTask::HomingStep => {
                if self.step_task == Some(fired.handle) {
                    self.step_task = None;
                }
                self.homing_step(sched, io, sink);
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one behavior tick: timers → cursor → FSM → geometry → presentation.
    ///
    /// The `io` parameter satisfies **both** [`PointerPort`] and
    /// [`PresentationPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    fn tick(
        &mut self,
        sched: &mut Scheduler<PetTask>,
        io: &mut (impl PointerPort + PresentationPort),
        sink: &mut impl EventSink,
    ) {
        let prev = self.fsm.current_state();

        // 1. Countdown timers
        self.ctx.expired = self.ctx.timers.tick(self.ctx.config.tick_interval_ms);

        // 2. Cursor sample
        let at = io.pointer_position();
        self.ctx.cursor = self.sampler.sample(at, &self.ctx.geometry);
        self.ctx.frames_in_behavior = self.animations.frame_count(prev);

        // 3. FSM tick (pure behavior logic)
        self.fsm.tick(&mut self.ctx);

        // 4. Tasks, fallback, events
        self.resolve(prev, sched, sink);

        // 5. Walking step for the behavior that survived the fallback
        if let Some(direction) = self.fsm.current_state().walk_direction() {
            self.ctx
                .geometry
                .walk(direction, self.ctx.config.move_step_px);
        }

        // 6. Surface
        self.sync_presentation(io);
        self.present_frame(io);
        self.ctx.clear_inputs();
    }

    // ── Homing ────────────────────────────────────────────────

    fn start_homing(
        &mut self,
        sched: &mut Scheduler<PetTask>,
        io: &mut impl PresentationPort,
        sink: &mut impl EventSink,
    ) {
        let prev = self.fsm.current_state();
        if prev != Behavior::Heart {
            debug!("homing skipped, pet is in {prev}");
            return;
        }
        self.fsm.force_transition(Behavior::Homing, &mut self.ctx);
        self.settle(prev, sched, io, sink);
    }

    /// Step toward home.  Arrival is declared within one step of the home
    /// radius, or as soon as a step makes no progress.
    fn homing_step(
        &mut self,
        sched: &mut Scheduler<PetTask>,
        io: &mut impl PresentationPort,
        sink: &mut impl EventSink,
    ) {
        let prev = self.fsm.current_state();
        if prev != Behavior::Homing {
            debug!("stale homing step in {prev}");
            return;
        }

        let cfg = &self.ctx.config;
        let step = cfg.move_step_px;
        let home = cfg.home();
        let arrive_within = f64::from(step + cfg.home_radius_px);

        let arrived = if self.ctx.home_distance() <= arrive_within {
            true
        } else if self.ctx.geometry.step_toward(home, step) {
            self.ctx.home_distance() <= arrive_within
        } else {
            warn!(
                "homing blocked at {:?}, settling in",
                self.ctx.geometry.position()
            );
            true
        };

        if arrived {
            self.fsm.force_transition(Behavior::InHome, &mut self.ctx);
        } else {
            self.step_task = sched.schedule_once(
                "homing-step",
                self.ctx.config.tick_interval_ms,
                PetTask::HomingStep,
            );
        }
        self.settle(prev, sched, io, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an input command (mouse button, key, debug console).
    pub fn handle_command(
        &mut self,
        cmd: PetCommand,
        sched: &mut Scheduler<PetTask>,
        io: &mut impl PresentationPort,
        sink: &mut impl EventSink,
    ) {
        if self.closed {
            debug!("ignoring {cmd:?} after teardown");
            return;
        }
        match cmd {
            PetCommand::PrimaryClick => {
                info!("Detected left click");
                sink.emit(&PetEvent::Clicked {
                    at: self.ctx.geometry.position(),
                });
            }
            cmd if cmd.is_quit() => self.quit(sched, io, sink),
            PetCommand::SecondaryClick | PetCommand::Quit => self.quit(sched, io, sink),
            PetCommand::KeyPress(key) => debug!("ignoring key {key:?}"),
            PetCommand::ForceBehavior(target) => {
                let prev = self.fsm.current_state();
                self.fsm.force_transition(target, &mut self.ctx);
                self.settle(prev, sched, io, sink);
            }
        }
    }

    /// Tear the pet down.  Safe to call any number of times.
    pub fn quit(
        &mut self,
        sched: &mut Scheduler<PetTask>,
        io: &mut impl PresentationPort,
        sink: &mut impl EventSink,
    ) {
        match self.teardown(sched, io, sink) {
            Ok(()) => {}
            Err(e @ Error::AlreadyClosed) => debug!("quit ignored: {e}"),
            Err(e) => warn!("teardown failed: {e}"),
        }
    }

    fn teardown(
        &mut self,
        sched: &mut Scheduler<PetTask>,
        io: &mut impl PresentationPort,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        if self.closed {
            return Err(Error::AlreadyClosed);
        }
        self.closed = true;

        // Cancel all scheduled work before the surface goes away.
        let cancelled = sched.cancel_all();
        self.tick_task = None;
        self.status_task = None;
        self.homing_task = None;
        self.step_task = None;

        io.release();
        self.shown.visible = false;

        sink.emit(&PetEvent::Stopped {
            cancelled_tasks: cancelled,
        });
        info!("PetService stopped, {cancelled} tasks cancelled");
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot from the current context.
    pub fn snapshot(&self, sched: &Scheduler<PetTask>) -> PetSnapshot {
        let p = self.ctx.geometry.position();
        PetSnapshot {
            behavior: self.fsm.current_state().name(),
            x: p.x,
            y: p.y,
            visible: self.shown.visible,
            sleep_ms: self.ctx.timers.sleep.remaining_ms(),
            heart_ms: self.ctx.timers.heart.remaining_ms(),
            home_ms: self.ctx.timers.home.remaining_ms(),
            ticks: self.fsm.tick_count(),
            pending_tasks: sched.active_count(),
        }
    }

    /// Current behavior.
    pub fn behavior(&self) -> Behavior {
        self.fsm.current_state()
    }

    pub fn position(&self) -> Point {
        self.ctx.geometry.position()
    }

    pub fn is_visible(&self) -> bool {
        self.shown.visible
    }

    pub fn timers(&self) -> &TimerBank {
        &self.ctx.timers
    }

    pub fn config(&self) -> &PetConfig {
        &self.ctx.config
    }

    /// Behavior ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.fsm.tick_count()
    }

    /// Pending start-homing check, if any.
    pub fn homing_task(&self) -> Option<TaskHandle> {
        self.homing_task
    }

    /// Pending homing step, if any.
    pub fn step_task(&self) -> Option<TaskHandle> {
        self.step_task
    }

    pub fn tick_task(&self) -> Option<TaskHandle> {
        self.tick_task
    }

    pub fn status_task(&self) -> Option<TaskHandle> {
        self.status_task
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ── Internal ──────────────────────────────────────────────

    /// Apply a transition's task requests and events, then sync the surface.
    fn settle(
        &mut self,
        prev: Behavior,
        sched: &mut Scheduler<PetTask>,
        io: &mut impl PresentationPort,
        sink: &mut impl EventSink,
    ) {
        self.resolve(prev, sched, sink);
        self.sync_presentation(io);
    }

    /// Apply task requests and the missing-frames fallback, then report
    /// what changed since `prev`.
    fn resolve(
        &mut self,
        prev: Behavior,
        sched: &mut Scheduler<PetTask>,
        sink: &mut impl EventSink,
    ) {
        self.apply_requests(sched);

        let mut current = self.fsm.current_state();
        if current != Behavior::Idle && !self.animations.is_playable(current) {
            warn!("{current} has no frames, falling back to Idle");
            self.fsm.force_transition(Behavior::Idle, &mut self.ctx);
            self.apply_requests(sched);
            sink.emit(&PetEvent::FellBackToIdle { from: current });
            current = Behavior::Idle;
        }

        if current != prev {
            self.animations.reset();
            sink.emit(&PetEvent::BehaviorChanged {
                from: prev,
                to: current,
            });
            if current == Behavior::InHome {
                sink.emit(&PetEvent::EnteredHome {
                    dwell_ms: self.ctx.timers.home.remaining_ms(),
                });
            }
            if prev == Behavior::InHome {
                sink.emit(&PetEvent::LeftHome {
                    at: self.ctx.geometry.position(),
                });
            }
        }
    }

    /// Translate FSM task requests into scheduler calls.
    fn apply_requests(&mut self, sched: &mut Scheduler<PetTask>) {
        for req in self.ctx.take_requests() {
            match req {
                TaskRequest::ScheduleHoming { delay_ms } => {
                    if let Some(old) = self.homing_task.take() {
                        sched.cancel(old);
                    }
                    self.homing_task =
                        sched.schedule_once("start-homing", delay_ms, PetTask::StartHoming);
                }
                TaskRequest::StartHomingWalk => {
                    self.cancel_step(sched);
                    self.step_task = sched.schedule_once(
                        "homing-step",
                        self.ctx.config.tick_interval_ms,
                        PetTask::HomingStep,
                    );
                }
                TaskRequest::StopHomingWalk => self.cancel_step(sched),
            }
        }
    }

    fn cancel_step(&mut self, sched: &mut Scheduler<PetTask>) {
        if let Some(h) = self.step_task.take() {
            sched.cancel(h);
        }
    }

    /// Push position and visibility changes to the surface.
    fn sync_presentation(&mut self, io: &mut impl PresentationPort) {
        let position = self.ctx.geometry.position();
        if position != self.shown.position {
            io.move_to(position);
            self.shown.position = position;
        }

        let visible = self.ctx.commands.visible;
        if visible != self.shown.visible {
            if visible {
                io.show();
            } else {
                io.hide();
            }
            self.shown.visible = visible;
        }
    }

    fn present_frame(&mut self, io: &mut impl PresentationPort) {
        if !self.shown.visible {
            return;
        }
        if let Some(frame) = self.animations.next_frame(self.fsm.current_state()) {
            io.set_frame(frame);
        }
    }
}
