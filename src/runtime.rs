//! Runtime: the service, its scheduler, and the adapters, wired together.
//!
//! [`PetRuntime`] is what the binary and the integration tests drive.  It
//! owns every piece, so callers only pick how far to advance simulated
//! time and which input commands to inject.  Dropping a runtime tears the
//! pet down.

use crate::animation::AnimationSet;
use crate::app::commands::PetCommand;
use crate::app::ports::{EventSink, PointerPort, PresentationPort, RandomSource, SchedulerDelegate};
use crate::app::service::{PetService, PetTask};
use crate::config::PetConfig;
use crate::scheduler::{Fired, Scheduler};

/// Routes due tasks from the scheduler into the service.
struct Dispatcher<'a, D, S> {
    service: &'a mut PetService,
    desktop: &'a mut D,
    sink: &'a mut S,
}

impl<D, S> SchedulerDelegate<PetTask> for Dispatcher<'_, D, S>
where
    D: PointerPort + PresentationPort,
    S: EventSink,
{
    fn on_task_fired(&mut self, fired: Fired<PetTask>, scheduler: &mut Scheduler<PetTask>) {
        self.service
            .on_task_fired(fired, scheduler, self.desktop, self.sink);
    }
}

/// A running pet.
pub struct PetRuntime<D: PointerPort + PresentationPort, S: EventSink> {
    service: PetService,
    scheduler: Scheduler<PetTask>,
    desktop: D,
    sink: S,
}

impl<D: PointerPort + PresentationPort, S: EventSink> PetRuntime<D, S> {
    pub fn new(
        config: PetConfig,
        animations: AnimationSet,
        rng: Box<dyn RandomSource>,
        desktop: D,
        sink: S,
    ) -> Self {
        Self {
            service: PetService::new(config, animations, rng),
            scheduler: Scheduler::new(),
            desktop,
            sink,
        }
    }

    /// Show the pet and schedule its periodic tasks.
    pub fn start(&mut self) {
        self.service
            .start(&mut self.scheduler, &mut self.desktop, &mut self.sink);
    }

    /// Fire every task due up to `now_ms`.  Returns the number fired.
    pub fn run_until(&mut self, now_ms: u64) -> usize {
        let mut dispatcher = Dispatcher {
            service: &mut self.service,
            desktop: &mut self.desktop,
            sink: &mut self.sink,
        };
        self.scheduler.run_until(now_ms, &mut dispatcher)
    }

    /// Advance simulated time by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let until = self.scheduler.now_ms() + elapsed_ms;
        self.run_until(until)
    }

    /// Advance by exactly `n` behavior ticks.
    pub fn run_ticks(&mut self, n: u64) -> usize {
        let interval = u64::from(self.service.config().tick_interval_ms);
        self.advance(n * interval)
    }

    pub fn handle_command(&mut self, cmd: PetCommand) {
        self.service
            .handle_command(cmd, &mut self.scheduler, &mut self.desktop, &mut self.sink);
    }

    /// Tear down.  Idempotent.
    pub fn quit(&mut self) {
        self.service
            .quit(&mut self.scheduler, &mut self.desktop, &mut self.sink);
    }

    pub fn is_closed(&self) -> bool {
        self.service.is_closed()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// When the next task falls due, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn service(&self) -> &PetService {
        &self.service
    }

    pub fn scheduler(&self) -> &Scheduler<PetTask> {
        &self.scheduler
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut D {
        &mut self.desktop
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<D: PointerPort + PresentationPort, S: EventSink> Drop for PetRuntime<D, S> {
    fn drop(&mut self) {
        // Only a started pet owns a surface worth releasing.
        if self.service.is_started() {
            self.quit();
        }
    }
}
