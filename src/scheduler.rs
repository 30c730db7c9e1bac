//! Simulated-time task scheduler.
//!
//! Holds a small fixed table of pending tasks, each either repeating at a
//! fixed interval or firing once after a delay.  The scheduler never runs
//! task logic itself: [`Scheduler::run_until`] hands each due task to a
//! [`SchedulerDelegate`] one at a time, so no two callbacks ever overlap.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Scheduler<T>                                                │
//! │  ┌──────┬──────────────┬────────┬──────────────┐             │
//! │  │ slot │ task         │ due_ms │ kind         │             │
//! │  ├──────┼──────────────┼────────┼──────────────┤             │
//! │  │ 0    │ Tick         │ 1200   │ Repeating    │             │
//! │  │ 1    │ Status       │ 10000  │ Repeating    │             │
//! │  │ 2    │ StartHoming  │ 5400   │ Once         │             │
//! │  └──────┴──────────────┴────────┴──────────────┘             │
//! │                     │ earliest due first                     │
//! │                     ▼                                        │
//! │            SchedulerDelegate::on_task_fired                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`TaskHandle`]s carry a per-slot generation.  Once a task is cancelled
//! or a one-shot has fired, its handle goes stale: cancelling it again is a
//! no-op and it can never match a newer task that reuses the slot.

use crate::app::ports::SchedulerDelegate;
use log::{debug, warn};

/// Maximum number of concurrent tasks (stack-allocated).
pub const MAX_TASKS: usize = 8;

/// Cancellable reference to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    slot: u8,
    generation: u32,
}

/// How a task is re-armed after firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// Fire every `interval_ms` until cancelled.
    Repeating { interval_ms: u32 },
    /// Fire once, then free the slot.
    Once,
}

/// A task handed to the delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<T> {
    pub handle: TaskHandle,
    pub task: T,
    pub label: &'static str,
    /// Simulated time at which the task fired.
    pub at_ms: u64,
    pub kind: ScheduleKind,
}

/// Internal bookkeeping for a live task.
#[derive(Debug, Clone)]
struct TaskEntry<T> {
    task: T,
    label: &'static str,
    kind: ScheduleKind,
    due_ms: u64,
    /// Creation order, used to break ties between equal due times.
    seq: u64,
}

/// The scheduler engine.
pub struct Scheduler<T> {
    slots: [Option<TaskEntry<T>>; MAX_TASKS],
    generations: [u32; MAX_TASKS],
    now_ms: u64,
    next_seq: u64,
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            generations: [0; MAX_TASKS],
            now_ms: 0,
            next_seq: 0,
        }
    }

    /// Current simulated time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` every `interval_ms`, first firing one interval from now.
    /// Returns `None` if the table is full.
    pub fn schedule_repeating(
        &mut self,
        label: &'static str,
        interval_ms: u32,
        task: T,
    ) -> Option<TaskHandle> {
        let interval_ms = interval_ms.max(1);
        self.insert(label, task, ScheduleKind::Repeating { interval_ms }, interval_ms)
    }

    /// Schedule `task` once, `delay_ms` from now.  Returns `None` if the table is full.
    pub fn schedule_once(&mut self, label: &'static str, delay_ms: u32, task: T) -> Option<TaskHandle> {
        self.insert(label, task, ScheduleKind::Once, delay_ms)
    }

    /// Cancel a pending task.  Returns `false` if the handle is stale.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if !self.is_pending(handle) {
            return false;
        }
        let slot = handle.slot as usize;
        if let Some(entry) = self.slots[slot].take() {
            debug!("Scheduler: cancelled '{}' in slot {}", entry.label, slot);
        }
        self.retire(slot);
        true
    }

    /// Cancel everything.  Returns the number of tasks dropped.
    pub fn cancel_all(&mut self) -> usize {
        let mut dropped = 0;
        for slot in 0..MAX_TASKS {
            if self.slots[slot].take().is_some() {
                self.retire(slot);
                dropped += 1;
            }
        }
        dropped
    }

    /// Whether `handle` still refers to a task that may fire.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        let slot = handle.slot as usize;
        slot < MAX_TASKS && self.generations[slot] == handle.generation && self.slots[slot].is_some()
    }

    /// Next fire time of a pending task.
    pub fn due_at(&self, handle: TaskHandle) -> Option<u64> {
        if !self.is_pending(handle) {
            return None;
        }
        self.slots[handle.slot as usize].as_ref().map(|e| e.due_ms)
    }

    /// Earliest due time across all pending tasks.
    pub fn next_due(&self) -> Option<u64> {
        self.slots.iter().flatten().map(|e| e.due_ms).min()
    }

    /// Number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate the pending tasks' payloads.
    pub fn pending_tasks(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten().map(|e| &e.task)
    }

    /// Remove the earliest task due at or before `until_ms` and advance the
    /// clock to its due time.  Repeating tasks are re-armed before they are
    /// returned, so the delegate may cancel them from inside the callback.
    ///
    /// When nothing is due the clock advances to `until_ms` and `None` is
    /// returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let slot = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e.due_ms, e.seq)))
            .filter(|&(_, due, _)| due <= until_ms)
            .min_by_key(|&(_, due, seq)| (due, seq))
            .map(|(i, _, _)| i);

        let Some(slot) = slot else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let handle = TaskHandle {
            slot: slot as u8,
            generation: self.generations[slot],
        };
        let entry = self.slots[slot].as_mut()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        let fired = Fired {
            handle,
            task: entry.task,
            label: entry.label,
            at_ms: entry.due_ms,
            kind: entry.kind,
        };

        let kind = entry.kind;
        match kind {
            ScheduleKind::Repeating { interval_ms } => {
                entry.due_ms += u64::from(interval_ms);
            }
            ScheduleKind::Once => {
                self.slots[slot] = None;
                self.retire(slot);
            }
        }
        Some(fired)
    }

    /// Fire every task due up to `until_ms`, one at a time, in due order.
    /// Tasks scheduled by the delegate are eligible in the same call.
    /// Returns the number of callbacks delivered.
    pub fn run_until(&mut self, until_ms: u64, delegate: &mut impl SchedulerDelegate<T>) -> usize {
        let mut delivered = 0;
        while let Some(fired) = self.pop_due(until_ms) {
            delegate.on_task_fired(fired, self);
            delivered += 1;
        }
        delivered
    }

    /// Advance the clock by `elapsed_ms`, firing whatever falls due.
    pub fn advance(&mut self, elapsed_ms: u64, delegate: &mut impl SchedulerDelegate<T>) -> usize {
        let until = self.now_ms + elapsed_ms;
        self.run_until(until, delegate)
    }

    // ── Internal ──────────────────────────────────────────────

    fn insert(
        &mut self,
        label: &'static str,
        task: T,
        kind: ScheduleKind,
        delay_ms: u32,
    ) -> Option<TaskHandle> {
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            warn!("Scheduler: table full, dropped '{}'", label);
            return None;
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[slot] = Some(TaskEntry {
            task,
            label,
            kind,
            due_ms: self.now_ms + u64::from(delay_ms),
            seq,
        });
        debug!(
            "Scheduler: '{}' in slot {} due at {}ms",
            label,
            slot,
            self.now_ms + u64::from(delay_ms)
        );
        Some(TaskHandle {
            slot: slot as u8,
            generation: self.generations[slot],
        })
    }

    /// Invalidate outstanding handles for a freed slot.
    fn retire(&mut self, slot: usize) {
        self.generations[slot] = self.generations[slot].wrapping_add(1);
    }
}
