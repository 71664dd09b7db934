//! # MLFQ Supervisor
//!
//! Runs as the highest-priority task. Owns the task→level mapping and
//! translates policy decisions — demote, boost, explicit promote — into
//! kernel priority changes and accountant quantum updates.
//!
//! The control loop is split into [`Supervisor::poll_once`] (one
//! iteration's worth of work: drain expiries, maybe boost, maybe report)
//! and [`Supervisor::run`] (`loop { poll_once(); delay(...) }`), the same
//! separation Tock's MLFQ scheduler draws between a single process
//! timeslice and its `kernel_loop`. `poll_once` is what the tests below
//! exercise directly.

use crate::accountant::TickAccountant;
use crate::channel::ExpiryConsumer;
use crate::config::{boost_period_ticks, MAX_TASKS, SUPERVISOR_LOOP_DELAY_TICKS};
use crate::error::MlfqError;
use crate::kernel::RtKernel;
use crate::level::MlfqLevel;
use crate::task::{NoSideEffects, SideEffects, TaskHandle};

#[derive(Debug, Clone, Copy)]
struct Record {
    task: Option<TaskHandle>,
    level: MlfqLevel,
    arrival_tick: u32,
}

impl Record {
    const EMPTY: Record = Record {
        task: None,
        level: MlfqLevel::High,
        arrival_tick: 0,
    };
}

/// A read-only view of one occupied slot, combining the supervisor's own
/// record with a live runtime read from the accountant. Returned by
/// [`Supervisor::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub task: TaskHandle,
    pub level: MlfqLevel,
    pub run_ticks: u32,
    pub quantum_ticks: u32,
    pub arrival_tick: u32,
    pub waiting_ticks: u32,
}

/// Owns the supervisor-side task table, the consuming end of the expiry
/// channel, and the accountant it drives.
pub struct Supervisor<S: SideEffects = NoSideEffects> {
    table: [Record; MAX_TASKS],
    expiries: ExpiryConsumer,
    last_boost: u32,
    side_effects: S,
}

impl Supervisor<NoSideEffects> {
    /// Builds a supervisor with no observability hooks attached.
    pub fn new(expiries: ExpiryConsumer) -> Self {
        Self::with_side_effects(expiries, NoSideEffects)
    }
}

impl<S: SideEffects> Supervisor<S> {
    /// Builds a supervisor with a caller-supplied [`SideEffects`] sink.
    pub fn with_side_effects(expiries: ExpiryConsumer, side_effects: S) -> Self {
        Self {
            table: [Record::EMPTY; MAX_TASKS],
            expiries,
            last_boost: 0,
            side_effects,
        }
    }

    fn find(&self, task: TaskHandle) -> Option<usize> {
        self.table.iter().position(|r| r.task == Some(task))
    }

    fn find_empty(&self) -> Option<usize> {
        self.table.iter().position(|r| r.task.is_none())
    }

    /// Registers `task` at [`MlfqLevel::High`]: allocates an accountant
    /// slot, sets the kernel priority, and installs the High quantum.
    /// A no-op (returning the accountant's error) if the accountant
    /// rejects the registration — the supervisor's own table is left
    /// untouched in that case.
    pub fn register<K: RtKernel>(
        &mut self,
        kernel: &mut K,
        accountant: &mut TickAccountant,
        task: TaskHandle,
    ) -> Result<(), MlfqError> {
        accountant.register(kernel, task)?;
        let slot = self.find_empty().ok_or(MlfqError::TableFull)?;
        let now = kernel.tick_count();
        self.table[slot] = Record {
            task: Some(task),
            level: MlfqLevel::High,
            arrival_tick: now,
        };
        self.apply_level(kernel, accountant, slot);
        Ok(())
    }

    /// Applies `new_level` to an already-registered task: updates the
    /// supervisor record, the kernel priority, and the accountant's
    /// quantum, and resets its runtime. Idempotent when the level is
    /// unchanged — still resets runtime and re-notifies the side-effect
    /// sink, so demoting a task already at the floor simply restarts its
    /// quantum.
    pub fn set_level<K: RtKernel>(
        &mut self,
        kernel: &mut K,
        accountant: &mut TickAccountant,
        task: TaskHandle,
        new_level: MlfqLevel,
    ) -> Result<(), MlfqError> {
        let slot = self.find(task).ok_or(MlfqError::NotFound)?;
        self.table[slot].level = new_level;
        self.apply_level(kernel, accountant, slot);
        Ok(())
    }

    /// Applies `level`'s kernel priority, quantum, and a runtime reset to
    /// `slot`'s task as a single unit. The whole sequence runs inside one
    /// `critical_section` so the tick ISR can never observe the new
    /// quantum installed against a stale `run_ticks` — a tick that would
    /// have fired mid-update is deferred until the section exits and
    /// accounts toward the freshly reset quantum instead, per the
    /// ordering guarantee `set_level` must uphold.
    fn apply_level<K: RtKernel>(&mut self, kernel: &mut K, accountant: &mut TickAccountant, slot: usize) {
        let task = match self.table[slot].task {
            Some(t) => t,
            None => return,
        };
        let level = self.table[slot].level;
        kernel.critical_section(|k| {
            let _ = k.set_priority(task, level.priority_of());
            let _ = accountant.set_quantum(k, task, level.quantum_of());
            let _ = accountant.reset_runtime(k, task);
        });
        self.side_effects.level_change(task, level);
    }

    /// Demotes the task at supervisor-table `index` by one level
    /// (clamped at `Low`). Takes an index rather than a captured record
    /// so a stale counter from enqueue time can never be applied to a
    /// task whose state has since moved on. A no-op if the slot is
    /// empty.
    pub fn check_for_demotion<K: RtKernel>(
        &mut self,
        kernel: &mut K,
        accountant: &mut TickAccountant,
        index: usize,
    ) {
        let task = match self.table.get(index).and_then(|r| r.task) {
            Some(t) => t,
            None => return,
        };
        let next = self.table[index].level.demoted();
        let _ = self.set_level(kernel, accountant, task, next);
    }

    /// Returns every occupied slot to [`MlfqLevel::High`].
    pub fn global_boost<K: RtKernel>(&mut self, kernel: &mut K, accountant: &mut TickAccountant) {
        for i in 0..MAX_TASKS {
            if let Some(task) = self.table[i].task {
                let _ = self.set_level(kernel, accountant, task, MlfqLevel::High);
            }
        }
    }

    /// Raises a task's level by one (clamped at `High`). Not called by
    /// the default control loop; exposed for hosts that can detect
    /// voluntary blocking by means outside this crate (e.g. a wrapper
    /// around their own blocking primitive).
    pub fn promote_interactive<K: RtKernel>(
        &mut self,
        kernel: &mut K,
        accountant: &mut TickAccountant,
        task: TaskHandle,
    ) -> Result<(), MlfqError> {
        let slot = self.find(task).ok_or(MlfqError::NotFound)?;
        let next = self.table[slot].level.promoted();
        self.set_level(kernel, accountant, task, next)
    }

    /// A read-only combined view of slot `index`, or `None` if it is out
    /// of range or empty.
    pub fn snapshot(&self, accountant: &TickAccountant, index: usize) -> Option<TaskStats> {
        let record = self.table.get(index)?;
        let task = record.task?;
        let run_ticks = accountant.runtime(task);
        let quantum_ticks = record.level.quantum_of();
        Some(TaskStats {
            task,
            level: record.level,
            run_ticks,
            quantum_ticks,
            arrival_tick: record.arrival_tick,
            waiting_ticks: 0,
        })
    }

    /// Like [`Supervisor::snapshot`] but fills in `waiting_ticks` against
    /// the current tick count: `max(0, now - arrival_tick - run_ticks)`.
    pub fn snapshot_at<K: RtKernel>(
        &self,
        kernel: &mut K,
        accountant: &TickAccountant,
        index: usize,
    ) -> Option<TaskStats> {
        let mut stats = self.snapshot(accountant, index)?;
        let now = kernel.tick_count();
        let elapsed = now.saturating_sub(stats.arrival_tick);
        stats.waiting_ticks = elapsed.saturating_sub(stats.run_ticks);
        Some(stats)
    }

    /// One iteration of the control loop: drain every pending expiry and
    /// demote its task, then perform a global boost if the boost period
    /// has elapsed, then emit a report line per occupied slot. Does not
    /// sleep — see [`Supervisor::run`] for the pacing wrapper.
    pub fn poll_once<K: RtKernel>(&mut self, kernel: &mut K, accountant: &mut TickAccountant) {
        while let Some(task) = self.expiries.recv() {
            if let Some(index) = self.find(task) {
                self.check_for_demotion(kernel, accountant, index);
            }
            // A stale handle for a task no longer registered is silently
            // ignored, matching the policy's edge-case handling.
        }

        let now = kernel.tick_count();
        if now.wrapping_sub(self.last_boost) >= boost_period_ticks() {
            self.global_boost(kernel, accountant);
            self.last_boost = now;
        }

        self.report(kernel, accountant);
    }

    fn report<K: RtKernel>(&mut self, kernel: &mut K, accountant: &TickAccountant) {
        for i in 0..MAX_TASKS {
            if let Some(stats) = self.snapshot_at(kernel, accountant, i) {
                // `report_line` receives a pre-formatted line rather
                // than the struct itself so `SideEffects` implementors
                // never need to pull in a formatting dependency. 128
                // covers the worst case (every u32 field at full width)
                // with room to spare; the field names and labels alone
                // already account for about half of it.
                let mut buf = heapless::String::<128>::new();
                let _ = core::fmt::write(
                    &mut buf,
                    format_args!(
                        "task={} level={:?} run={} quantum={} arrival={} waiting={}",
                        stats.task.0,
                        stats.level,
                        stats.run_ticks,
                        stats.quantum_ticks,
                        stats.arrival_tick,
                        stats.waiting_ticks,
                    ),
                );
                self.side_effects.report_line(&buf);
            }
        }
    }

    /// The supervisor task body: `loop { poll_once(); delay(...) }`.
    /// Never returns.
    pub fn run<K: RtKernel>(&mut self, kernel: &mut K, accountant: &mut TickAccountant) -> ! {
        loop {
            self.poll_once(kernel, accountant);
            kernel.delay_ticks(SUPERVISOR_LOOP_DELAY_TICKS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{self, ExpiryQueue};
    use crate::test_support::MockKernel;
    use heapless::spsc::Queue;

    fn new_pair() -> (Supervisor, TickAccountant, MockKernel) {
        static mut Q: ExpiryQueue = Queue::new();
        let (tx, rx) = channel::split(unsafe { &mut *core::ptr::addr_of_mut!(Q) });
        (Supervisor::new(rx), TickAccountant::new(tx), MockKernel::new())
    }

    #[test]
    fn register_starts_at_high_with_reset_runtime() {
        let (mut sup, mut acc, mut kernel) = new_pair();
        sup.register(&mut kernel, &mut acc, TaskHandle(1)).unwrap();
        let stats = sup.snapshot(&acc, sup.find(TaskHandle(1)).unwrap()).unwrap();
        assert_eq!(stats.level, MlfqLevel::High);
        assert_eq!(stats.run_ticks, 0);
        assert_eq!(stats.quantum_ticks, MlfqLevel::High.quantum_of());
        assert_eq!(kernel.priority_of(TaskHandle(1)), Some(MlfqLevel::High.priority_of()));
    }

    #[test]
    fn demotion_from_low_reapplies_low() {
        let (mut sup, mut acc, mut kernel) = new_pair();
        sup.register(&mut kernel, &mut acc, TaskHandle(1)).unwrap();
        let idx = sup.find(TaskHandle(1)).unwrap();
        sup.check_for_demotion(&mut kernel, &mut acc, idx); // High -> Medium
        sup.check_for_demotion(&mut kernel, &mut acc, idx); // Medium -> Low
        sup.check_for_demotion(&mut kernel, &mut acc, idx); // Low -> Low
        let stats = sup.snapshot(&acc, idx).unwrap();
        assert_eq!(stats.level, MlfqLevel::Low);
    }

    #[test]
    fn global_boost_resets_every_task_to_high() {
        let (mut sup, mut acc, mut kernel) = new_pair();
        sup.register(&mut kernel, &mut acc, TaskHandle(1)).unwrap();
        sup.register(&mut kernel, &mut acc, TaskHandle(2)).unwrap();
        let i1 = sup.find(TaskHandle(1)).unwrap();
        let i2 = sup.find(TaskHandle(2)).unwrap();
        sup.check_for_demotion(&mut kernel, &mut acc, i1);
        sup.check_for_demotion(&mut kernel, &mut acc, i2);
        sup.check_for_demotion(&mut kernel, &mut acc, i2);

        sup.global_boost(&mut kernel, &mut acc);

        assert_eq!(sup.snapshot(&acc, i1).unwrap().level, MlfqLevel::High);
        assert_eq!(sup.snapshot(&acc, i2).unwrap().level, MlfqLevel::High);
        assert_eq!(sup.snapshot(&acc, i1).unwrap().run_ticks, 0);
    }

    #[test]
    fn poll_once_drains_expiry_and_demotes() {
        let (mut sup, mut acc, mut kernel) = new_pair();
        sup.register(&mut kernel, &mut acc, TaskHandle(1)).unwrap();
        let idx = sup.find(TaskHandle(1)).unwrap();

        kernel.set_current_task(Some(TaskHandle(1)));
        for _ in 0..MlfqLevel::High.quantum_of() {
            acc.on_tick(&mut kernel);
        }

        sup.poll_once(&mut kernel, &mut acc);
        assert_eq!(sup.snapshot(&acc, idx).unwrap().level, MlfqLevel::Medium);
    }

    #[test]
    fn poll_once_ignores_stale_unregistered_handle() {
        let (mut sup, mut acc, mut kernel) = new_pair();
        // No registration at all; nothing to demote and nothing panics.
        let _ = sup.find(TaskHandle(123));
        sup.poll_once(&mut kernel, &mut acc);
    }

    #[test]
    fn boost_overrides_pending_demotion_in_same_iteration() {
        let (mut sup, mut acc, mut kernel) = new_pair();
        sup.register(&mut kernel, &mut acc, TaskHandle(1)).unwrap();
        let idx = sup.find(TaskHandle(1)).unwrap();
        sup.check_for_demotion(&mut kernel, &mut acc, idx);
        sup.global_boost(&mut kernel, &mut acc);
        let stats = sup.snapshot(&acc, idx).unwrap();
        assert_eq!(stats.level, MlfqLevel::High);
        assert_eq!(stats.run_ticks, 0);
    }
}
