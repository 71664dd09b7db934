//! # Tick Accountant
//!
//! Interrupt-context bookkeeping: attributes every scheduler tick to the
//! task that was running, and detects when a task's accumulated runtime
//! reaches its configured quantum. Expiries are handed to the supervisor
//! across the bounded [`crate::channel`].
//!
//! Task-context operations (`register`, `set_quantum`, ...) run inside a
//! scheduler-critical section so the tick ISR never observes a
//! half-updated record. The ISR path (`on_tick`) touches only
//! `run_ticks`, never `quantum_ticks` or `task` — that split is what lets
//! the two domains share the table without a lock.

use crate::channel::ExpiryProducer;
use crate::config::MAX_TASKS;
use crate::error::MlfqError;
use crate::kernel::RtKernel;
use crate::task::TaskHandle;

#[derive(Debug, Clone, Copy)]
struct Record {
    task: Option<TaskHandle>,
    run_ticks: u32,
    quantum_ticks: u32,
}

impl Record {
    const EMPTY: Record = Record {
        task: None,
        run_ticks: 0,
        quantum_ticks: 0,
    };
}

/// Owns the per-task runtime table and the producing end of the expiry
/// channel.
pub struct TickAccountant {
    table: [Record; MAX_TASKS],
    supervisor: Option<TaskHandle>,
    expiries: ExpiryProducer,
}

impl TickAccountant {
    /// Builds an empty accountant around an already-split expiry channel
    /// producer. Mirrors `tickProfilerInit` clearing the table and
    /// creating the channel, except the channel's creation is handled by
    /// `channel::split` at a higher level so this constructor can stay
    /// infallible.
    pub fn new(expiries: ExpiryProducer) -> Self {
        Self {
            table: [Record::EMPTY; MAX_TASKS],
            supervisor: None,
            expiries,
        }
    }

    /// Records the task to notify on expiry. May be called once; later
    /// calls overwrite the previous registration, which is intentional —
    /// it lets a host rewire the supervisor handle during tests.
    pub fn set_supervisor(&mut self, task: TaskHandle) {
        self.supervisor = Some(task);
    }

    fn find(&self, task: TaskHandle) -> Option<usize> {
        self.table.iter().position(|r| r.task == Some(task))
    }

    fn find_empty(&self) -> Option<usize> {
        self.table.iter().position(|r| r.task.is_none())
    }

    /// Allocates a slot for `task` with its quantum unset (`0` — "do not
    /// detect expiry until `set_quantum` is called"). The table write is
    /// masked against the tick ISR, per the scheduler-critical-section
    /// contract this whole file operates under.
    pub fn register<K: RtKernel>(&mut self, kernel: &mut K, task: TaskHandle) -> Result<(), MlfqError> {
        if self.find(task).is_some() {
            return Err(MlfqError::AlreadyPresent);
        }
        let slot = self.find_empty().ok_or(MlfqError::TableFull)?;
        kernel.critical_section(|_k| {
            self.table[slot] = Record {
                task: Some(task),
                run_ticks: 0,
                quantum_ticks: 0,
            };
        });
        Ok(())
    }

    /// Sets the quantum a task must reach before it is reported as
    /// expired. `q` must be at least 1. Masked against the tick ISR so
    /// `on_tick` never reads a `quantum_ticks` mid-write.
    pub fn set_quantum<K: RtKernel>(&mut self, kernel: &mut K, task: TaskHandle, q: u32) -> Result<(), MlfqError> {
        if q == 0 {
            return Err(MlfqError::InvalidArgument);
        }
        let slot = self.find(task).ok_or(MlfqError::NotFound)?;
        kernel.critical_section(|_k| {
            self.table[slot].quantum_ticks = q;
        });
        Ok(())
    }

    /// Accumulated runtime since the last reset, or 0 if unregistered. A
    /// plain read: `run_ticks` is a single aligned word the ISR writes
    /// atomically, so no critical section is needed here.
    pub fn runtime(&self, task: TaskHandle) -> u32 {
        self.find(task).map(|i| self.table[i].run_ticks).unwrap_or(0)
    }

    /// Zeroes `run_ticks` only; `quantum_ticks` is untouched. Masked
    /// against the tick ISR for the same reason as `set_quantum`.
    pub fn reset_runtime<K: RtKernel>(&mut self, kernel: &mut K, task: TaskHandle) -> Result<(), MlfqError> {
        let slot = self.find(task).ok_or(MlfqError::NotFound)?;
        kernel.critical_section(|_k| {
            self.table[slot].run_ticks = 0;
        });
        Ok(())
    }

    /// The tick-interrupt entry point. Must be called once per scheduler
    /// tick, from tick-interrupt context, with the identity of the task
    /// that was just pre-empted.
    ///
    /// Increments that task's `run_ticks` and, if it has now reached its
    /// quantum, best-effort enqueues an expiry and wakes the supervisor.
    /// Never blocks, never allocates, and never returns an error — an
    /// unregistered current task or a full expiry channel are both
    /// silently absorbed, per the policy's ISR failure semantics.
    pub fn on_tick<K: RtKernel>(&mut self, kernel: &mut K) {
        let current = match kernel.current_task() {
            Some(t) => t,
            None => return,
        };
        let slot = match self.find(current) {
            Some(i) => i,
            None => return,
        };

        self.table[slot].run_ticks += 1;

        let quantum = self.table[slot].quantum_ticks;
        if quantum != 0 && self.table[slot].run_ticks >= quantum {
            self.expiries.send(current);
            if let Some(supervisor) = self.supervisor {
                kernel.notify_from_isr(supervisor);
            }
        }
    }
}
