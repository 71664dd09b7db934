//! # Kernel Boundary
//!
//! Everything the MLFQ policy needs from the host real-time kernel,
//! expressed as a trait rather than a concrete binding. The policy is a
//! pure consumer of these primitives (§ external interfaces): task
//! creation, the scheduling algorithm itself, and context switching all
//! remain the host kernel's responsibility.
//!
//! This mirrors the kernel-abstraction-trait idiom (cf. `r3_core`'s
//! `KernelBase`) scaled down to exactly the handful of primitives this
//! policy needs, which is also what makes the policy host-testable: see
//! `test_support::MockKernel` for an in-memory implementation used by the
//! unit tests in `accountant` and `supervisor`.

use crate::task::TaskHandle;

/// The primitives an `RtKernel` implementation must provide.
///
/// Implementations are expected to be zero-sized or hold only peripheral
/// handles — the policy never stores an `RtKernel` value itself, only
/// calls through `&mut` references it already has access to.
pub trait RtKernel {
    /// The task pre-empted by the current tick, if any. Read from tick
    /// (ISR) context only.
    fn current_task(&mut self) -> Option<TaskHandle>;

    /// Set a task's fixed priority. Takes effect before this call
    /// returns. Called from task context, never from the tick ISR.
    fn set_priority(&mut self, task: TaskHandle, priority: u32) -> Result<(), ()>;

    /// Monotonic tick counter since kernel start.
    fn tick_count(&mut self) -> u32;

    /// Suspend the calling task for `ticks` scheduler ticks.
    fn delay_ticks(&mut self, ticks: u32);

    /// Wake the designated task from ISR context (a counting
    /// notification, not a message). Called only from `on_tick`.
    fn notify_from_isr(&mut self, task: TaskHandle);

    /// Run `f` with the tick interrupt masked. Nestable. Used to keep
    /// accountant/supervisor table mutations atomic with respect to the
    /// tick ISR.
    fn critical_section<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R;
}
