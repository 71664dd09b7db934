//! # Cortex-M4 Reference Port
//!
//! A minimal [`crate::kernel::RtKernel`] implementation for ARM
//! Cortex-M4. Configures SysTick as the scheduler tick source and wires
//! its handler to [`crate::accountant::TickAccountant::on_tick`].
//!
//! Task creation, the run-queue, and context switching (PendSV, stack
//! frames) are the host kernel's responsibility and are not part of this
//! crate — a real deployment pairs this port with an actual RTOS kernel
//! that implements task management and supplies the `current_task`
//! query this trait needs. What follows is the sliver of hardware glue
//! the MLFQ policy itself depends on: the tick source and the
//! interrupt-masking primitive.

use cortex_m::peripheral::syst::SystClkSource;

use crate::config::{SYSTEM_CLOCK_HZ, TICK_HZ};
use crate::kernel::RtKernel;
use crate::sync;
use crate::task::TaskHandle;

/// Configure the SysTick timer to fire at [`TICK_HZ`].
///
/// Each tick should invoke the host's `SysTick` handler, which in turn
/// calls [`crate::accountant::TickAccountant::on_tick`] with whatever
/// task the host kernel considers "current".
pub fn configure_systick(syst: &mut cortex_m::peripheral::SYST) {
    let reload = SYSTEM_CLOCK_HZ / TICK_HZ - 1;
    syst.set_reload(reload);
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_counter();
    syst.enable_interrupt();
}

/// An `RtKernel` that delegates every primitive to host-supplied
/// callbacks.
///
/// This crate does not implement task management or a tick counter
/// itself (§ scope); a host kernel is expected to provide all five
/// callbacks below, typically thin wrappers around its own task table,
/// monotonic tick counter, and notification primitives. `critical_section`
/// is the one primitive implemented directly against Cortex-M4 hardware,
/// since interrupt masking is architectural rather than kernel-specific.
///
/// Deliberately stateless and cheap to construct: a host is expected to
/// build one of these per call site (e.g. once in `SysTick`, once in
/// the supervisor task) rather than share a single long-lived instance,
/// since the only state that matters — the tick count, the task table —
/// lives in the host's own callbacks, not in this struct.
pub struct CortexM4Kernel<F1, F2, F3, F4, F5>
where
    F1: FnMut() -> Option<TaskHandle>,
    F2: FnMut(TaskHandle, u32) -> Result<(), ()>,
    F3: FnMut(u32),
    F4: FnMut(TaskHandle),
    F5: FnMut() -> u32,
{
    current_task: F1,
    set_priority: F2,
    delay_ticks: F3,
    notify_from_isr: F4,
    tick_count: F5,
}

impl<F1, F2, F3, F4, F5> CortexM4Kernel<F1, F2, F3, F4, F5>
where
    F1: FnMut() -> Option<TaskHandle>,
    F2: FnMut(TaskHandle, u32) -> Result<(), ()>,
    F3: FnMut(u32),
    F4: FnMut(TaskHandle),
    F5: FnMut() -> u32,
{
    pub fn new(
        current_task: F1,
        set_priority: F2,
        delay_ticks: F3,
        notify_from_isr: F4,
        tick_count: F5,
    ) -> Self {
        Self {
            current_task,
            set_priority,
            delay_ticks,
            notify_from_isr,
            tick_count,
        }
    }
}

impl<F1, F2, F3, F4, F5> RtKernel for CortexM4Kernel<F1, F2, F3, F4, F5>
where
    F1: FnMut() -> Option<TaskHandle>,
    F2: FnMut(TaskHandle, u32) -> Result<(), ()>,
    F3: FnMut(u32),
    F4: FnMut(TaskHandle),
    F5: FnMut() -> u32,
{
    fn current_task(&mut self) -> Option<TaskHandle> {
        (self.current_task)()
    }

    fn set_priority(&mut self, task: TaskHandle, priority: u32) -> Result<(), ()> {
        (self.set_priority)(task, priority)
    }

    fn tick_count(&mut self) -> u32 {
        (self.tick_count)()
    }

    fn delay_ticks(&mut self, ticks: u32) {
        (self.delay_ticks)(ticks)
    }

    fn notify_from_isr(&mut self, task: TaskHandle) {
        (self.notify_from_isr)(task)
    }

    fn critical_section<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        sync::critical_section(|_cs| f(self))
    }
}
