//! # MLFQ Demo Firmware
//!
//! Demonstrates the policy with three synthetic tasks chosen to show
//! each end of the feedback ladder:
//!
//! | Task | Behavior | Expected trajectory |
//! |------|----------|----------------------|
//! | `cpu_bound_task` | Busy-loops, never blocks | Demotes to Low and stays there between boosts |
//! | `interactive_task` | Short burst, then blocks on a notification | Stays at High |
//! | `mixed_task` | Alternates long and short bursts | Settles around Medium |
//!
//! This firmware owns almost none of the scheduling itself — it exists
//! to exercise [`mlfq_scheduler::runtime`] against a real SysTick and a
//! toy host-kernel shim. A production host replaces the toy shim with
//! its actual task table and run-queue.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;

use mlfq_scheduler::arch::cortex_m4::{self, CortexM4Kernel};
use mlfq_scheduler::config::SUPERVISOR_PRIORITY;
use mlfq_scheduler::runtime;
use mlfq_scheduler::task::TaskHandle;

const SUPERVISOR_TASK: TaskHandle = TaskHandle(0);
const CPU_BOUND_TASK: TaskHandle = TaskHandle(1);
const INTERACTIVE_TASK: TaskHandle = TaskHandle(2);
const MIXED_TASK: TaskHandle = TaskHandle(3);

// ---------------------------------------------------------------------------
// Toy host-kernel shim
//
// A real deployment's `current_task`/`set_priority`/`delay_ticks`/
// `notify_from_isr` callbacks would read and drive an actual task table
// and run-queue. This demo only needs to prove the policy's wiring, so
// the shim tracks the bare minimum: which task is "current" right now.
// ---------------------------------------------------------------------------

static mut CURRENT_TASK: TaskHandle = SUPERVISOR_TASK;

// Incremented once per SysTick; this is the shared monotonic counter both
// the SysTick handler and the supervisor loop read through `tick_count_shim`,
// since each builds its own short-lived `CortexM4Kernel`.
static mut TICK_COUNT: u32 = 0;

fn current_task_shim() -> Option<TaskHandle> {
    Some(unsafe { core::ptr::read_volatile(core::ptr::addr_of!(CURRENT_TASK)) })
}

fn set_priority_shim(_task: TaskHandle, _priority: u32) -> Result<(), ()> {
    // A real host kernel would call its own priority-set primitive here.
    Ok(())
}

fn delay_shim(_ticks: u32) {
    // A real host kernel would block the calling task here.
}

fn notify_shim(_task: TaskHandle) {
    // A real host kernel would post a counting notification here.
}

fn tick_count_shim() -> u32 {
    unsafe { core::ptr::read_volatile(core::ptr::addr_of!(TICK_COUNT)) }
}

/// `cpu_bound_task` — never yields; relies entirely on pre-emption.
extern "C" fn cpu_bound_task() -> ! {
    let mut counter: u32 = 0;
    loop {
        counter = counter.wrapping_add(1);
    }
}

/// `interactive_task` — brief burst, then blocks. Should never
/// accumulate enough runtime in one quantum to demote.
extern "C" fn interactive_task() -> ! {
    loop {
        let mut work: u32 = 0;
        for _ in 0..100 {
            work = work.wrapping_add(1);
        }
        // A real host kernel would block on a semaphore/notification here.
    }
}

/// `mixed_task` — alternates a medium-length burst with a short block.
extern "C" fn mixed_task() -> ! {
    loop {
        let mut work: u32 = 0;
        for _ in 0..3000 {
            work = work.wrapping_add(1);
        }
    }
}

#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().unwrap();

    runtime::init(SUPERVISOR_TASK);

    let mut kernel = CortexM4Kernel::new(
        current_task_shim,
        set_priority_shim,
        delay_shim,
        notify_shim,
        tick_count_shim,
    );

    unsafe {
        runtime::register(&mut kernel, CPU_BOUND_TASK).expect("register cpu_bound_task");
        runtime::register(&mut kernel, INTERACTIVE_TASK).expect("register interactive_task");
        runtime::register(&mut kernel, MIXED_TASK).expect("register mixed_task");
    }

    let _ = set_priority_shim(SUPERVISOR_TASK, SUPERVISOR_PRIORITY);

    // A real host kernel creates each of CPU_BOUND_TASK / INTERACTIVE_TASK
    // / MIXED_TASK via its own task-creation primitive, pointing at the
    // entry functions below; this demo only proves the MLFQ wiring, so it
    // stops short of actually running them.
    const _TASK_ENTRIES: [extern "C" fn() -> !; 3] =
        [cpu_bound_task, interactive_task, mixed_task];

    cortex_m4::configure_systick(&mut cp.SYST);

    unsafe { runtime::run_supervisor(&mut kernel) }
}

/// SysTick handler: the tick-interrupt entry point into the policy.
#[no_mangle]
pub unsafe extern "C" fn SysTick() {
    TICK_COUNT = TICK_COUNT.wrapping_add(1);
    let mut kernel = CortexM4Kernel::new(
        current_task_shim,
        set_priority_shim,
        delay_shim,
        notify_shim,
        tick_count_shim,
    );
    runtime::on_tick(&mut kernel);
}
