//! # Runtime Glue
//!
//! Wires a [`crate::accountant::TickAccountant`] and
//! [`crate::supervisor::Supervisor`] together behind a pair of `static
//! mut` globals: a private `static mut` plus a raw pointer the
//! interrupt handlers can reach without going through a safe reference.
//!
//! This module is demo/reference wiring, not part of the core policy —
//! a production host is free to own its `TickAccountant`/`Supervisor`
//! pair however suits its own kernel integration instead.

use core::mem::MaybeUninit;

use heapless::spsc::Queue;

use crate::accountant::TickAccountant;
use crate::channel::{self, ExpiryQueue};
use crate::supervisor::Supervisor;
use crate::sync;
use crate::task::TaskHandle;

static mut EXPIRY_QUEUE: ExpiryQueue = Queue::new();
static mut ACCOUNTANT: MaybeUninit<TickAccountant> = MaybeUninit::uninit();
static mut SUPERVISOR: MaybeUninit<Supervisor> = MaybeUninit::uninit();
static mut INITIALIZED: bool = false;

/// Initializes the accountant/supervisor pair and records `supervisor`
/// as the task to notify on quantum expiry. Must be called exactly
/// once, before the tick interrupt is enabled and before any task is
/// registered.
pub fn init(supervisor: TaskHandle) {
    sync::critical_section(|_cs| unsafe {
        let (tx, rx) = channel::split(&mut *core::ptr::addr_of_mut!(EXPIRY_QUEUE));
        let mut accountant = TickAccountant::new(tx);
        accountant.set_supervisor(supervisor);
        ACCOUNTANT = MaybeUninit::new(accountant);
        SUPERVISOR = MaybeUninit::new(Supervisor::new(rx));
        INITIALIZED = true;
    });
}

/// # Safety
/// Callers must ensure [`init`] has already run.
unsafe fn accountant_mut() -> &'static mut TickAccountant {
    debug_assert!(INITIALIZED);
    (*core::ptr::addr_of_mut!(ACCOUNTANT)).assume_init_mut()
}

/// # Safety
/// Callers must ensure [`init`] has already run.
unsafe fn supervisor_mut() -> &'static mut Supervisor {
    debug_assert!(INITIALIZED);
    (*core::ptr::addr_of_mut!(SUPERVISOR)).assume_init_mut()
}

/// The SysTick handler's entry point into the policy: attributes the
/// tick to `current` and signals the supervisor on quantum expiry.
///
/// # Safety
/// Must be called from tick-interrupt context after [`init`].
pub unsafe fn on_tick<K: crate::kernel::RtKernel>(kernel: &mut K) {
    accountant_mut().on_tick(kernel);
}

/// Registers a task with the MLFQ policy at [`crate::level::MlfqLevel::High`].
///
/// # Safety
/// Must be called from task context after [`init`].
pub unsafe fn register<K: crate::kernel::RtKernel>(
    kernel: &mut K,
    task: TaskHandle,
) -> Result<(), crate::error::MlfqError> {
    supervisor_mut().register(kernel, accountant_mut(), task)
}

/// Runs the supervisor control loop. Never returns.
///
/// # Safety
/// Must be called from the supervisor task, exactly once, after [`init`]
/// and after the supervisor task itself has been registered with the
/// host kernel at the appropriate priority.
pub unsafe fn run_supervisor<K: crate::kernel::RtKernel>(kernel: &mut K) -> ! {
    supervisor_mut().run(kernel, accountant_mut())
}
