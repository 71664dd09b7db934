//! # mlfq-scheduler
//!
//! A multi-level feedback queue (MLFQ) scheduling *policy* for a
//! pre-emptive real-time kernel — it is not itself a kernel.
//!
//! ## Overview
//!
//! Tasks are dynamically reclassified among three priority tiers by
//! observing CPU-burst behavior: interactive tasks accrete toward the
//! top tier and get short, responsive time-slices; CPU-bound tasks sink
//! toward the bottom tier and run with longer quanta; a periodic global
//! boost rescues any task from starvation.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    Application Tasks                    │
//! ├────────────────────────────────────────────────────────┤
//! │              MLFQ Supervisor (supervisor.rs)             │
//! │   register() · check_for_demotion() · global_boost()    │
//! │   promote_interactive() · snapshot() · poll_once/run()   │
//! ├────────────────────────────────────────────────────────┤
//! │              Tick Accountant (accountant.rs)             │
//! │   register() · set_quantum() · runtime() · on_tick()    │
//! ├──────────────┬────────────────────┬───────────────────┤
//! │ level.rs     │  channel.rs        │  error.rs          │
//! │ ─ MlfqLevel  │  ─ expiry channel  │  ─ MlfqError       │
//! ├──────────────┴────────────────────┴───────────────────┤
//! │            kernel.rs — RtKernel trait                   │
//! │  (the only boundary to the host real-time kernel)       │
//! ├────────────────────────────────────────────────────────┤
//! │         arch/cortex_m4.rs — reference port               │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What this crate does *not* do
//!
//! Task creation, the run-queue, and context switching all belong to the
//! host kernel (see [`kernel::RtKernel`]). This crate only consumes a
//! fixed table of kernel primitives — tick count, current-task identity,
//! priority set, ISR notification, delay, and a critical section — and
//! decides, from tick-interrupt and supervisor-task context, which level
//! each task should run at.
//!
//! ## Memory Model
//!
//! - **No heap**: all state is statically allocated
//! - **No `alloc`**: pure `core` plus `heapless` for the bounded expiry
//!   channel
//! - **Fixed-size tables**: `[Record; MAX_TASKS]` in both the accountant
//!   and the supervisor
//! - **Critical sections**: `cortex_m::interrupt::free()` for the one
//!   piece of state shared between the tick ISR and task context

#![cfg_attr(not(test), no_std)]

pub mod accountant;
pub mod arch;
pub mod channel;
pub mod config;
pub mod error;
pub mod kernel;
pub mod level;
pub mod runtime;
pub mod supervisor;
pub mod sync;
pub mod task;

#[cfg(feature = "telemetry")]
pub mod telemetry;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod properties;
