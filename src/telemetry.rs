//! # Semihosting Telemetry Sink
//!
//! A reference [`crate::task::SideEffects`] implementation for demos and
//! bring-up: forwards `report()` lines to the host debugger console via
//! semihosting. Requires a debug probe attached and is far too slow for
//! production use on every tick — it is feature-gated behind
//! `telemetry` and meant for the demo firmware only.

use cortex_m_semihosting::hprintln;

use crate::level::MlfqLevel;
use crate::task::{SideEffects, TaskHandle};

/// Forwards level changes and report lines to semihosting output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SemihostingSink;

impl SideEffects for SemihostingSink {
    fn level_change(&mut self, task: TaskHandle, level: MlfqLevel) {
        let _ = hprintln!("mlfq: task {} -> {:?}", task.0, level);
    }

    fn report_line(&mut self, line: &str) {
        let _ = hprintln!("mlfq: {}", line);
    }
}
