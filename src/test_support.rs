//! # Test Support
//!
//! A deterministic, in-memory [`RtKernel`] so `accountant` and
//! `supervisor` can be unit-tested on the host without any hardware.

#![cfg(test)]

extern crate std;

use std::vec::Vec;

use crate::config::MAX_TASKS;
use crate::kernel::RtKernel;
use crate::task::TaskHandle;

/// Records every call made to it so tests can assert on kernel-facing
/// side effects (priority sets, notifications) as well as drive
/// `current_task`/`tick_count` directly.
pub struct MockKernel {
    current: Option<TaskHandle>,
    tick: u32,
    priorities: [Option<u32>; MAX_TASKS],
    notified: Vec<TaskHandle>,
    delays: Vec<u32>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            current: None,
            tick: 0,
            priorities: [None; MAX_TASKS],
            notified: Vec::new(),
            delays: Vec::new(),
        }
    }

    pub fn set_current_task(&mut self, task: Option<TaskHandle>) {
        self.current = task;
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn priority_of(&self, task: TaskHandle) -> Option<u32> {
        self.priorities[task.0 as usize % MAX_TASKS]
    }

    pub fn notified(&self) -> &[TaskHandle] {
        &self.notified
    }

    pub fn delays(&self) -> &[u32] {
        &self.delays
    }
}

impl RtKernel for MockKernel {
    fn current_task(&mut self) -> Option<TaskHandle> {
        self.current
    }

    fn set_priority(&mut self, task: TaskHandle, priority: u32) -> Result<(), ()> {
        self.priorities[task.0 as usize % MAX_TASKS] = Some(priority);
        Ok(())
    }

    fn tick_count(&mut self) -> u32 {
        self.tick
    }

    fn delay_ticks(&mut self, ticks: u32) {
        self.delays.push(ticks);
    }

    fn notify_from_isr(&mut self, task: TaskHandle) {
        self.notified.push(task);
    }

    fn critical_section<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        f(self)
    }
}
