//! # Task Handle
//!
//! The core never creates, destroys, or context-switches a task — that is
//! the host kernel's job (see [`crate::kernel::RtKernel`]). All the core
//! needs is a way to name a task; this module is that name.

/// An opaque handle to a task, as understood by the host kernel.
///
/// Wraps whatever identifier the host kernel uses internally (a TCB
/// pointer, a table index, ...) without the core ever inspecting it.
/// "No task" is expressed as `Option<TaskHandle>` throughout rather than
/// a reserved sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(pub u32);

/// Observable side-effect hooks a host may plug in. Both are optional —
/// the default implementations do nothing — and neither is on the hot
/// (ISR) path; they are only ever invoked from supervisor task context.
pub trait SideEffects {
    /// Called whenever a task's level changes, after the new kernel
    /// priority has been applied. A natural place to drive a status LED
    /// or similar indicator.
    fn level_change(&mut self, _task: TaskHandle, _level: crate::level::MlfqLevel) {}

    /// Called once per supervisor iteration with a human-readable report
    /// line for each occupied slot. A natural place to forward to a
    /// logging transport.
    fn report_line(&mut self, _line: &str) {}
}

/// A [`SideEffects`] implementation that does nothing; the default when a
/// host does not want observability hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSideEffects;

impl SideEffects for NoSideEffects {}
