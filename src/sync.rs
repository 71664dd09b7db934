//! # Synchronization Primitives
//!
//! Interrupt-safe critical section abstraction for the Cortex-M4
//! reference port. The accountant and supervisor tables are each owned
//! by a single domain (see their module docs), so the only thing that
//! ever needs masking is a task-context mutation racing the tick ISR —
//! which is exactly what `critical_section` provides.

use cortex_m::interrupt;

/// Execute a closure within a critical section (interrupts disabled).
///
/// # Performance
/// Keep critical sections as short as possible to minimize interrupt
/// latency — the Cortex-M4's interrupt tail-chaining makes short
/// critical sections relatively inexpensive.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(&interrupt::CriticalSection) -> R,
{
    interrupt::free(f)
}
