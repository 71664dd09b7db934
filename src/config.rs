//! # Configuration
//!
//! Compile-time constants governing the MLFQ policy and the demo system
//! clock. All limits are fixed at compile time — no dynamic allocation.

/// Maximum number of tasks the policy can manage simultaneously.
/// This bounds both the accountant's and the supervisor's static tables.
pub const MAX_TASKS: usize = 16;

/// Capacity of the expiry channel. `heapless::spsc::Queue<T, N>` only ever
/// holds `N - 1` elements (one slot distinguishes full from empty), so this
/// is sized one past 2× the task table to still guarantee that many usable
/// slots — a burst of simultaneous quantum expiries should not overflow it
/// under normal operation (see `channel::ExpiryQueue`).
pub const EXPIRY_CHANNEL_LEN: usize = MAX_TASKS * 2 + 1;

/// Minimum interval, in milliseconds, between global boosts. Treated as a
/// deployment constant rather than a law of the policy itself; 500ms is
/// the more responsive of the two values observed in prior deployments.
pub const BOOST_PERIOD_MS: u32 = 500;

/// Time slice, in ticks, granted to a task at [`crate::level::MlfqLevel::High`].
pub const QUANTUM_HIGH: u32 = 20;

/// Time slice, in ticks, granted to a task at [`crate::level::MlfqLevel::Medium`].
pub const QUANTUM_MEDIUM: u32 = 50;

/// Time slice, in ticks, granted to a task at [`crate::level::MlfqLevel::Low`].
pub const QUANTUM_LOW: u32 = 100;

/// Kernel priority assigned to a [`crate::level::MlfqLevel::High`] task.
/// Medium and Low sit one and two steps below this, respectively.
pub const TOP_PRIORITY: u32 = 5;

/// Kernel priority the supervisor task itself runs at — one step above
/// `TOP_PRIORITY` so it always pre-empts every task it manages.
pub const SUPERVISOR_PRIORITY: u32 = TOP_PRIORITY + 1;

/// Ticks the supervisor sleeps between control-loop iterations. Bounds
/// the supervisor's own CPU use; short enough that a boost is never late
/// by more than this amount.
pub const SUPERVISOR_LOOP_DELAY_TICKS: u32 = 10;

/// SysTick frequency in Hz for the reference Cortex-M4 port. Determines
/// how many ticks correspond to `BOOST_PERIOD_MS`.
pub const TICK_HZ: u32 = 1000;

/// System clock frequency in Hz (default for STM32F4 at 16 MHz HSI).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// Number of ticks between global boosts, derived from [`BOOST_PERIOD_MS`]
/// and [`TICK_HZ`]. Used by the supervisor so it only has to compare tick
/// counts, never wall-clock time.
pub const fn boost_period_ticks() -> u32 {
    (BOOST_PERIOD_MS * TICK_HZ) / 1000
}
