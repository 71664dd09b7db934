//! # MLFQ Level
//!
//! The three-tier priority ladder tasks move along as the supervisor
//! observes their CPU-burst behavior. Lower ordinal means higher
//! scheduling precedence.

use crate::config::{QUANTUM_HIGH, QUANTUM_LOW, QUANTUM_MEDIUM, TOP_PRIORITY};

/// A task's current tier in the feedback queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MlfqLevel {
    High = 0,
    Medium = 1,
    Low = 2,
}

impl MlfqLevel {
    /// Kernel priority a task at this level should run at. Strictly
    /// decreasing with level so `High` always pre-empts `Medium`/`Low`.
    pub const fn priority_of(self) -> u32 {
        match self {
            MlfqLevel::High => TOP_PRIORITY,
            MlfqLevel::Medium => TOP_PRIORITY - 1,
            MlfqLevel::Low => TOP_PRIORITY - 2,
        }
    }

    /// Time slice, in ticks, a task at this level is granted before it
    /// becomes eligible for demotion.
    pub const fn quantum_of(self) -> u32 {
        match self {
            MlfqLevel::High => QUANTUM_HIGH,
            MlfqLevel::Medium => QUANTUM_MEDIUM,
            MlfqLevel::Low => QUANTUM_LOW,
        }
    }

    /// One step down the ladder, clamped at `Low`. This is the *only*
    /// demotion rule: the level's ordinal is incremented and re-mapped to
    /// a kernel priority by `priority_of` — a kernel priority number is
    /// never substituted for a level directly.
    pub const fn demoted(self) -> MlfqLevel {
        match self {
            MlfqLevel::High => MlfqLevel::Medium,
            MlfqLevel::Medium => MlfqLevel::Low,
            MlfqLevel::Low => MlfqLevel::Low,
        }
    }

    /// One step up the ladder, clamped at `High`. Used only by explicit
    /// interactive-promotion hints; the default policy never calls this.
    pub const fn promoted(self) -> MlfqLevel {
        match self {
            MlfqLevel::High => MlfqLevel::High,
            MlfqLevel::Medium => MlfqLevel::High,
            MlfqLevel::Low => MlfqLevel::Medium,
        }
    }
}
