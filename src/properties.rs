//! Property-based tests for the invariants and laws spec.md §8 states
//! directly, rather than only as example transcripts. Host-only
//! (`quickcheck` pulls in `std`), hence gated the same way
//! `test_support` is.

#![cfg(test)]

extern crate std;

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use crate::accountant::TickAccountant;
use crate::channel::{self, ExpiryQueue};
use crate::config::MAX_TASKS;
use crate::level::MlfqLevel;
use crate::supervisor::Supervisor;
use crate::task::TaskHandle;
use crate::test_support::MockKernel;
use heapless::spsc::Queue;

#[derive(Clone, Copy, Debug)]
struct SmallCount(u8);

impl Arbitrary for SmallCount {
    fn arbitrary(g: &mut Gen) -> Self {
        SmallCount(u8::arbitrary(g) % 8)
    }
}

/// Law: demoting N times from any starting level always lands on `Low`
/// once N is large enough, and never overshoots past it.
#[quickcheck]
fn demotion_is_monotone_and_floors_at_low(start: SmallCount, steps: SmallCount) -> bool {
    let mut level = match start.0 % 3 {
        0 => MlfqLevel::High,
        1 => MlfqLevel::Medium,
        _ => MlfqLevel::Low,
    };
    let mut prev_ordinal = level as u8;
    for _ in 0..steps.0 {
        level = level.demoted();
        let ordinal = level as u8;
        if ordinal < prev_ordinal {
            return false; // demotion must never move toward High
        }
        prev_ordinal = ordinal;
    }
    // after at least 2 steps from High, must be at Low
    if start.0 % 3 == 0 && steps.0 >= 2 {
        level == MlfqLevel::Low
    } else {
        true
    }
}

/// Invariant 2 (mapping consistency): quantum strictly grows as level
/// drops, for every pair of distinct levels.
#[quickcheck]
fn quantum_strictly_increases_down_the_ladder(a: SmallCount, b: SmallCount) -> bool {
    let levels = [MlfqLevel::High, MlfqLevel::Medium, MlfqLevel::Low];
    let la = levels[a.0 as usize % 3];
    let lb = levels[b.0 as usize % 3];
    if (la as u8) == (lb as u8) {
        return true;
    }
    let ordered = if (la as u8) < (lb as u8) {
        (la, lb)
    } else {
        (lb, la)
    };
    ordered.0.quantum_of() < ordered.1.quantum_of()
}

/// Law: register-then-snapshot round trip (spec.md §8) — immediately
/// after registering at tick T, the snapshot shows High/0/quantum_of(High)/T.
#[quickcheck]
fn register_then_snapshot_round_trip(handle: u16, arrival: u16) -> bool {
    static mut Q: ExpiryQueue = Queue::new();
    let (tx, rx) = channel::split(unsafe { &mut *core::ptr::addr_of_mut!(Q) });
    let mut acc = TickAccountant::new(tx);
    let mut sup = Supervisor::new(rx);
    let mut kernel = MockKernel::new();
    for _ in 0..(arrival as u32 % 64) {
        kernel.advance_tick();
    }
    let task = TaskHandle(handle as u32 % MAX_TASKS as u32);
    if sup.register(&mut kernel, &mut acc, task).is_err() {
        return true; // duplicate handles across shrinking are uninteresting
    }
    let idx = (0..MAX_TASKS)
        .find(|&i| sup.snapshot(&acc, i).map(|s| s.task) == Some(task))
        .unwrap();
    let stats = sup.snapshot(&acc, idx).unwrap();
    stats.level == MlfqLevel::High
        && stats.run_ticks == 0
        && stats.quantum_ticks == MlfqLevel::High.quantum_of()
        && stats.arrival_tick == kernel.tick_count()
}

/// Invariant 1 (table uniqueness): registering a batch of distinct
/// handles never produces two occupied slots sharing a handle.
#[quickcheck]
fn table_uniqueness_holds_after_arbitrary_registrations(handles: std::vec::Vec<u8>) -> bool {
    static mut Q: ExpiryQueue = Queue::new();
    let (tx, rx) = channel::split(unsafe { &mut *core::ptr::addr_of_mut!(Q) });
    let mut acc = TickAccountant::new(tx);
    let mut sup = Supervisor::new(rx);
    let mut kernel = MockKernel::new();

    let mut seen = std::vec::Vec::new();
    for h in handles.into_iter().take(MAX_TASKS) {
        let task = TaskHandle(h as u32);
        if seen.contains(&h) {
            continue;
        }
        seen.push(h);
        let _ = sup.register(&mut kernel, &mut acc, task);
    }

    let mut occupied = std::vec::Vec::new();
    for i in 0..MAX_TASKS {
        if let Some(stats) = sup.snapshot(&acc, i) {
            if occupied.contains(&stats.task) {
                return false;
            }
            occupied.push(stats.task);
        }
    }
    true
}
