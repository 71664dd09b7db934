//! # Expiry Channel
//!
//! The sole cross-domain shared object between the tick accountant (ISR)
//! and the MLFQ supervisor (task context): a bounded FIFO of task handles
//! whose quantum has just expired.
//!
//! Built on `heapless::spsc::Queue` — a lock-free, `no_std`,
//! single-producer/single-consumer ring buffer that needs no allocator.
//! The accountant holds the sole `Producer` (used only from `on_tick`);
//! the supervisor holds the sole `Consumer` (used only from `poll_once`),
//! matching the single-writer-per-domain discipline the rest of the
//! policy relies on.

use heapless::spsc::{Consumer, Producer, Queue};

use crate::config::EXPIRY_CHANNEL_LEN;
use crate::task::TaskHandle;

/// Backing storage for the expiry channel. Lives for `'static` so the
/// `Producer`/`Consumer` split can be handed out without lifetime
/// entanglement with the owning struct.
pub type ExpiryQueue = Queue<TaskHandle, EXPIRY_CHANNEL_LEN>;

/// The accountant's half of the channel. `send` is best-effort: on
/// overflow the new expiry is dropped and the oldest unreceived expiry
/// wins, per the policy's overflow rule — a task that loses a
/// notification this way will simply expire again after one more
/// quantum.
pub struct ExpiryProducer {
    inner: Producer<'static, TaskHandle, EXPIRY_CHANNEL_LEN>,
}

impl ExpiryProducer {
    pub fn send(&mut self, task: TaskHandle) {
        // enqueue() fails only when full; the failure is the overflow
        // case described above and is intentionally not surfaced.
        let _ = self.inner.enqueue(task);
    }
}

/// The supervisor's half of the channel. `recv` is non-blocking by
/// construction (`heapless` has no blocking mode) so the supervisor's
/// drain loop never suspends here.
pub struct ExpiryConsumer {
    inner: Consumer<'static, TaskHandle, EXPIRY_CHANNEL_LEN>,
}

impl ExpiryConsumer {
    pub fn recv(&mut self) -> Option<TaskHandle> {
        self.inner.dequeue()
    }
}

/// Splits a `'static` queue into its producer/consumer halves. Intended
/// to be called exactly once, typically from a `static mut` queue at
/// `init()` time, mirroring `heapless::spsc::Queue::split`.
pub fn split(queue: &'static mut ExpiryQueue) -> (ExpiryProducer, ExpiryConsumer) {
    let (producer, consumer) = queue.split();
    (ExpiryProducer { inner: producer }, ExpiryConsumer { inner: consumer })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_then_recv_round_trips() {
        static mut Q: ExpiryQueue = Queue::new();
        let (mut tx, mut rx) = split(unsafe { &mut *core::ptr::addr_of_mut!(Q) });
        assert_eq!(rx.recv(), None);
        tx.send(TaskHandle(7));
        assert_eq!(rx.recv(), Some(TaskHandle(7)));
        assert_eq!(rx.recv(), None);
    }

    #[test]
    fn overflow_drops_newest_not_oldest() {
        static mut Q: ExpiryQueue = Queue::new();
        let (mut tx, mut rx) = split(unsafe { &mut *core::ptr::addr_of_mut!(Q) });
        for i in 0..EXPIRY_CHANNEL_LEN as u32 {
            tx.send(TaskHandle(i));
        }
        // Channel is now full; this send is dropped.
        tx.send(TaskHandle(9999));
        assert_eq!(rx.recv(), Some(TaskHandle(0)));
    }
}
