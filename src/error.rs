//! # Error Taxonomy
//!
//! All fallible core operations return `Result<T, MlfqError>`. The tick
//! accountant's ISR-context path never raises — expiry-channel overflow is
//! absorbed silently there (see `channel::ExpiryProducer::send`) — so
//! `MlfqError` only ever surfaces from task-context calls.

use core::fmt;

/// Failure modes a caller may observe from the public task-context API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MlfqError {
    /// The task table has no free slots (`config::MAX_TASKS` reached).
    TableFull,
    /// The task handle is already registered.
    AlreadyPresent,
    /// No record exists for the given task handle.
    NotFound,
    /// An argument violated a precondition (e.g. a zero quantum).
    InvalidArgument,
    /// The underlying kernel primitive reported failure (e.g. a priority
    /// set was rejected). Treated as transient: the next demotion or
    /// boost cycle re-applies the intended state.
    KernelPrimitiveFailure,
}

impl fmt::Display for MlfqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MlfqError::TableFull => "task table full",
            MlfqError::AlreadyPresent => "task already registered",
            MlfqError::NotFound => "task not registered",
            MlfqError::InvalidArgument => "invalid argument",
            MlfqError::KernelPrimitiveFailure => "kernel primitive failed",
        };
        f.write_str(msg)
    }
}
