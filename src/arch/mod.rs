//! # Architecture Abstraction Layer
//!
//! Reference [`crate::kernel::RtKernel`] implementations. Currently ships
//! a Cortex-M4 port; extensible to other architectures by adding sibling
//! modules that implement the same trait.

pub mod cortex_m4;
