//! Filesystem utilities for sspc.
//!
//! Generated modules are written atomically so a failed or interrupted run
//! never leaves a truncated module where the build expects a complete one.

pub mod atomic;

pub use atomic::atomic_write_file;
