//! # Program break interface
//!
//! The heap's only dependency on the outside world is the ability to query
//! and move the process data-segment end (the *program break*). This crate
//! pins that dependency down to a single trait, [`ProgramBreak`], with two
//! implementations:
//!
//! - [`OsBreak`] drives the real `brk(2)`/`sbrk(2)` system calls (feature
//!   `os`, enabled by default),
//! - [`RegionBreak`] emulates a break inside a caller-provided memory
//!   region, for tests and for freestanding configurations that reserve a
//!   fixed arena instead of owning the break.
//!
//! The break is expected to move monotonically upwards under allocator use;
//! nothing here ever hands memory back to the operating system.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod region;
#[cfg(feature = "os")]
mod system;

pub use region::RegionBreak;
#[cfg(feature = "os")]
pub use system::OsBreak;

/// The break could not be moved to the requested target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BreakError {
    /// The operating system (or the emulated region) refused the request,
    /// i.e. the data segment cannot grow any further.
    #[error("program break request was rejected")]
    Exhausted,
}

/// Query and move the process program break.
///
/// # Contract
/// - `set_break(0)` returns the current break without changing it.
/// - `set_break(target)` for any other value requests the break be moved to
///   at least `target` and returns the new break.
/// - Failure means resource exhaustion; the break is left where it was.
/// - Callers only ever request non-decreasing targets; implementations are
///   not required to support shrinking.
pub trait ProgramBreak {
    /// Query (`target == 0`) or move the program break.
    ///
    /// # Errors
    /// [`BreakError::Exhausted`] when the break cannot reach `target`.
    fn set_break(&mut self, target: usize) -> Result<usize, BreakError>;
}
