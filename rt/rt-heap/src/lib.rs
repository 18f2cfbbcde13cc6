//! # User-space heap
//!
//! A first-fit free-list allocator over the process data segment. The heap
//! owns the byte range between its start address and the current program
//! break and threads a singly linked list of blocks through it:
//!
//! ```text
//! start                                                    break
//!   │                                                        │
//!   ▼                                                        ▼
//! ┌────────┬─────────┬────────┬─────────┬────────┬──────────┐
//! │ header │ payload │ header │ payload │ header │ sentinel  │
//! │ (H)    │ (size)  │ (H)    │ (size)  │ (H)    │ size = 0  │
//! └────────┴─────────┴────────┴─────────┴────────┴──────────┘
//! ```
//!
//! - Every header is padded to [`HEAP_ALIGN`] bytes, so payload addresses
//!   are always 16-byte aligned and every recorded size is a multiple of 16.
//! - The list ends in a zero-size free *sentinel* whose header occupies the
//!   last `H` bytes below the break; growing the heap turns the sentinel
//!   into a live block and creates a fresh sentinel above it.
//! - Freed blocks coalesce forward only. Merging backwards would need a
//!   doubly linked list, and the extra header word was judged worse than
//!   the fragmentation.
//!
//! The heap is built for a single execution context. It never unwinds and
//! never prints: every failure path is a `None` return, and a failed
//! bootstrap leaves the heap permanently disabled (every request fails, the
//! process keeps running).

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod heap;

pub use heap::{BlockInfo, Blocks, UserHeap};

/// Alignment of every payload address and every block size, in bytes.
pub const HEAP_ALIGN: usize = 16;

/// Align `value` upwards to `align` (must be a power of two).
#[inline]
#[must_use]
pub const fn align_up(value: usize, align: usize) -> usize {
    (value + (align - 1)) & !(align - 1)
}

/// Size of a block header once padded to [`HEAP_ALIGN`].
///
/// Payloads start this many bytes after their block's address, and the
/// sentinel occupies exactly this many bytes below the break.
#[must_use]
pub const fn header_size() -> usize {
    align_up(core::mem::size_of::<heap::BlockHeader>(), HEAP_ALIGN)
}
