//! # Runtime facade
//!
//! The pieces user code reaches first: the one-shot runtime initialisation
//! hook, the C-style allocation surface over the process-wide heap, and
//! the numeric conversion entry points the stream layer builds on.
//!
//! ## Initialisation order
//!
//! The heap must exist before any other runtime service — the standard
//! streams buffer through it — yet its constructor needs a working program
//! break, which is not available during static initialisation. The heap
//! object therefore lives in a statically reserved, suitably aligned byte
//! region and is constructed *in place* by [`initialize_runtime`], exactly
//! once, before `main`. Construction performs no allocation of its own.
//!
//! If the very first break request fails, the heap stays permanently
//! disabled: every later allocation returns null and the process keeps
//! running.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(any(test, feature = "os"))]
mod heap;

#[cfg(any(test, feature = "os"))]
pub use heap::{InitError, RuntimeAllocator, calloc, free, initialize_runtime, malloc, realloc};

pub use rt_num::{
    Adjust, FloatStyle, FormatOptions, IntBase, Parsed, ParsedFloat, format_bool, format_float,
    format_int, format_pointer, format_uint, parse_f32, parse_f64, parse_i32, parse_i64,
    parse_u32, parse_u64,
};
