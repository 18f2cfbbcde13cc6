//! # Numeric conversions
//!
//! Text-to-number and number-to-text conversions with C-runtime semantics,
//! shared by the runtime's stream layer:
//!
//! - [`parse`]: the `strtoull`/`strtoll`/`strtold` family — base
//!   auto-detection, greedy digit consumption with end-offset reporting,
//!   exact overflow clamping, hexadecimal floats with binary exponents.
//! - [`format`]: raw digit converters for bases 2..=36 and the stream
//!   style layer (width, fill, adjustment, base prefixes, signs, fixed /
//!   scientific / general float styles).
//!
//! Everything reports through return values; nothing here panics on bad
//! input, and all output is plain ASCII (locale is not honoured).

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

pub mod format;
pub mod parse;

pub use format::{
    Adjust, FloatStyle, FormatOptions, IntBase, double_to_string, format_bool, format_float,
    format_int, format_pointer, format_uint, int_to_string, uint_to_string,
};
pub use parse::{
    Parsed, ParsedFloat, parse_f32, parse_f64, parse_i32, parse_i64, parse_u32, parse_u64,
};
