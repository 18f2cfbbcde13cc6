//! Number-to-text conversions.
//!
//! Two layers, mirroring the stream machinery that consumes them:
//!
//! - raw converters ([`uint_to_string`], [`int_to_string`],
//!   [`double_to_string`]) produce bare upper-case digit strings;
//! - the style layer ([`format_uint`], [`format_int`], [`format_float`],
//!   [`format_pointer`], [`format_bool`]) applies a [`FormatOptions`]
//!   record: base prefixes, signs, decimal-point and precision handling,
//!   case, and width/fill/adjustment padding.
//!
//! Float digits come from the shortest round-tripping decimal rendering,
//! so every representation carries enough significant digits to recover
//! the value exactly. The style layer truncates excess digits; it never
//! rounds.

use alloc::string::{String, ToString};

/// Default number of precision digits when none is configured.
const DEFAULT_PRECISION: usize = 6;

/// Integer radix selection for the style layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntBase {
    Oct,
    #[default]
    Dec,
    Hex,
}

/// Where padding goes when a representation is narrower than the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjust {
    /// Fill appended after the representation.
    Left,
    /// Fill prepended (the default).
    #[default]
    Right,
    /// Fill inserted after any leading sign and base prefix.
    Internal,
}

/// Floating-point rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatStyle {
    /// Exactly `precision` digits after the decimal point.
    Fixed,
    /// Like `Fixed`, plus a signed two-digit minimum exponent.
    Scientific,
    /// At most `precision` significant digits, trailing zeros trimmed.
    #[default]
    General,
    /// Hexadecimal floats are not implemented; renders a stable
    /// placeholder.
    Hex,
}

/// Formatting configuration, the analogue of a stream's format flags.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Integer radix; also controls which base prefix `show_base` inserts.
    pub base: IntBase,
    /// Prefix non-zero hex values with `0X` and octal values with `0`.
    pub show_base: bool,
    /// Write a `+` before non-negative values.
    pub show_sign: bool,
    /// Keep the decimal point (and precision zeros) even for whole values.
    pub show_point: bool,
    /// Leave letters upper-case; when unset everything is lower-cased.
    pub uppercase: bool,
    /// Render booleans as `true`/`false` instead of `1`/`0`.
    pub boolalpha: bool,
    pub float_style: FloatStyle,
    /// Digits after the point (fixed/scientific) or total significant
    /// digits (general).
    pub precision: usize,
    /// Minimum field width; shorter representations are padded.
    pub width: usize,
    /// Padding character.
    pub fill: char,
    pub adjust: Adjust,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            base: IntBase::Dec,
            show_base: false,
            show_sign: false,
            show_point: false,
            uppercase: false,
            boolalpha: false,
            float_style: FloatStyle::General,
            precision: DEFAULT_PRECISION,
            width: 0,
            fill: ' ',
            adjust: Adjust::Right,
        }
    }
}

impl FormatOptions {
    const fn radix(&self) -> u32 {
        match self.base {
            IntBase::Oct => 8,
            IntBase::Dec => 10,
            IntBase::Hex => 16,
        }
    }
}

/// Digit alphabet for bases up to 36; the raw converters are upper-case.
const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Convert an unsigned value to digits in the given base.
///
/// Digits beyond 9 render upper-case; the style layer lower-cases when
/// configured. Bases outside 2..=36 yield an empty string.
#[must_use]
pub fn uint_to_string(mut value: u64, base: u32) -> String {
    if !(2..=36).contains(&base) {
        return String::new();
    }

    let mut buf = [0u8; 64];
    let mut at = buf.len();
    loop {
        at -= 1;
        buf[at] = DIGITS[(value % u64::from(base)) as usize];
        value /= u64::from(base);
        if value == 0 {
            break;
        }
    }

    let mut out = String::with_capacity(buf.len() - at);
    out.push_str(core::str::from_utf8(&buf[at..]).unwrap_or(""));
    out
}

/// Convert a signed value to digits, with a `-` for negative values.
#[must_use]
pub fn int_to_string(value: i64, base: u32) -> String {
    let mut out = uint_to_string(value.unsigned_abs(), base);
    if value < 0 && !out.is_empty() {
        out.insert(0, '-');
    }
    out
}

/// Shortest round-tripping scientific rendering, upper-case `E`.
fn scientific_repr(value: f64) -> String {
    let mut s = alloc::format!("{value:e}");
    // The mantissa never contains letters, so this only touches the marker.
    s.make_ascii_uppercase();
    s
}

/// Decimal exponent of `value`, read off the scientific rendering so that
/// boundary values do not suffer from logarithm rounding.
fn decimal_exponent(value: f64) -> i32 {
    let s = scientific_repr(value);
    let e = s.find('E').map_or(0, |e| e + 1);
    s[e..].parse().unwrap_or(0)
}

/// Whether the general style renders `value` in scientific notation: the
/// integer part no longer fits `precision` digits, or the value is small
/// enough that a fixed rendering would be all leading zeros.
fn general_uses_scientific(value: f64, precision: usize) -> bool {
    if value == 0.0 {
        return false;
    }
    let exp = decimal_exponent(value);
    exp >= i32::try_from(precision).unwrap_or(i32::MAX) || exp < -4
}

/// Convert a float to a raw digit string in the requested style.
///
/// Letters are upper-case (`E`, `INF`, `NAN`); the representation always
/// carries enough significant digits to round-trip. The reserved hex style
/// renders the stable placeholder string.
#[must_use]
pub fn double_to_string(value: f64, style: FloatStyle) -> String {
    if value.is_nan() {
        return String::from("NAN");
    }
    if value.is_infinite() {
        return String::from(if value < 0.0 { "-INF" } else { "INF" });
    }

    match style {
        FloatStyle::Hex => String::from("Not implemented"),
        FloatStyle::Fixed => value.to_string(),
        FloatStyle::Scientific => scientific_repr(value),
        FloatStyle::General => {
            if general_uses_scientific(value, DEFAULT_PRECISION) {
                scientific_repr(value)
            } else {
                value.to_string()
            }
        }
    }
}

/// Insert `count` repetitions of `fill` at `pos`.
fn insert_fill(s: &mut String, pos: usize, fill: char, count: usize) {
    let mut pad = String::with_capacity(count);
    for _ in 0..count {
        pad.push(fill);
    }
    s.insert_str(pos, &pad);
}

/// Pad `s` to the configured width, with the insertion point for the
/// internal adjustment supplied by the caller.
fn pad(s: &mut String, opts: &FormatOptions, internal_at: usize) {
    if s.len() >= opts.width {
        return;
    }
    let missing = opts.width - s.len();
    let at = match opts.adjust {
        Adjust::Right => 0,
        Adjust::Left => s.len(),
        Adjust::Internal => internal_at,
    };
    insert_fill(s, at, opts.fill, missing);
}

/// Offset just past a leading sign.
fn after_sign(s: &str) -> usize {
    usize::from(s.starts_with('-') || s.starts_with('+'))
}

/// Format an unsigned integer under the full style layer.
#[must_use]
pub fn format_uint(value: u64, opts: &FormatOptions) -> String {
    let mut s = uint_to_string(value, opts.radix());

    // The base prefix only appears on non-zero values; showing a plus sign
    // has no effect on unsigned conversions. Internal padding goes after
    // whichever prefix was inserted (`0X` for hex, `0` for octal).
    let mut prefix_len = 0;
    if opts.show_base && value != 0 {
        match opts.base {
            IntBase::Hex => {
                s.insert_str(0, "0X");
                prefix_len = 2;
            }
            IntBase::Oct => {
                s.insert(0, '0');
                prefix_len = 1;
            }
            IntBase::Dec => {}
        }
    }

    if !opts.uppercase {
        s.make_ascii_lowercase();
    }

    pad(&mut s, opts, prefix_len);
    s
}

/// Format a signed integer under the full style layer.
///
/// Hex and octal bases reinterpret the value as unsigned, as the stream
/// inserters do; only the decimal path renders a sign.
#[must_use]
pub fn format_int(value: i64, opts: &FormatOptions) -> String {
    match opts.base {
        IntBase::Hex | IntBase::Oct => format_uint(value as u64, opts),
        IntBase::Dec => {
            let mut s = int_to_string(value, 10);
            if opts.show_sign && value >= 0 {
                s.insert(0, '+');
            }
            if !opts.uppercase {
                s.make_ascii_lowercase();
            }
            // Decimal carries no base prefix, so internal padding lands
            // right after the sign; a leading `0` here is a digit.
            let internal_at = after_sign(&s);
            pad(&mut s, opts, internal_at);
            s
        }
    }
}

/// Format a float under the full style layer. See [`FloatStyle`] for the
/// per-style digit rules.
#[must_use]
pub fn format_float(value: f64, opts: &FormatOptions) -> String {
    if opts.float_style == FloatStyle::Hex {
        return String::from("Not implemented");
    }

    let mut s = if value.is_finite() {
        match opts.float_style {
            FloatStyle::Fixed => {
                let mut s = double_to_string(value, FloatStyle::Fixed);
                style_fixed(&mut s, opts);
                s
            }
            FloatStyle::Scientific => {
                let mut s = double_to_string(value, FloatStyle::Scientific);
                style_scientific(&mut s, opts);
                s
            }
            FloatStyle::General | FloatStyle::Hex => {
                let mut s = if general_uses_scientific(value, opts.precision) {
                    scientific_repr(value)
                } else {
                    value.to_string()
                };
                style_general(&mut s, opts);
                s
            }
        }
    } else {
        // INF and NAN skip the digit manipulations entirely.
        double_to_string(value, opts.float_style)
    };

    if opts.show_sign && !value.is_nan() && !s.starts_with('-') {
        s.insert(0, '+');
    }
    if !opts.uppercase {
        s.make_ascii_lowercase();
    }

    let internal_at = after_sign(&s);
    pad(&mut s, opts, internal_at);
    s
}

/// Fixed style: exactly `precision` digits after the point.
///
/// A missing point is inserted when digits (or `show_point`) call for it;
/// excess digits are cut, missing ones are zero-filled.
fn style_fixed(s: &mut String, opts: &FormatOptions) {
    let prec = opts.precision;
    match s.find('.') {
        None => {
            if prec > 0 || opts.show_point {
                s.push('.');
                insert_fill(s, s.len(), '0', prec);
            }
        }
        Some(dot) => {
            let count = s.len() - dot - 1;
            if count > prec {
                s.truncate(s.len() - (count - prec));
            } else {
                insert_fill(s, s.len(), '0', prec - count);
            }
        }
    }
}

/// Scientific style: fixed digit rules on the mantissa, then an exponent
/// with an explicit sign and at least two digits.
fn style_scientific(s: &mut String, opts: &FormatOptions) {
    let prec = opts.precision;
    let mut epos = s.find('E').unwrap_or(s.len());

    match s[..epos].find('.') {
        None => {
            if prec > 0 || opts.show_point {
                s.insert(epos, '.');
                epos += 1;
                insert_fill(s, epos, '0', prec);
                epos += prec;
            }
        }
        Some(dot) => {
            let count = epos - dot - 1;
            if count > prec {
                let cut = count - prec;
                s.replace_range(epos - cut..epos, "");
                epos -= cut;
            } else {
                insert_fill(s, epos, '0', prec - count);
                epos += prec - count;
            }
        }
    }

    // Normalise the exponent: explicit sign, minimum two digits.
    let mut at = epos + 1;
    if !matches!(s.as_bytes().get(at), Some(b'+' | b'-')) {
        s.insert(at, '+');
    }
    at += 1;
    let exp_digits = s.len() - at;
    if exp_digits < 2 {
        insert_fill(s, at, '0', 2 - exp_digits);
    }
}

/// General style: cap the digit count at `precision` by cutting trailing
/// digits, but never digits that belong to the value's integer part; then
/// trim trailing zeros and a lone point unless `show_point` keeps them.
fn style_general(s: &mut String, opts: &FormatOptions) {
    let prec = opts.precision;
    let mut mant_end = s.find('E').unwrap_or(s.len());
    let exponent: i32 = if mant_end < s.len() {
        s[mant_end + 1..].parse().unwrap_or(0)
    } else {
        0
    };

    let digits = s[..mant_end].bytes().filter(u8::is_ascii_digit).count();
    let rendered_fraction = s[..mant_end].find('.').map_or(0, |dot| mant_end - dot - 1);
    // In scientific notation the first `exponent` fraction digits still
    // represent the integer part of the value; they are protected.
    let deletable = rendered_fraction.saturating_sub(usize::try_from(exponent).unwrap_or(0));

    if digits > prec && deletable > 0 {
        let cut = deletable.min(digits - prec);
        s.replace_range(mant_end - cut..mant_end, "");
        mant_end -= cut;
    }

    if opts.show_point {
        if s[..mant_end].find('.').is_none() {
            s.insert(mant_end, '.');
            mant_end += 1;
        }
        let digits = s[..mant_end].bytes().filter(u8::is_ascii_digit).count();
        if digits < prec {
            insert_fill(s, mant_end, '0', prec - digits);
        }
    } else if let Some(dot) = s[..mant_end].find('.') {
        let mut keep = mant_end;
        while keep > dot + 1 && s.as_bytes()[keep - 1] == b'0' {
            keep -= 1;
        }
        if keep == dot + 1 {
            keep = dot;
        }
        s.replace_range(keep..mant_end, "");
    }
}

/// Format a pointer-sized address.
///
/// Null renders as the single character `0`; everything else renders as
/// hex with an unconditional `0X` prefix, independent of `show_base`.
#[must_use]
pub fn format_pointer(value: usize, opts: &FormatOptions) -> String {
    let mut s = if value == 0 {
        String::from("0")
    } else {
        let mut s = uint_to_string(value as u64, 16);
        s.insert_str(0, "0X");
        if !opts.uppercase {
            s.make_ascii_lowercase();
        }
        s
    };

    let internal_at = if value == 0 { 0 } else { 2 };
    pad(&mut s, opts, internal_at);
    s
}

/// Format a boolean.
///
/// With `boolalpha` the words `true`/`false` are padded as-is (internal
/// adjustment degenerates to right); otherwise the value goes through the
/// integer path as `1`/`0`.
#[must_use]
pub fn format_bool(value: bool, opts: &FormatOptions) -> String {
    if !opts.boolalpha {
        return format_int(i64::from(value), opts);
    }
    let mut s = String::from(if value { "true" } else { "false" });
    pad(&mut s, opts, 0);
    s
}
