//! Text-to-number conversions.
//!
//! These follow the C runtime contract rather than Rust's `FromStr`: a
//! parse never fails outright, it reports how many bytes it consumed and
//! clamps out-of-range values. A caller detects "no number here" by
//! `consumed == 0`.

/// Result of an integer parse.
///
/// `consumed` is the offset of the first byte that did not belong to the
/// number (leading whitespace, sign and base prefix included); zero when no
/// digits were found. `overflowed` is set when the value was clamped to the
/// limits of the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub consumed: usize,
    pub overflowed: bool,
}

/// Result of a floating-point parse. Out-of-range values saturate, so no
/// overflow flag is reported; `consumed == 0` means no number was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedFloat {
    pub value: f64,
    pub consumed: usize,
}

/// C `isspace` set: space, `\t`, `\n`, `\v`, `\f`, `\r`.
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// Shared scan for the unsigned family: whitespace, sign, base detection
/// and greedy digit accumulation.
struct RawUnsigned {
    magnitude: u64,
    end: usize,
    overflowed: bool,
    negative: bool,
}

fn scan_unsigned(input: &str, base: u32) -> RawUnsigned {
    let bytes = input.as_bytes();
    let nothing = |negative| RawUnsigned {
        magnitude: 0,
        end: 0,
        overflowed: false,
        negative,
    };

    // Base must be zero (auto-detect) or 2..=36.
    if base == 1 || base > 36 {
        return nothing(false);
    }
    let mut base = u64::from(base);

    let mut pos = 0;
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }

    let mut negative = false;
    match bytes.get(pos) {
        Some(b'+') => pos += 1,
        Some(b'-') => {
            negative = true;
            pos += 1;
        }
        _ => {}
    }

    // `end` trails the last accepted byte. A lone "0" prefix already counts
    // as a parsed digit, so the end offset moves past it even when nothing
    // follows.
    let mut end = 0;
    if bytes.get(pos) == Some(&b'0') {
        pos += 1;
        end = pos;

        let next = bytes.get(pos).copied();
        if base == 16 && matches!(next, Some(b'x' | b'X')) {
            pos += 1;
        } else if base == 0 {
            if matches!(next, Some(b'x' | b'X')) {
                base = 16;
                pos += 1;
            } else {
                base = 8;
            }
        }
    } else if base == 0 {
        base = 10;
    }

    let mut magnitude = 0u64;
    let mut overflowed = false;
    while pos < bytes.len() {
        let digit = match bytes[pos] {
            b @ b'0'..=b'9' => u64::from(b - b'0'),
            b @ b'a'..=b'z' => u64::from(b - b'a') + 10,
            b @ b'A'..=b'Z' => u64::from(b - b'A') + 10,
            _ => break,
        };
        if digit >= base {
            break;
        }
        pos += 1;
        end = pos;

        // Keep consuming digits after overflow so the end offset still
        // reaches the first non-digit, but stop updating the accumulator.
        if overflowed {
            continue;
        }
        match magnitude.checked_mul(base).and_then(|m| m.checked_add(digit)) {
            Some(m) => magnitude = m,
            None => overflowed = true,
        }
    }

    if overflowed {
        magnitude = u64::MAX;
    }

    RawUnsigned {
        magnitude,
        end,
        overflowed,
        negative,
    }
}

/// Parse an unsigned 64-bit integer, `strtoull` style.
///
/// `base` is `0` for auto-detection (`0x`/`0X` selects 16, a leading `0`
/// selects 8, anything else 10) or an explicit `2..=36`. With base 16 a
/// leading `0x`/`0X` is consumed. A leading `-` negates the result in
/// two's complement, as the C family documents.
///
/// Overflow clamps to [`u64::MAX`] (digits keep being consumed so
/// `consumed` still reports the full span).
#[must_use]
pub fn parse_u64(input: &str, base: u32) -> Parsed<u64> {
    let raw = scan_unsigned(input, base);
    let value = if raw.overflowed {
        u64::MAX
    } else if raw.negative {
        raw.magnitude.wrapping_neg()
    } else {
        raw.magnitude
    };
    Parsed {
        value,
        consumed: raw.end,
        overflowed: raw.overflowed,
    }
}

/// Parse a signed 64-bit integer, `strtoll` style.
///
/// Delegates to the unsigned scan and clamps: values past [`i64::MAX`]
/// (positive) or below [`i64::MIN`] (negative) saturate to the respective
/// limit, with `overflowed` set.
#[must_use]
pub fn parse_i64(input: &str, base: u32) -> Parsed<i64> {
    const SIGNED_MAX: u64 = i64::MAX as u64;

    let raw = scan_unsigned(input, base);
    let (value, overflowed) = if raw.overflowed {
        (if raw.negative { i64::MIN } else { i64::MAX }, true)
    } else if !raw.negative && raw.magnitude > SIGNED_MAX {
        (i64::MAX, true)
    } else if raw.negative && raw.magnitude > SIGNED_MAX + 1 {
        (i64::MIN, true)
    } else if raw.negative {
        // magnitude == 2^63 maps to i64::MIN exactly.
        ((raw.magnitude as i64).wrapping_neg(), false)
    } else {
        (raw.magnitude as i64, false)
    };

    Parsed {
        value,
        consumed: raw.end,
        overflowed,
    }
}

/// `strtoul` for 32-bit targets: a full 64-bit parse clamped to `u32`.
#[must_use]
pub fn parse_u32(input: &str, base: u32) -> Parsed<u32> {
    let wide = parse_u64(input, base);
    let clamped = wide.value > u64::from(u32::MAX);
    Parsed {
        value: if clamped { u32::MAX } else { wide.value as u32 },
        consumed: wide.consumed,
        overflowed: wide.overflowed || clamped,
    }
}

/// `strtol` for 32-bit targets: a full 64-bit parse clamped to `i32`.
#[must_use]
pub fn parse_i32(input: &str, base: u32) -> Parsed<i32> {
    let wide = parse_i64(input, base);
    let (value, clamped) = if wide.value > i64::from(i32::MAX) {
        (i32::MAX, true)
    } else if wide.value < i64::from(i32::MIN) {
        (i32::MIN, true)
    } else {
        (wide.value as i32, false)
    };
    Parsed {
        value,
        consumed: wide.consumed,
        overflowed: wide.overflowed || clamped,
    }
}

/// Accumulate a run of digits as a float by repeated multiply-add.
///
/// Returns the value and the number of bytes consumed. Only bases 10 and
/// 16 occur (hex floats use hex digits for the mantissa).
fn scan_float_digits(bytes: &[u8], base: u32) -> (f64, usize) {
    let fbase = f64::from(base);
    let mut value = 0.0f64;
    let mut len = 0;
    while len < bytes.len() {
        let digit = match bytes[len] {
            b @ b'0'..=b'9' => u32::from(b - b'0'),
            b @ b'a'..=b'f' if base == 16 => u32::from(b - b'a') + 10,
            b @ b'A'..=b'F' if base == 16 => u32::from(b - b'A') + 10,
            _ => break,
        };
        value = value * fbase + f64::from(digit);
        len += 1;
    }
    (value, len)
}

/// Case-insensitive ASCII prefix test.
fn has_token(bytes: &[u8], token: &[u8]) -> bool {
    bytes.len() >= token.len()
        && bytes
            .iter()
            .zip(token)
            .all(|(b, t)| b.to_ascii_uppercase() == *t)
}

/// Parse a floating-point number, `strtold` style, end-to-end in `f64`
/// (the widest native float).
///
/// Accepts decimal (`123.45e-6`) and hexadecimal (`0x7B.Cp2`, binary
/// exponent) forms, the case-insensitive tokens `INF`, `INFINITY` and
/// `NAN` (sign ignored for NaN), and saturates exponent overflow to
/// [`f64::MAX`] and underflow to [`f64::MIN_POSITIVE`] — never to zero.
///
/// An exponent letter with no digits after it is backed out: the number
/// before the letter is returned and `consumed` stops at the letter.
#[must_use]
pub fn parse_f64(input: &str) -> ParsedFloat {
    let bytes = input.as_bytes();
    let nothing = ParsedFloat {
        value: 0.0,
        consumed: 0,
    };

    let mut pos = 0;
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }

    let mut sign = 1.0f64;
    match bytes.get(pos) {
        Some(b'+') => pos += 1,
        Some(b'-') => {
            sign = -1.0;
            pos += 1;
        }
        _ => {}
    }

    // A 0x prefix is the only way to get a non-decimal conversion.
    let mut base = 10u32;
    if has_token(&bytes[pos..], b"0X") {
        base = 16;
        pos += 2;
    }

    if has_token(&bytes[pos..], b"INFINITY") {
        return ParsedFloat {
            value: sign * f64::INFINITY,
            consumed: pos + 8,
        };
    }
    if has_token(&bytes[pos..], b"NAN") {
        return ParsedFloat {
            value: f64::NAN,
            consumed: pos + 3,
        };
    }
    if has_token(&bytes[pos..], b"INF") {
        return ParsedFloat {
            value: sign * f64::INFINITY,
            consumed: pos + 3,
        };
    }

    let (integer_part, integer_len) = scan_float_digits(&bytes[pos..], base);
    if integer_len == 0 && bytes.get(pos) != Some(&b'.') {
        return nothing;
    }
    pos += integer_len;

    let mut value = integer_part;
    let mut fraction_seen = false;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;

        // Leading zeros carry no digits of their own but shift the rest of
        // the fraction further down.
        let mut zeros = 0u32;
        while bytes.get(pos) == Some(&b'0') {
            zeros += 1;
            pos += 1;
        }

        let (mut fraction, fraction_len) = scan_float_digits(&bytes[pos..], base);
        pos += fraction_len;
        fraction_seen = zeros > 0 || fraction_len > 0;

        let fbase = f64::from(base);
        while fraction >= 1.0 {
            fraction /= fbase;
        }
        for _ in 0..zeros {
            fraction /= fbase;
        }
        value += fraction;
    }

    // A bare '.' (or "0x.") carries no digits at all.
    if integer_len == 0 && !fraction_seen {
        return nothing;
    }

    // Optional exponent; the letter depends on the base, the exponent
    // itself is always decimal.
    let mut exponent = 0i64;
    let expects = if base == 16 {
        [b'p', b'P']
    } else {
        [b'e', b'E']
    };
    if matches!(bytes.get(pos), Some(&b) if b == expects[0] || b == expects[1]) {
        let tail = parse_i64(&input[pos + 1..], 10);
        if tail.consumed == 0 {
            // Dangling exponent letter: back up over it and succeed.
            return ParsedFloat {
                value: sign * value,
                consumed: pos,
            };
        }
        exponent = tail.value;
        pos += 1 + tail.consumed;
    }

    // For hex the exponent is a power of two. An exact zero is left alone:
    // scaling it would either spin on the magnitude loops or fabricate an
    // underflow that never happened.
    if value == 0.0 {
        exponent = 0;
    }
    let exp_base = if base == 16 { 2.0f64 } else { 10.0 };
    while exponent > 0 {
        if f64::MAX / exp_base < value {
            value = f64::MAX;
            break;
        }
        value *= exp_base;
        exponent -= 1;
    }
    while exponent < 0 {
        if f64::MIN_POSITIVE * exp_base > value {
            value = f64::MIN_POSITIVE;
            break;
        }
        value /= exp_base;
        exponent += 1;
    }

    ParsedFloat {
        value: sign * value,
        consumed: pos,
    }
}

/// `strtof`: a full `f64` parse clamped to `f32` range.
///
/// Infinities and NaN pass through; finite values past `f32` range clamp
/// to `±f32::MAX`, and non-zero values below the smallest positive `f32`
/// clamp to `±f32::MIN_POSITIVE`.
#[must_use]
pub fn parse_f32(input: &str) -> (f32, usize) {
    let wide = parse_f64(input);
    let v = wide.value;

    let value = if v.is_nan() {
        f32::NAN
    } else if v.is_infinite() {
        if v > 0.0 { f32::INFINITY } else { f32::NEG_INFINITY }
    } else if v > f64::from(f32::MAX) {
        f32::MAX
    } else if v < f64::from(f32::MIN) {
        f32::MIN
    } else if v > 0.0 && v < f64::from(f32::MIN_POSITIVE) {
        f32::MIN_POSITIVE
    } else if v < 0.0 && v > -f64::from(f32::MIN_POSITIVE) {
        -f32::MIN_POSITIVE
    } else {
        v as f32
    };

    (value, wide.consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(input: &str, base: u32) -> (u64, usize) {
        let p = parse_u64(input, base);
        (p.value, p.consumed)
    }

    fn i(input: &str, base: u32) -> (i64, usize) {
        let p = parse_i64(input, base);
        (p.value, p.consumed)
    }

    #[test]
    fn plain_decimal() {
        assert_eq!(u("123", 10), (123, 3));
        assert_eq!(u("   123 ", 10), (123, 6));
        assert_eq!(u("0", 10), (0, 1));
        assert_eq!(i("-123", 10), (-123, 4));
        assert_eq!(i("   -123 ", 10), (-123, 7));
        assert_eq!(i("+42", 10), (42, 3));
    }

    #[test]
    fn base_auto_detection() {
        assert_eq!(u("0x1A", 0), (26, 4));
        assert_eq!(u("0xA6", 0), (0xA6, 4));
        assert_eq!(u("076", 0), (62, 3));
        assert_eq!(u("123", 0), (123, 3));
        // Explicit bases: the 0x is consumed for 16, a plain 0 is a digit.
        assert_eq!(u("0xA6", 16), (0xA6, 4));
        assert_eq!(u("076", 8), (62, 3));
        // An invalid digit for the base ends the number.
        assert_eq!(u("079", 8), (7, 2));
        assert_eq!(u("079", 0), (7, 2));
    }

    #[test]
    fn prefix_without_digits() {
        // "0x" with nothing usable after it: the 0 itself was a digit.
        assert_eq!(u("0xZ", 0), (0, 1));
        assert_eq!(u("0x", 16), (0, 1));
        assert_eq!(u("0", 0), (0, 1));
    }

    #[test]
    fn no_digits_consumes_nothing() {
        assert_eq!(u("", 10), (0, 0));
        assert_eq!(u("hello", 10), (0, 0));
        assert_eq!(u("   -", 10), (0, 0));
        assert_eq!(u("+ 5", 10), (0, 0));
        // Bad bases fail the same way.
        assert_eq!(u("123", 1), (0, 0));
        assert_eq!(u("123", 37), (0, 0));
    }

    #[test]
    fn stops_at_first_invalid_character() {
        assert_eq!(u("123abc", 10), (123, 3));
        assert_eq!(u("123abc", 16), (0x123abc, 6));
        assert_eq!(u("zz1", 36), (35 * 36 * 36 + 35 * 36 + 1, 3));
        assert_eq!(u("12.5", 10), (12, 2));
    }

    #[test]
    fn unsigned_negation_wraps() {
        assert_eq!(u("-123", 10), (123u64.wrapping_neg(), 4));
        assert_eq!(u("-1", 10), (u64::MAX, 2));
    }

    #[test]
    fn unsigned_overflow_clamps_and_keeps_consuming() {
        let p = parse_u64("18446744073709551616", 10); // 2^64
        assert_eq!(p.value, u64::MAX);
        assert!(p.overflowed);
        assert_eq!(p.consumed, 20);

        // The exact maximum is not an overflow.
        let p = parse_u64("18446744073709551615", 10);
        assert_eq!(p.value, u64::MAX);
        assert!(!p.overflowed);

        // Trailing digits after overflow still move the end offset.
        let p = parse_u64("99999999999999999999999xyz", 10);
        assert_eq!(p.value, u64::MAX);
        assert!(p.overflowed);
        assert_eq!(p.consumed, 23);
    }

    #[test]
    fn signed_clamping_at_the_limits() {
        let max = i64::MAX.to_string();
        let min = i64::MIN.to_string();

        assert_eq!(i(&max, 10), (i64::MAX, max.len()));
        assert_eq!(i(&min, 10), (i64::MIN, min.len()));

        // One digit past the limit pins to the limit.
        let p = parse_i64(&format!("{max}0"), 10);
        assert_eq!(p.value, i64::MAX);
        assert!(p.overflowed);

        let p = parse_i64(&format!("{min}0"), 10);
        assert_eq!(p.value, i64::MIN);
        assert!(p.overflowed);

        // Just above signed range but within unsigned range.
        let p = parse_i64("9223372036854775808", 10);
        assert_eq!(p.value, i64::MAX);
        assert!(p.overflowed);
        let p = parse_i64("-9223372036854775809", 10);
        assert_eq!(p.value, i64::MIN);
        assert!(p.overflowed);
    }

    #[test]
    fn narrow_wrappers_clamp() {
        assert_eq!(parse_u32("4294967295", 10).value, u32::MAX);
        let p = parse_u32("4294967296", 10);
        assert_eq!(p.value, u32::MAX);
        assert!(p.overflowed);

        assert_eq!(parse_i32("-2147483648", 10).value, i32::MIN);
        let p = parse_i32("2147483648", 10);
        assert_eq!(p.value, i32::MAX);
        assert!(p.overflowed);
        let p = parse_i32("-2147483649", 10);
        assert_eq!(p.value, i32::MIN);
        assert!(p.overflowed);
    }

    #[test]
    fn float_plain_forms() {
        let p = parse_f64("123.456");
        assert!((p.value - 123.456).abs() < 1e-12);
        assert_eq!(p.consumed, 7);

        assert_eq!(parse_f64("42").value, 42.0);
        assert_eq!(parse_f64(".5").value, 0.5);
        assert_eq!(parse_f64("1.").value, 1.0);
        assert_eq!(parse_f64("1.").consumed, 2);
        assert_eq!(parse_f64("  -2.5  ").value, -2.5);
        assert_eq!(parse_f64("  -2.5  ").consumed, 6);
    }

    #[test]
    fn float_fraction_keeps_leading_zeros() {
        let p = parse_f64("0.0625");
        assert_eq!(p.value, 0.0625);
        let p = parse_f64("1.00390625");
        assert_eq!(p.value, 1.003_906_25);
        assert_eq!(parse_f64(".0").value, 0.0);
        assert_eq!(parse_f64(".0").consumed, 2);
    }

    #[test]
    fn float_decimal_exponents() {
        assert_eq!(parse_f64("1e3").value, 1000.0);
        assert_eq!(parse_f64("2.5E-2").value, 0.025);
        assert_eq!(parse_f64("-1.5e2").value, -150.0);
    }

    #[test]
    fn float_dangling_exponent_backs_out() {
        let p = parse_f64("1.5e");
        assert_eq!(p.value, 1.5);
        assert_eq!(p.consumed, 3);

        let p = parse_f64("1.5e+");
        assert_eq!(p.value, 1.5);
        assert_eq!(p.consumed, 3);

        let p = parse_f64("-1.5e+");
        assert_eq!(p.value, -1.5);
        assert_eq!(p.consumed, 4);
    }

    #[test]
    fn float_hex_with_binary_exponent() {
        // 0x7B.C = 123.75; P2 scales by 2^2.
        assert_eq!(parse_f64("0x7B.CP2").value, 495.0);
        assert_eq!(parse_f64("0x7B.CP2").consumed, 8);
        assert_eq!(parse_f64("0x7B.CP-2").value, 30.9375);
        assert_eq!(parse_f64("0x10").value, 16.0);
        assert_eq!(parse_f64("0x.8p1").value, 1.0);
    }

    #[test]
    fn float_special_tokens() {
        assert_eq!(parse_f64("inf").value, f64::INFINITY);
        assert_eq!(parse_f64("inf").consumed, 3);
        assert_eq!(parse_f64("-INF").value, f64::NEG_INFINITY);
        assert_eq!(parse_f64("Infinity").value, f64::INFINITY);
        assert_eq!(parse_f64("Infinity").consumed, 8);
        assert!(parse_f64("nan").value.is_nan());
        assert!(parse_f64("-NaN").value.is_nan());
        assert_eq!(parse_f64("-NaN").consumed, 4);
    }

    #[test]
    fn float_no_digits_consumes_nothing() {
        assert_eq!(parse_f64(""), ParsedFloat { value: 0.0, consumed: 0 });
        assert_eq!(parse_f64("."), ParsedFloat { value: 0.0, consumed: 0 });
        assert_eq!(parse_f64("e5"), ParsedFloat { value: 0.0, consumed: 0 });
        assert_eq!(parse_f64("- 1"), ParsedFloat { value: 0.0, consumed: 0 });
    }

    #[test]
    fn float_saturates_never_to_zero() {
        assert_eq!(parse_f64("1e99999").value, f64::MAX);
        assert_eq!(parse_f64("-1e99999").value, -f64::MAX);
        assert_eq!(parse_f64("1e-99999").value, f64::MIN_POSITIVE);
        assert_eq!(parse_f64("-1e-99999").value, -f64::MIN_POSITIVE);
    }

    #[test]
    fn float_narrow_wrapper_clamps() {
        let (v, _) = parse_f32("1e60");
        assert_eq!(v, f32::MAX);
        let (v, _) = parse_f32("-1e60");
        assert_eq!(v, f32::MIN);
        let (v, _) = parse_f32("1e-60");
        assert_eq!(v, f32::MIN_POSITIVE);
        let (v, _) = parse_f32("-1e-60");
        assert_eq!(v, -f32::MIN_POSITIVE);
        let (v, _) = parse_f32("inf");
        assert_eq!(v, f32::INFINITY);
        let (v, consumed) = parse_f32("1.5");
        assert_eq!((v, consumed), (1.5, 3));
    }
}
