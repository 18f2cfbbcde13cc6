//! End-to-end checks of the numeric surface the stream layer consumes.

use rt_stdlib::{
    Adjust, FloatStyle, FormatOptions, IntBase, format_float, format_uint, parse_f64, parse_i64,
    parse_u64,
};

#[test]
fn base_auto_detection_quartet() {
    let p = parse_u64("0x1A", 0);
    assert_eq!((p.value, p.consumed), (26, 4));

    let p = parse_u64("076", 0);
    assert_eq!((p.value, p.consumed), (62, 3));

    // With an explicit base 8 the leading zero is an ordinary digit; a
    // digit beyond the base ends the number.
    let p = parse_u64("076", 8);
    assert_eq!((p.value, p.consumed), (62, 3));
    let p = parse_u64("079", 8);
    assert_eq!((p.value, p.consumed), (7, 2));

    // A negative unsigned parse wraps in two's complement; the signed
    // parse keeps the sign.
    assert_eq!(parse_u64("-123", 10).value, 123u64.wrapping_neg());
    assert_eq!(parse_i64("-123", 10).value, -123);
}

#[test]
fn signed_overflow_pins() {
    let over_max = format!("{}0", i64::MAX);
    assert_eq!(parse_i64(&over_max, 10).value, i64::MAX);

    let under_min = format!("{}0", i64::MIN);
    assert_eq!(parse_i64(&under_min, 10).value, i64::MIN);
}

#[test]
fn hex_float_binary_exponent() {
    assert_eq!(parse_f64("0x7B.CP2").value, 495.0);
    assert_eq!(parse_f64("0x7B.CP-2").value, 30.9375);
}

#[test]
fn general_style_trimming() {
    let opts = FormatOptions {
        float_style: FloatStyle::General,
        uppercase: true,
        ..FormatOptions::default()
    };
    // The integer part exceeds the precision: scientific fall-back, and
    // integer digits are never trimmed.
    assert_eq!(format_float(123456792.0, &opts), "1.23456792E8");
    assert_eq!(format_float(123.321, &opts), "123.321");
}

#[test]
fn internal_adjust_hex() {
    let opts = FormatOptions {
        base: IntBase::Hex,
        show_base: true,
        uppercase: true,
        width: 8,
        fill: '0',
        adjust: Adjust::Internal,
        ..FormatOptions::default()
    };
    let s = format_uint(0xA, &opts);
    assert_eq!(s, "0X00000A");
    assert_eq!(s.len(), 8);
}
