use venue_core::prelude::*;

#[test]
fn test_unsigned_translate() {
    assert_eq!(translate::<u8>(b"0"), 0);
    assert_eq!(translate::<u16>(b"4"), 4);
    assert_eq!(translate::<u32>(b"3482"), 3482);
    assert_eq!(translate::<u64>(b"23873901"), 23873901);
}

#[test]
fn test_signed_translate() {
    assert_eq!(translate::<i16>(b"91"), 91);
    assert_eq!(translate::<i32>(b"-37"), -37);
    assert_eq!(translate::<i64>(b"-34928"), -34928);
}

// Overflow wraps silently rather than erroring; the FIX layer
// pre-validates widths, so the wrap is part of the contract.
#[test]
fn test_unsigned_overflow_wraps() {
    assert_eq!(translate::<u8>(b"300"), 44);
    assert_eq!(translate::<u8>(b"256"), 0);
    assert_eq!(translate::<u16>(b"70000"), 4464);
}

#[test]
fn test_signed_overflow_wraps() {
    assert_eq!(translate::<i8>(b"128"), -128);
    assert_eq!(translate::<i16>(b"32768"), -32768);
}

#[test]
fn test_real_translate() {
    assert!((translate::<f64>(b"34.85") - 34.85).abs() < 1e-9);
    assert!((translate::<f64>(b"-25.68") + 25.68).abs() < 1e-9);
    assert!((translate::<f64>(b"42") - 42.0).abs() < 1e-9);
    assert!((translate::<f64>(b"0.050000") - 0.05).abs() < 1e-9);
    assert!((translate::<f32>(b"1.25") - 1.25).abs() < 1e-6);
}

#[test]
fn test_string_translate_copies() {
    let view = b"this is a view".to_vec();
    let copied = translate::<String>(&view);
    drop(view);
    assert_eq!(copied, "this is a view");
}
