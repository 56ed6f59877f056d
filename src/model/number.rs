//! Coercion of free-text numeric fields into `f64`.
//!
//! Amounts and growth rates are stored exactly as they were typed. Whenever a computation needs
//! them as numbers they pass through [`to_number`], which follows the same rules a browser uses
//! for `Number(text)`: blank text is zero and anything unparseable is `NaN`. `NaN` is not an error
//! here, it is carried through every sum that touches it.

use serde::Serializer;

/// Converts `text` into a number.
///
/// # Examples
///
/// ```
/// # use invest_ledger::model::to_number;
/// assert_eq!(to_number(" 12.5 "), 12.5);
/// assert_eq!(to_number(""), 0.0);
/// assert_eq!(to_number("0x10"), 16.0);
/// assert!(to_number("12 apples").is_nan());
/// ```
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    // `f64::from_str` also accepts "inf", "nan" and friends, which are not numbers here.
    let is_decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses `0x`, `0o` and `0b` integer literals. Returns `None` when `text` has none of these
/// prefixes and `Some(NaN)` when it has one but the digits are invalid.
fn parse_radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2) {
        Some("0x") | Some("0X") => (16, &text[2..]),
        Some("0o") | Some("0O") => (8, &text[2..]),
        Some("0b") | Some("0B") => (2, &text[2..]),
        _ => return None,
    };

    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

/// Formats `value` the way a browser prints a number: `NaN`, `Infinity`, no trailing `.0` on
/// whole numbers, `0` for negative zero, and exponent notation (`1e+21`, `1.5e-7`) outside
/// `1e-6 <= |value| < 1e21`.
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return if value > 0.0 {
            String::from("Infinity")
        } else {
            String::from("-Infinity")
        };
    }
    if value == 0.0 {
        return String::from("0");
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    // Rust prints `1e21` and `1.5e-7`; the positive exponent needs its sign.
    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

/// Serializes a computed figure as a JSON number when it is finite, and as the text
/// [`display_number`] gives it (`"NaN"`, `"Infinity"`, `"-Infinity"`) when it is not.
pub fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(&display_number(*value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decimals() {
        assert_eq!(to_number("1000"), 1000.0);
        assert_eq!(to_number("-250.75"), -250.75);
        assert_eq!(to_number("+3"), 3.0);
        assert_eq!(to_number(".5"), 0.5);
        assert_eq!(to_number("5."), 5.0);
        assert_eq!(to_number("1e3"), 1000.0);
    }

    #[test]
    fn test_blank_is_zero() {
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("   "), 0.0);
        assert_eq!(to_number("\t\n"), 0.0);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(to_number("  42  "), 42.0);
    }

    #[test]
    fn test_garbage_is_nan() {
        assert!(to_number("abc").is_nan());
        assert!(to_number("12abc").is_nan());
        assert!(to_number("1,000").is_nan());
        assert!(to_number("$50").is_nan());
        assert!(to_number("--1").is_nan());
        assert!(to_number("1 000").is_nan());
    }

    #[test]
    fn test_rust_only_spellings_are_nan() {
        assert!(to_number("inf").is_nan());
        assert!(to_number("infinity").is_nan());
        assert!(to_number("NaN").is_nan());
    }

    #[test]
    fn test_infinity() {
        assert_eq!(to_number("Infinity"), f64::INFINITY);
        assert_eq!(to_number("+Infinity"), f64::INFINITY);
        assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(to_number("0x1F"), 31.0);
        assert_eq!(to_number("0o17"), 15.0);
        assert_eq!(to_number("0b101"), 5.0);
        assert!(to_number("0x").is_nan());
        assert!(to_number("0xZZ").is_nan());
        assert!(to_number("-0x10").is_nan());
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(1100.0), "1100");
        assert_eq!(display_number(1100.5), "1100.5");
        assert_eq!(display_number(-20.0), "-20");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(f64::NAN), "NaN");
        assert_eq!(display_number(f64::INFINITY), "Infinity");
        assert_eq!(display_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_display_number_exponent_range() {
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(-2.5e22), "-2.5e+22");
        assert_eq!(display_number(1e-7), "1e-7");
        assert_eq!(display_number(1.5e-9), "1.5e-9");
        assert_eq!(display_number(1e20), "100000000000000000000");
        assert_eq!(display_number(0.000001), "0.000001");
        assert_eq!(display_number(-1.25e-7), "-1.25e-7");
    }

    #[test]
    fn test_serialize_number() {
        #[derive(serde::Serialize)]
        struct Figure {
            #[serde(serialize_with = "serialize_number")]
            value: f64,
        }

        let json = |value| serde_json::to_string(&Figure { value }).unwrap();
        assert_eq!(json(12.5), r#"{"value":12.5}"#);
        assert_eq!(json(f64::NAN), r#"{"value":"NaN"}"#);
        assert_eq!(json(f64::NEG_INFINITY), r#"{"value":"-Infinity"}"#);
    }
}
