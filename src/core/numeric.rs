//! Format checks for numeric attributes.
//!
//! These are well-formedness checks only: validity never depends on range,
//! scale, or precision. Typed parsing is separate and may return `None`
//! for well-formed values `rust_decimal` or `i64` cannot represent.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a well-formed decimal into a `Decimal`.
///
/// Returns `None` when the text is not a valid decimal or does not fit.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    if !is_valid_decimal(s) {
        return None;
    }
    let s = s.trim();
    if s.contains(['e', 'E']) {
        return Decimal::from_scientific(s).ok();
    }
    Decimal::from_str(s).ok()
}

/// Parse a signed whole number. Surrounding whitespace is ignored.
pub fn parse_integer(s: &str) -> Option<i64> {
    if !is_valid_integer(s) {
        return None;
    }
    s.trim().parse().ok()
}

/// Whether `s` is a well-formed base-10 decimal: optional sign, an integer
/// and/or fractional part, optional exponent (`1.5e3`). Surrounding
/// whitespace is ignored; digit-group separators are not accepted.
pub fn is_valid_decimal(s: &str) -> bool {
    let s = s.trim();
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let mantissa = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let well_formed_mantissa = !(int_part.is_empty() && frac_part.is_empty())
        && all_digits(int_part)
        && all_digits(frac_part);

    well_formed_mantissa && exponent.is_none_or(is_valid_integer_token)
}

/// Whether `s` is a well-formed signed whole number, of any magnitude.
pub fn is_valid_integer(s: &str) -> bool {
    is_valid_integer_token(s.trim())
}

fn is_valid_integer_token(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && all_digits(digits)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_accepts_common_forms() {
        assert_eq!(parse_decimal("100"), Some(dec!(100)));
        assert_eq!(parse_decimal("1500.50"), Some(dec!(1500.50)));
        assert_eq!(parse_decimal("-0.25"), Some(dec!(-0.25)));
        assert_eq!(parse_decimal("+7"), Some(dec!(7)));
        assert_eq!(parse_decimal("  42.0 "), Some(dec!(42.0)));
        assert_eq!(parse_decimal("0010.5"), Some(dec!(10.5)));
        assert_eq!(parse_decimal("1.5e3"), Some(dec!(1500)));
        assert_eq!(parse_decimal("2E-2"), Some(dec!(0.02)));
    }

    #[test]
    fn decimal_rejects_garbage() {
        for s in ["", "   ", "abc", "12.3.4", "1,000.00", "1_000", "12a", "$5"] {
            assert!(!is_valid_decimal(s), "{s:?} should be rejected");
        }
    }

    #[test]
    fn decimal_validity_ignores_range_and_precision() {
        for s in [
            "100000000000000000000000000000",
            "79228162514264337593543950336",
            "1e40",
            "1e-40",
            "0.00000000000000000000000000000001",
        ] {
            assert!(is_valid_decimal(s), "{s:?} should be accepted");
        }
        assert_eq!(parse_decimal("1e40"), None);
        assert_eq!(parse_decimal("79228162514264337593543950336"), None);
    }

    #[test]
    fn decimal_grammar_edges() {
        assert!(is_valid_decimal(".5"));
        assert!(is_valid_decimal("5."));
        assert!(is_valid_decimal("-1.25E+2"));
        for s in [".", "-", "+.", "1e", "1e+", "e5", "1.5e2.0", "--1", "1 000", "١٢"] {
            assert!(!is_valid_decimal(s), "{s:?} should be rejected");
        }
    }

    #[test]
    fn integer_forms() {
        assert!(is_valid_integer("5"));
        assert!(is_valid_integer("-12"));
        assert!(is_valid_integer("+3"));
        assert!(is_valid_integer(" 8 "));
        assert!(is_valid_integer("123456789012345678901234567890"));
        assert!(!is_valid_integer("1.0"));
        assert!(!is_valid_integer(""));
        assert!(!is_valid_integer("-"));
        assert!(!is_valid_integer("1e3"));
        assert!(!is_valid_integer("diez"));
    }

    #[test]
    fn integer_parse_bounded_by_i64() {
        assert_eq!(parse_integer("-12"), Some(-12));
        assert_eq!(parse_integer("123456789012345678901234567890"), None);
    }
}
