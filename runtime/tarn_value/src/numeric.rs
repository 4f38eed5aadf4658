//! Leading-numeric-prefix grammar.
//!
//! Every arithmetic operator that receives a string operand funnels through
//! [`parse_prefix`], so the grammar here is a contract of its own: scan past
//! leading ASCII whitespace, accept an optional sign, consume a run of
//! decimal digits; a following `.` consumes further digits (the result
//! becomes a double), a following `e`/`E` consumes a signed exponent with at
//! least one digit (double; rolled back otherwise). If no digits were
//! consumed at all, the value is integer 0. There are no hexadecimal or
//! octal prefixes in this domain.

use std::fmt;

use crate::Value;

/// Result of coercing an operand to a number: integer or double, nothing
/// else. Promotion rules live in the operators; this type only carries the
/// payload distinction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Numeric {
    Int(i64),
    Double(f64),
}

impl Numeric {
    /// Truncate toward zero. Saturates at the i64 range, NaN becomes 0.
    #[inline]
    pub fn to_long(self) -> i64 {
        match self {
            Numeric::Int(n) => n,
            Numeric::Double(d) => d as i64,
        }
    }

    #[inline]
    pub fn to_double(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Double(d) => d,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Numeric::Int(n) => n == 0,
            Numeric::Double(d) => d == 0.0,
        }
    }

    /// Arithmetic negation preserving int/double-ness. Integers wrap.
    #[inline]
    pub fn negative(self) -> Numeric {
        match self {
            Numeric::Int(n) => Numeric::Int(n.wrapping_neg()),
            Numeric::Double(d) => Numeric::Double(-d),
        }
    }
}

impl From<Numeric> for Value {
    #[inline]
    fn from(n: Numeric) -> Value {
        match n {
            Numeric::Int(v) => Value::Int(v),
            Numeric::Double(v) => Value::Double(v),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(n) => write!(f, "{n}"),
            Numeric::Double(d) => write!(f, "{d}"),
        }
    }
}

/// Numeric value of the leading numeric prefix of `s`.
///
/// Never fails: a string with no numeric prefix coerces to integer 0.
#[inline]
pub fn parse_prefix(s: &str) -> Numeric {
    scan(s).0
}

/// `Some(n)` when the entire string is a numeric literal (leading ASCII
/// whitespace allowed, nothing after the number). Backs loose string/string
/// comparison.
pub fn parse_full(s: &str) -> Option<Numeric> {
    let (n, consumed) = scan(s);
    (consumed > 0 && consumed == s.len()).then_some(n)
}

/// Scan the numeric prefix, returning the value and the number of bytes
/// consumed (0 when no digits were found).
fn scan(s: &str) -> (Numeric, usize) {
    let b = s.as_bytes();
    let len = b.len();

    let mut pos = 0;
    while pos < len && b[pos].is_ascii_whitespace() {
        pos += 1;
    }
    let start = pos;
    if pos < len && (b[pos] == b'+' || b[pos] == b'-') {
        pos += 1;
    }

    let int_start = pos;
    while pos < len && b[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut is_double = false;
    let mut frac_digits = 0;
    if pos < len && b[pos] == b'.' {
        let frac_start = pos + 1;
        let mut p = frac_start;
        while p < len && b[p].is_ascii_digit() {
            p += 1;
        }
        frac_digits = p - frac_start;
        // "1." and ".5" are numeric; a bare "." is not.
        if int_digits > 0 || frac_digits > 0 {
            is_double = true;
            pos = p;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return (Numeric::Int(0), 0);
    }

    if pos < len && (b[pos] == b'e' || b[pos] == b'E') {
        let mut p = pos + 1;
        if p < len && (b[p] == b'+' || b[p] == b'-') {
            p += 1;
        }
        let exp_start = p;
        while p < len && b[p].is_ascii_digit() {
            p += 1;
        }
        // "1e" is the integer 1 with a trailing letter, not an exponent.
        if p > exp_start {
            is_double = true;
            pos = p;
        }
    }

    let text = &s[start..pos];
    if is_double {
        (Numeric::Double(text.parse().unwrap_or(0.0)), pos)
    } else {
        match text.parse::<i64>() {
            Ok(v) => (Numeric::Int(v), pos),
            // Digit run out of i64 range: the value degrades to a double.
            Err(_) => (Numeric::Double(text.parse().unwrap_or(0.0)), pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn plain_integers() {
        assert_eq!(parse_prefix("10"), Numeric::Int(10));
        assert_eq!(parse_prefix("  -42"), Numeric::Int(-42));
        assert_eq!(parse_prefix("+1"), Numeric::Int(1));
        assert_eq!(parse_prefix("08"), Numeric::Int(8));
    }

    #[test]
    fn doubles() {
        assert_eq!(parse_prefix("10.5abc"), Numeric::Double(10.5));
        assert_eq!(parse_prefix("1e2"), Numeric::Double(100.0));
        assert_eq!(parse_prefix("1E2"), Numeric::Double(100.0));
        assert_eq!(parse_prefix("  -12.5e2abc"), Numeric::Double(-1250.0));
        assert_eq!(parse_prefix("1."), Numeric::Double(1.0));
        assert_eq!(parse_prefix(".5"), Numeric::Double(0.5));
        assert_eq!(parse_prefix("2.5e-1"), Numeric::Double(0.25));
    }

    #[test]
    fn non_numeric_prefix_is_zero() {
        assert_eq!(parse_prefix("abc"), Numeric::Int(0));
        assert_eq!(parse_prefix(""), Numeric::Int(0));
        assert_eq!(parse_prefix("-"), Numeric::Int(0));
        assert_eq!(parse_prefix("."), Numeric::Int(0));
        assert_eq!(parse_prefix("e5"), Numeric::Int(0));
        assert_eq!(parse_prefix("0x1A"), Numeric::Int(0));
    }

    #[test]
    fn exponent_rollback() {
        // A dangling exponent marker is not part of the number.
        assert_eq!(parse_prefix("1e"), Numeric::Int(1));
        assert_eq!(parse_prefix("1e+"), Numeric::Int(1));
        assert_eq!(parse_prefix("1.5e-q"), Numeric::Double(1.5));
    }

    #[test]
    fn overflow_degrades_to_double() {
        assert_eq!(
            parse_prefix("9223372036854775808"),
            Numeric::Double(9_223_372_036_854_775_808.0)
        );
        assert_eq!(parse_prefix("9223372036854775807"), Numeric::Int(i64::MAX));
    }

    #[test]
    fn full_parse_rejects_suffixes() {
        assert_eq!(parse_full("10"), Some(Numeric::Int(10)));
        assert_eq!(parse_full(" 10"), Some(Numeric::Int(10)));
        assert_eq!(parse_full("1e1"), Some(Numeric::Double(10.0)));
        assert_eq!(parse_full("10abc"), None);
        assert_eq!(parse_full("10 "), None);
        assert_eq!(parse_full(""), None);
        assert_eq!(parse_full("abc"), None);
    }

    #[test]
    fn truncation_toward_zero() {
        assert_eq!(Numeric::Double(5.9).to_long(), 5);
        assert_eq!(Numeric::Double(-5.9).to_long(), -5);
        assert_eq!(Numeric::Double(f64::NAN).to_long(), 0);
    }

    proptest! {
        #[test]
        fn integer_text_round_trips(n: i64) {
            prop_assert_eq!(parse_prefix(&n.to_string()), Numeric::Int(n));
            prop_assert_eq!(parse_full(&n.to_string()), Some(Numeric::Int(n)));
        }

        #[test]
        fn prefix_ignores_suffix(n: i64, suffix in "[ a-z#@!]*") {
            let text = format!("  {n}x{suffix}");
            prop_assert_eq!(parse_prefix(&text), Numeric::Int(n));
        }
    }
}
