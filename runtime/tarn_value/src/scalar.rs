//! Raw native scalar operands.
//!
//! Compiled call sites often know an operand's static type: `$x + 1` never
//! needs the literal boxed into a [`Value`]. Every operator therefore comes
//! in a `*_scalar` form taking `impl Into<Scalar>`, which monomorphizes to
//! the right branch per call site. Results are bit-for-bit identical to
//! boxing first.

use crate::numeric::{self, Numeric};
use crate::Value;

/// An unboxed right (or mirrored left) operand.
#[derive(Copy, Clone, Debug)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(&'a str),
}

impl Scalar<'_> {
    #[inline]
    pub fn to_numeric(self) -> Numeric {
        match self {
            Scalar::Bool(b) => Numeric::Int(i64::from(b)),
            Scalar::Int(n) => Numeric::Int(n),
            Scalar::Double(d) => Numeric::Double(d),
            Scalar::Str(s) => numeric::parse_prefix(s),
        }
    }

    #[inline]
    pub fn to_long(self) -> i64 {
        self.to_numeric().to_long()
    }

    #[inline]
    pub fn to_double(self) -> f64 {
        self.to_numeric().to_double()
    }

    #[inline]
    pub fn to_bool(self) -> bool {
        match self {
            Scalar::Bool(b) => b,
            Scalar::Int(n) => n != 0,
            Scalar::Double(d) => d != 0.0,
            Scalar::Str(s) => !s.is_empty() && s != "0",
        }
    }

    /// Canonical text of the scalar (`true` is `"1"`, `false` is `""`).
    pub fn write_text(self, out: &mut String) {
        match self {
            Scalar::Bool(b) => {
                if b {
                    out.push('1');
                }
            }
            Scalar::Int(n) => out.push_str(&n.to_string()),
            Scalar::Double(d) => out.push_str(&d.to_string()),
            Scalar::Str(s) => out.push_str(s),
        }
    }

    /// Box the scalar into a [`Value`].
    pub fn boxed(self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Int(n) => Value::Int(n),
            Scalar::Double(d) => Value::Double(d),
            Scalar::Str(s) => Value::string(s),
        }
    }
}

impl From<bool> for Scalar<'_> {
    #[inline]
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar<'_> {
    #[inline]
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar<'_> {
    #[inline]
    fn from(v: f64) -> Self {
        Scalar::Double(v)
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        Scalar::Str(v)
    }
}

impl<'a> From<&'a String> for Scalar<'a> {
    #[inline]
    fn from(v: &'a String) -> Self {
        Scalar::Str(v)
    }
}
