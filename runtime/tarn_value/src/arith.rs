//! Arithmetic and concatenation operators.
//!
//! Dispatch is direct pattern matching on the closed value enum; the type
//! set is fixed, so exhaustive matches beat trait objects and the compiler
//! proves every variant is covered. Every operator is total: ill-typed
//! operands coerce, a zero-valued divisor yields `Value::FALSE`.
//!
//! Promotion: int⊗int stays int with 64-bit wraparound; any double operand
//! promotes the result to double. Each operator has a `*_scalar` form for
//! statically typed right operands and, where the operation is not
//! commutative, a `*_right` mirror for statically typed *left* operands.
//! The mirrors compute exactly what boxing the scalar first would compute.

use crate::numeric::Numeric;
use crate::{Scalar, Value};

/// Numeric promotion: both ints stay int (wrapping), otherwise double.
fn promote(a: Numeric, b: Numeric, int_op: fn(i64, i64) -> i64, dbl_op: fn(f64, f64) -> f64) -> Value {
    match (a, b) {
        (Numeric::Int(x), Numeric::Int(y)) => Value::Int(int_op(x, y)),
        _ => Value::Double(dbl_op(a.to_double(), b.to_double())),
    }
}

impl Value {
    // Addition

    pub fn plus(&self, rhs: &Value) -> Value {
        self.plus_numeric(rhs.to_numeric())
    }

    pub fn plus_scalar<'a>(&self, rhs: impl Into<Scalar<'a>>) -> Value {
        self.plus_numeric(rhs.into().to_numeric())
    }

    fn plus_numeric(&self, rhs: Numeric) -> Value {
        promote(self.to_numeric(), rhs, i64::wrapping_add, |x, y| x + y)
    }

    // Subtraction

    pub fn minus(&self, rhs: &Value) -> Value {
        self.minus_numeric(rhs.to_numeric())
    }

    pub fn minus_scalar<'a>(&self, rhs: impl Into<Scalar<'a>>) -> Value {
        self.minus_numeric(rhs.into().to_numeric())
    }

    fn minus_numeric(&self, rhs: Numeric) -> Value {
        promote(self.to_numeric(), rhs, i64::wrapping_sub, |x, y| x - y)
    }

    /// `lhs - self` for a statically typed left operand; identical to
    /// boxing `lhs` and subtracting `self` from it.
    pub fn minus_right<'a>(&self, lhs: impl Into<Scalar<'a>>) -> Value {
        promote(
            lhs.into().to_numeric(),
            self.to_numeric(),
            i64::wrapping_sub,
            |x, y| x - y,
        )
    }

    // Multiplication

    pub fn mul(&self, rhs: &Value) -> Value {
        self.mul_numeric(rhs.to_numeric())
    }

    pub fn mul_scalar<'a>(&self, rhs: impl Into<Scalar<'a>>) -> Value {
        self.mul_numeric(rhs.into().to_numeric())
    }

    fn mul_numeric(&self, rhs: Numeric) -> Value {
        promote(self.to_numeric(), rhs, i64::wrapping_mul, |x, y| x * y)
    }

    // Division

    /// Division. A divisor coercing to zero is not a failure in this
    /// domain: the result is the sentinel `Value::FALSE`.
    pub fn div(&self, rhs: &Value) -> Value {
        match rhs {
            Value::Ref(slot) => self.div(&slot.get()),
            Value::Slot(slot) => self.div(&slot.read()),
            Value::Bool(b) => self.div_by_bool(*b),
            _ => self.div_numeric(rhs.to_numeric()),
        }
    }

    pub fn div_scalar<'a>(&self, rhs: impl Into<Scalar<'a>>) -> Value {
        match rhs.into() {
            Scalar::Bool(b) => self.div_by_bool(b),
            other => self.div_numeric(other.to_numeric()),
        }
    }

    /// A `true` divisor keeps the dividend integral; `false` is the zero
    /// sentinel case.
    fn div_by_bool(&self, divisor: bool) -> Value {
        if divisor {
            Value::Int(self.to_long())
        } else {
            Value::FALSE
        }
    }

    fn div_numeric(&self, divisor: Numeric) -> Value {
        if divisor.is_zero() {
            return Value::FALSE;
        }
        // A false dividend short-circuits to integer zero.
        if matches!(self, Value::Bool(false)) {
            return Value::INT_0;
        }
        Value::Double(self.to_double() / divisor.to_double())
    }

    /// `lhs / self` for a statically typed left operand, `self` being the
    /// divisor. Identical to the boxed form, including the zero sentinel.
    pub fn div_right<'a>(&self, lhs: impl Into<Scalar<'a>>) -> Value {
        let lhs = lhs.into();
        match self {
            Value::Ref(slot) => slot.get().div_right(lhs),
            Value::Slot(slot) => slot.read().div_right(lhs),
            Value::Bool(b) => {
                if *b {
                    Value::Int(lhs.to_long())
                } else {
                    Value::FALSE
                }
            }
            _ => {
                let divisor = self.to_numeric();
                if divisor.is_zero() {
                    return Value::FALSE;
                }
                if matches!(lhs, Scalar::Bool(false)) {
                    return Value::INT_0;
                }
                Value::Double(lhs.to_double() / divisor.to_double())
            }
        }
    }

    // Modulo

    /// Integer remainder. The divisor truncates toward zero first; a zero
    /// divisor yields the sentinel `Value::FALSE`.
    pub fn modulo(&self, rhs: &Value) -> Value {
        self.modulo_by(rhs.to_numeric())
    }

    pub fn modulo_scalar<'a>(&self, rhs: impl Into<Scalar<'a>>) -> Value {
        self.modulo_by(rhs.into().to_numeric())
    }

    fn modulo_by(&self, divisor: Numeric) -> Value {
        let divisor = divisor.to_long();
        if divisor == 0 {
            return Value::FALSE;
        }
        Value::Int(self.to_long().wrapping_rem(divisor))
    }

    /// `lhs % self` for a statically typed left operand, `self` being the
    /// divisor. Identical to the boxed form, including the zero sentinel.
    pub fn modulo_right<'a>(&self, lhs: impl Into<Scalar<'a>>) -> Value {
        let divisor = self.to_long();
        if divisor == 0 {
            return Value::FALSE;
        }
        Value::Int(lhs.into().to_long().wrapping_rem(divisor))
    }

    // Negation, increment, decrement

    /// Arithmetic negation preserving int/double-ness. Strings negate
    /// their numeric prefix.
    pub fn negative(&self) -> Value {
        self.to_numeric().negative().into()
    }

    /// `self + step`.
    pub fn inc(&self, step: &Value) -> Value {
        self.plus_numeric(step.to_numeric())
    }

    pub fn inc_scalar<'a>(&self, step: impl Into<Scalar<'a>>) -> Value {
        self.plus_numeric(step.into().to_numeric())
    }

    /// `self - step`, expressed as increment by the negated step.
    pub fn dec(&self, step: &Value) -> Value {
        self.plus_numeric(step.to_numeric().negative())
    }

    pub fn dec_scalar<'a>(&self, step: impl Into<Scalar<'a>>) -> Value {
        self.plus_numeric(step.into().to_numeric().negative())
    }

    // Concatenation

    /// Textual concatenation. Returns the host string; the caller decides
    /// whether to box it back into a value.
    pub fn concat(&self, rhs: &Value) -> String {
        let mut out = self.to_text();
        rhs.write_text(&mut out);
        out
    }

    pub fn concat_scalar<'a>(&self, rhs: impl Into<Scalar<'a>>) -> String {
        let mut out = self.to_text();
        rhs.into().write_text(&mut out);
        out
    }

    /// `lhs . self` for a statically typed left operand.
    pub fn concat_right<'a>(&self, lhs: impl Into<Scalar<'a>>) -> String {
        let mut out = String::new();
        lhs.into().write_text(&mut out);
        self.write_text(&mut out);
        out
    }
}
