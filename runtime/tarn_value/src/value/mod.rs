//! The runtime value representation.
//!
//! One closed enum holds everything a Tarn variable, expression result, or
//! array slot can contain. Exactly one payload is live per discriminant.
//! Heap payloads are factory-enforced: `Heap::new` is private to this
//! module, so `Value::Str` can only be built through [`Value::string`].
//!
//! The operator matrix lives in sibling modules (`arith`, `compare`,
//! `assign`, `slot`) as further `impl Value` blocks; this module owns the
//! representation, the constants, and the coercion engine.

mod heap;
mod reference;

use std::fmt;

pub use heap::Heap;
pub use reference::RefSlot;

use crate::array::{HashTable, TableRef};
use crate::numeric::{self, Numeric};
use crate::slot::ArraySlot;
use crate::Kind;

#[cfg(test)]
mod tests;

/// A Tarn runtime value.
///
/// All variants except `Ref` and `Slot` are value types: once obtained they
/// are never mutated in place, and copying is assignment-safe. `Ref` is the
/// only aliasing variant; `Slot` is a lazy `container[key]` l-value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(Heap<String>),
    /// Handle to a live array container. Value semantics across assignment
    /// come from [`Value::assign`] deep-copying, not from the handle.
    Array(TableRef),
    /// Shared mutable slot one or more variables alias.
    Ref(RefSlot),
    /// Lazy `container[key]` l-value; materializes only on write.
    Slot(ArraySlot),
}

impl Value {
    pub const NULL: Value = Value::Null;
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    pub const INT_0: Value = Value::Int(0);
    pub const INT_1: Value = Value::Int(1);

    /// Small-integer constant table, the compiled-code counterpart of
    /// interned small ints. Inline payloads make these plain constants;
    /// they are immutable by construction and freely shareable.
    pub const SMALL_INTS: [Value; 6] = [
        Value::Int(0),
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
        Value::Int(4),
        Value::Int(5),
    ];

    pub const DOUBLE_0: Value = Value::Double(0.0);
    pub const DOUBLE_1: Value = Value::Double(1.0);

    // Factory methods

    #[inline]
    pub fn int(n: i64) -> Value {
        Value::Int(n)
    }

    #[inline]
    pub fn double(d: f64) -> Value {
        Value::Double(d)
    }

    #[inline]
    pub fn bool_of(b: bool) -> Value {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    /// Create a string value. The only way to build `Value::Str`.
    #[inline]
    pub fn string(s: impl Into<String>) -> Value {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an empty array value with a fresh container.
    pub fn array() -> Value {
        Value::Array(TableRef::new(HashTable::new()))
    }

    /// Create an array value around an existing container.
    pub fn array_from(table: HashTable) -> Value {
        Value::Array(TableRef::new(table))
    }

    /// Create a reference slot initially bound to `value`.
    pub fn reference(value: Value) -> Value {
        Value::Ref(RefSlot::new(value))
    }

    // Discriminant

    /// The type discriminant. Lazy slots report the aliasing discriminant:
    /// like references, they are l-value handles, not value types.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::Str(_) => Kind::Str,
            Value::Array(_) => Kind::Array,
            Value::Ref(_) | Value::Slot(_) => Kind::Ref,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // Coercion engine

    /// Numeric value of the operand: integer or double.
    pub fn to_numeric(&self) -> Numeric {
        match self {
            Value::Null => Numeric::Int(0),
            Value::Bool(b) => Numeric::Int(i64::from(*b)),
            Value::Int(n) => Numeric::Int(*n),
            Value::Double(d) => Numeric::Double(*d),
            Value::Str(s) => numeric::parse_prefix(s),
            Value::Array(t) => Numeric::Int(i64::from(!t.borrow().is_empty())),
            Value::Ref(slot) => slot.get().to_numeric(),
            Value::Slot(slot) => slot.read().to_numeric(),
        }
    }

    #[inline]
    pub fn to_long(&self) -> i64 {
        self.to_numeric().to_long()
    }

    #[inline]
    pub fn to_double(&self) -> f64 {
        self.to_numeric().to_double()
    }

    /// Truthiness: 0, 0.0, "", "0", null, and the empty array are false.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Double(d) => *d != 0.0,
            Value::Str(s) => !s.is_empty() && s.as_str() != "0",
            Value::Array(t) => !t.borrow().is_empty(),
            Value::Ref(slot) => slot.get().to_bool(),
            Value::Slot(slot) => slot.read().to_bool(),
        }
    }

    /// Canonical textual representation: `true` is `"1"`, `false` and null
    /// are `""`, numbers render in decimal form.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    pub(crate) fn write_text(&self, out: &mut String) {
        match self {
            Value::Null => {}
            Value::Bool(b) => {
                if *b {
                    out.push('1');
                }
            }
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Double(d) => out.push_str(&d.to_string()),
            Value::Str(s) => out.push_str(s),
            Value::Array(_) => out.push_str("Array"),
            Value::Ref(slot) => slot.get().write_text(out),
            Value::Slot(slot) => slot.read().write_text(out),
        }
    }
}

/// Canonical text, same as [`Value::to_text`]. Concatenation and string
/// coercion both funnel through this.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => f.write_str(if *b { "1" } else { "" }),
            Value::Int(n) => write!(f, "{n}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) => f.write_str("Array"),
            Value::Ref(slot) => write!(f, "{}", slot.get()),
            Value::Slot(slot) => write!(f, "{}", slot.read()),
        }
    }
}

/// Structural identity, used by tests and internal assertions. Arrays and
/// references compare by handle identity, not content; the language's loose
/// equality is [`Value::equal`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => TableRef::same_table(a, b),
            (Value::Ref(a), Value::Ref(b)) => RefSlot::same_slot(a, b),
            (Value::Slot(a), Value::Slot(b)) => a.same_slot(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(v: bool) -> Value {
        Value::bool_of(v)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(v: f64) -> Value {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Value {
        Value::string(v)
    }
}
