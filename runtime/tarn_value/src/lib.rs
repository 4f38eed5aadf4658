//! Tarn Value - runtime value representation for the Tarn interpreter.
//!
//! This crate provides the single polymorphic [`Value`] type every Tarn
//! variable, expression result, and array slot holds, together with the
//! loose-typing coercion matrix the language semantics require.
//!
//! # Architecture
//!
//! The value domain is a closed enum matched exhaustively. The type set is
//! fixed (not user-extensible), so pattern matching is preferred over trait
//! objects: dispatch is direct and the compiler enforces that every operator
//! covers every variant.
//!
//! - All operators are total. Ill-typed operands coerce, they never fail;
//!   division and modulo by a zero-valued divisor yield `Value::FALSE`.
//! - All variants except [`Value::Ref`] and [`Value::Slot`] are value types:
//!   once created they are never mutated in place, so the `const` singletons
//!   (`Value::NULL`, `Value::TRUE`, the small-int table) are shareable by
//!   construction.
//! - Aliasing exists in exactly one place: `Value::Ref` wraps a shared
//!   mutable cell. `Value::Slot` is the lazy `container[key]` l-value that
//!   materializes an entry only on write.
//!
//! # Scalar fast path
//!
//! Every operator also accepts a raw native scalar right operand via
//! [`Scalar`], so compiled call sites that know an operand's static type
//! never box it into a `Value` first. Overload selection happens at compile
//! time. Arithmetic, equality, and the `*_right` mirrors are bit-for-bit
//! identical to the boxed forms; ordering scalar paths always coerce the
//! scalar numerically, and `greater` with a string scalar keeps its
//! historical routing through `smaller` (see `compare`).

mod arith;
mod array;
mod assign;
mod compare;
mod kind;
mod numeric;
mod scalar;
mod slot;
mod value;

pub use array::{ArrayKey, HashTable, TableRef};
pub use kind::{InteropError, Kind, NativeType};
pub use numeric::Numeric;
pub use scalar::Scalar;
pub use slot::ArraySlot;
pub use value::{Heap, RefSlot, Value};
