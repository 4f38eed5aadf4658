//! Assignment, aliasing, and in-place mutation.
//!
//! The copy-vs-alias policy follows the discriminant: every value type
//! assigns by independent copy (deep for arrays), and only `Ref` — plus the
//! write-through half of `Slot` — ever mutates shared state. `assign_ref`,
//! `concat_assign`, and `unset` are deliberately no-ops on value types so
//! aliasing cannot leak into value-type code paths.

use tracing::trace;

use crate::{Scalar, Value};

impl Value {
    /// An independent copy of this value's content: arrays copy deeply,
    /// references and slots resolve to a copy of their target.
    pub fn value_copy(&self) -> Value {
        match self {
            Value::Array(table) => Value::Array(table.deep_copy()),
            Value::Ref(slot) => slot.get().value_copy(),
            Value::Slot(slot) => slot.read().value_copy(),
            other => other.clone(),
        }
    }

    /// Assignment.
    ///
    /// For value types this produces the value to store: a new, independent
    /// copy of `source`'s content. For a reference it writes through the
    /// aliased slot in place and returns the same reference; for a lazy
    /// array slot it materializes the entry and returns the stored value.
    pub fn assign(&self, source: &Value) -> Value {
        match self {
            Value::Ref(slot) => {
                slot.set(source.value_copy());
                self.clone()
            }
            Value::Slot(slot) => {
                let stored = source.value_copy();
                slot.write(stored.clone());
                stored
            }
            _ => source.value_copy(),
        }
    }

    /// Assignment from a statically typed scalar source.
    pub fn assign_scalar<'a>(&self, source: impl Into<Scalar<'a>>) -> Value {
        let boxed = source.into().boxed();
        match self {
            Value::Ref(slot) => {
                slot.set(boxed);
                self.clone()
            }
            Value::Slot(slot) => {
                slot.write(boxed.clone());
                boxed
            }
            _ => boxed,
        }
    }

    /// Rebind this reference to alias the same slot as `source`. No-op
    /// unless both sides are references — value types do not alias.
    pub fn assign_ref(&mut self, source: &Value) {
        if let (Value::Ref(dst), Value::Ref(src)) = (&mut *self, source) {
            trace!("rebinding reference slot");
            *dst = src.clone();
        }
    }

    /// In-place textual append, defined for the mutable cases only: a
    /// reference cell or an array-slot write-through. Plain strings are
    /// read-only once created; appending to one is a no-op here and a fresh
    /// [`Value::concat`] at the call site instead.
    pub fn concat_assign(&self, rhs: &Value) {
        match self {
            Value::Ref(slot) => slot.set(Value::string(slot.get().concat(rhs))),
            Value::Slot(slot) => slot.write(Value::string(slot.materialize().concat(rhs))),
            _ => {}
        }
    }

    pub fn concat_assign_scalar<'a>(&self, rhs: impl Into<Scalar<'a>>) {
        let rhs = rhs.into();
        match self {
            Value::Ref(slot) => slot.set(Value::string(slot.get().concat_scalar(rhs))),
            Value::Slot(slot) => {
                slot.write(Value::string(slot.materialize().concat_scalar(rhs)));
            }
            _ => {}
        }
    }

    /// Clear a reference binding back to null, or drop an array entry when
    /// invoked through a slot. No-op for value types.
    pub fn unset(&self) {
        match self {
            Value::Ref(slot) => slot.clear(),
            Value::Slot(slot) => {
                slot.remove();
            }
            _ => {}
        }
    }

    /// Whether this value can never change underneath its holder. False
    /// only for the aliasing handles.
    pub fn is_immutable(&self) -> bool {
        self.kind().is_value_type()
    }

    /// An immutable snapshot: value types return themselves unchanged
    /// (idempotent); a reference or slot snapshots its current target
    /// without affecting the live original.
    pub fn to_immutable(&self) -> Value {
        match self {
            Value::Ref(_) | Value::Slot(_) => self.value_copy(),
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn assign_copies_scalars() {
        let target = Value::NULL;
        assert_eq!(target.assign(&Value::TRUE), Value::TRUE);
        assert_eq!(target.assign_scalar(42_i64), Value::Int(42));
        assert_eq!(target.assign_scalar("hi"), Value::string("hi"));
    }

    #[test]
    fn assign_deep_copies_arrays() {
        let src = Value::array();
        src.index_scalar("k").assign(&Value::Int(1));
        let copy = Value::NULL.assign(&src);
        // Writing to the copy must not show through the source.
        copy.index_scalar("k").assign(&Value::Int(2));
        assert_eq!(src.index_scalar("k").to_long(), 1);
        assert_eq!(copy.index_scalar("k").to_long(), 2);
    }

    #[test]
    fn nested_arrays_copy_deeply() {
        let inner = Value::array();
        inner.index_scalar(0_i64).assign(&Value::Int(1));
        let outer = Value::array();
        outer.index_scalar("in").assign(&inner);
        let copy = Value::NULL.assign(&outer);
        copy.index_scalar("in")
            .index_scalar(0_i64)
            .assign(&Value::Int(9));
        assert_eq!(inner.index_scalar(0_i64).to_long(), 1);
    }

    #[test]
    fn reference_assign_mutates_in_place() {
        let r = Value::reference(Value::Int(1));
        let alias = r.clone();
        let out = r.assign(&Value::Int(7));
        // The same reference comes back and the alias observes the write.
        assert_eq!(out, r);
        assert_eq!(alias.to_long(), 7);
    }

    #[test]
    fn assign_ref_rebinds_to_shared_slot() {
        let a = Value::reference(Value::Int(1));
        let mut b = Value::reference(Value::Int(2));
        b.assign_ref(&a);
        a.assign(&Value::Int(5));
        assert_eq!(b.to_long(), 5);
    }

    #[test]
    fn assign_ref_is_noop_for_value_types() {
        let mut v = Value::Int(1);
        v.assign_ref(&Value::reference(Value::Int(9)));
        assert_eq!(v, Value::Int(1));
    }

    #[test]
    fn concat_assign_through_reference() {
        let r = Value::reference(Value::string("a"));
        r.concat_assign_scalar("b");
        r.concat_assign(&Value::Int(3));
        assert_eq!(r.to_text(), "ab3");
    }

    #[test]
    fn concat_assign_noop_for_plain_strings() {
        let s = Value::string("a");
        s.concat_assign_scalar("b");
        assert_eq!(s.to_text(), "a");
    }

    #[test]
    fn concat_assign_through_slot_materializes() {
        let arr = Value::array();
        let slot = arr.index_scalar("log");
        slot.concat_assign_scalar("x");
        assert_eq!(arr.index_scalar("log").to_text(), "x");
    }

    #[test]
    fn unset_clears_reference_binding() {
        let r = Value::reference(Value::Int(3));
        r.unset();
        assert!(r.to_immutable().is_null());
    }

    #[test]
    fn unset_through_slot_removes_entry() {
        let arr = Value::array();
        arr.index_scalar("k").assign(&Value::Int(1));
        arr.index_scalar("k").unset();
        match &arr {
            Value::Array(t) => assert_eq!(t.borrow().len(), 0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn unset_is_noop_for_value_types() {
        let v = Value::Int(3);
        v.unset();
        assert_eq!(v, Value::Int(3));
    }

    #[test]
    fn immutability_flags() {
        assert!(Value::Int(1).is_immutable());
        assert!(Value::array().is_immutable());
        assert!(!Value::reference(Value::Int(1)).is_immutable());
        let arr = Value::array();
        assert!(!arr.index_scalar("k").is_immutable());
    }

    #[test]
    fn to_immutable_is_idempotent() {
        for x in [
            Value::Int(3),
            Value::string("s"),
            Value::array(),
            Value::reference(Value::Int(1)),
        ] {
            let snapshot = x.to_immutable();
            assert!(snapshot.is_immutable());
            assert_eq!(snapshot.to_immutable(), snapshot);
        }
    }

    #[test]
    fn reference_snapshot_does_not_track_later_writes() {
        let r = Value::reference(Value::Int(1));
        let snapshot = r.to_immutable();
        r.assign(&Value::Int(2));
        assert_eq!(snapshot, Value::Int(1));
    }
}
