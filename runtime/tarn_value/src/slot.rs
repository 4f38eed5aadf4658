//! Lazy array l-values.
//!
//! `container[key]` as an expression target is a two-phase handle: `read`
//! has no side effect and must not create the key, `materialize`/`write`
//! create the entry if absent (auto-vivification). The two phases are never
//! collapsed — a bare read through a missing key leaves the container
//! untouched.

use tracing::trace;

use crate::array::{ArrayKey, TableRef};
use crate::{Scalar, Value};

/// L-value handle for one `container[key]` target.
#[derive(Clone, Debug)]
pub struct ArraySlot {
    table: TableRef,
    key: ArrayKey,
}

impl ArraySlot {
    pub fn new(table: TableRef, key: ArrayKey) -> Self {
        ArraySlot { table, key }
    }

    #[inline]
    pub fn key(&self) -> &ArrayKey {
        &self.key
    }

    /// Non-materializing read: the stored value, or null when the entry
    /// does not exist. Never inserts.
    pub fn read(&self) -> Value {
        self.table
            .borrow()
            .get(&self.key)
            .cloned()
            .unwrap_or(Value::NULL)
    }

    /// Create-if-absent read: the stored value after ensuring the entry
    /// exists (a fresh entry starts as null).
    pub fn materialize(&self) -> Value {
        let mut table = self.table.borrow_mut();
        if !table.contains_key(&self.key) {
            trace!(key = %self.key, "materializing array slot");
        }
        table.entry_or_null(self.key.clone()).clone()
    }

    /// Write-through: store `value` under the key, creating the entry if
    /// absent.
    pub fn write(&self, value: Value) {
        let mut table = self.table.borrow_mut();
        if !table.contains_key(&self.key) {
            trace!(key = %self.key, "materializing array slot");
        }
        *table.entry_or_null(self.key.clone()) = value;
    }

    /// Remove the entry, if present.
    pub fn remove(&self) -> Option<Value> {
        self.table.borrow_mut().remove(&self.key)
    }

    /// Whether two handles target the same container entry.
    pub fn same_slot(&self, other: &ArraySlot) -> bool {
        TableRef::same_table(&self.table, &other.table) && self.key == other.key
    }
}

impl From<Scalar<'_>> for ArrayKey {
    fn from(s: Scalar<'_>) -> ArrayKey {
        match s {
            Scalar::Bool(b) => ArrayKey::Int(i64::from(b)),
            Scalar::Int(n) => ArrayKey::Int(n),
            Scalar::Double(d) => ArrayKey::Int(d as i64),
            Scalar::Str(text) => ArrayKey::from_str_key(text),
        }
    }
}

impl Value {
    /// The l-value `self[key]`. Does not touch the backing container.
    ///
    /// Only arrays (directly, or behind a reference or slot) have slots to
    /// offer; indexing any other value is a read miss yielding null.
    pub fn index(&self, key: &Value) -> Value {
        match self {
            Value::Array(table) => Value::Slot(ArraySlot::new(
                table.clone(),
                ArrayKey::from_value(key),
            )),
            Value::Ref(slot) => slot.get().index(key),
            Value::Slot(slot) => slot.read().index(key),
            _ => Value::NULL,
        }
    }

    /// `self[key]` for a statically typed key, skipping the boxed form.
    pub fn index_scalar<'a>(&self, key: impl Into<Scalar<'a>>) -> Value {
        let key = key.into();
        match self {
            Value::Array(table) => Value::Slot(ArraySlot::new(table.clone(), key.into())),
            Value::Ref(slot) => slot.get().index_scalar(key),
            Value::Slot(slot) => slot.read().index_scalar(key),
            _ => Value::NULL,
        }
    }

    /// Resolve a lazy slot into the real stored value, creating the entry
    /// if absent. Everything that is not a slot passes through unchanged.
    pub fn to_array_value(value: Value) -> Value {
        match value {
            Value::Slot(slot) => slot.materialize(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn array_with(entries: &[(&str, i64)]) -> Value {
        let arr = Value::array();
        for (k, v) in entries {
            arr.index_scalar(*k).assign(&Value::Int(*v));
        }
        arr
    }

    fn len_of(value: &Value) -> usize {
        match value {
            Value::Array(t) => t.borrow().len(),
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn bare_read_does_not_create_keys() {
        let arr = array_with(&[("a", 1)]);
        let slot = arr.index_scalar("missing");
        assert_eq!(slot.kind(), crate::Kind::Ref);
        assert_eq!(slot.to_long(), 0);
        assert!(!slot.to_bool());
        assert_eq!(len_of(&arr), 1);
    }

    #[test]
    fn write_creates_exactly_one_entry() {
        let arr = array_with(&[]);
        let slot = arr.index_scalar("k");
        assert_eq!(len_of(&arr), 0);
        slot.assign(&Value::Int(7));
        assert_eq!(len_of(&arr), 1);
        assert_eq!(arr.index_scalar("k").to_long(), 7);
    }

    #[test]
    fn materialize_creates_null_entry() {
        let arr = array_with(&[]);
        let slot = arr.index_scalar(3_i64);
        let stored = Value::to_array_value(slot);
        assert!(stored.is_null());
        assert_eq!(len_of(&arr), 1);
    }

    #[test]
    fn to_array_value_passes_values_through() {
        assert_eq!(Value::to_array_value(Value::Int(5)), Value::Int(5));
        assert_eq!(Value::to_array_value(Value::NULL), Value::NULL);
    }

    #[test]
    fn indexing_non_arrays_is_a_read_miss() {
        assert!(Value::Int(5).index_scalar(0_i64).is_null());
        assert!(Value::string("x").index_scalar(0_i64).is_null());
        assert!(Value::NULL.index_scalar("k").is_null());
    }

    #[test]
    fn slot_behind_reference_reaches_the_array() {
        let arr = array_with(&[]);
        let alias = Value::reference(arr.clone());
        alias.index_scalar("k").assign(&Value::Int(1));
        assert_eq!(arr.index_scalar("k").to_long(), 1);
    }

    #[test]
    fn slot_keys_normalize() {
        let arr = array_with(&[]);
        arr.index_scalar("8").assign(&Value::Int(1));
        // "8" and 8 are the same canonical key.
        assert_eq!(arr.index_scalar(8_i64).to_long(), 1);
        assert_eq!(len_of(&arr), 1);
    }
}
