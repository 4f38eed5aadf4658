//! Insertion-ordered associative container and key normalization.
//!
//! Tarn arrays map a canonical key — integer or string, nothing else — to a
//! value slot, unique keys, insertion order preserved. The container itself
//! is deliberately dumb: all coercion lives in [`ArrayKey::from_value`], and
//! the lazy read/materialize protocol lives in [`crate::ArraySlot`].

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::Value;


/// Canonical array key: the {integer, string} domain every key-capable
/// value normalizes into.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    /// Normalize a value into the canonical key domain.
    ///
    /// Integers stay integers, booleans map to 0/1, null maps to the empty
    /// string, doubles truncate toward zero. A string that is the canonical
    /// decimal text of some i64 (no leading zero, no `+`, in range)
    /// normalizes to that integer; `"08"`, `"1.0"` and `"+1"` stay string
    /// keys unchanged. References and slots key through their targets.
    pub fn from_value(value: &Value) -> ArrayKey {
        match value {
            Value::Null => ArrayKey::Str(String::new()),
            Value::Bool(b) => ArrayKey::Int(i64::from(*b)),
            Value::Int(n) => ArrayKey::Int(*n),
            Value::Double(d) => ArrayKey::Int(*d as i64),
            Value::Str(s) => ArrayKey::from_str_key(s),
            // Arrays have no key form of their own; they key by their
            // canonical text, like every other non-numeric value.
            Value::Array(_) => ArrayKey::Str(value.to_text()),
            Value::Ref(slot) => ArrayKey::from_value(&slot.get()),
            Value::Slot(slot) => ArrayKey::from_value(&slot.read()),
        }
    }

    /// Normalize a raw string key: canonical i64 text becomes an integer
    /// key, anything else is kept verbatim.
    pub fn from_str_key(s: &str) -> ArrayKey {
        match canonical_int(s) {
            Some(n) => ArrayKey::Int(n),
            None => ArrayKey::Str(s.to_owned()),
        }
    }
}

/// Parse `s` only when it is the canonical decimal rendering of an i64.
fn canonical_int(s: &str) -> Option<i64> {
    let n: i64 = s.parse().ok()?;
    // `parse` accepts "+1" and "007"; those are not canonical and must
    // remain string keys.
    (n.to_string() == s).then_some(n)
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(n) => write!(f, "{n}"),
            ArrayKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArrayKey {
    #[inline]
    fn from(n: i64) -> Self {
        ArrayKey::Int(n)
    }
}

impl From<&str> for ArrayKey {
    #[inline]
    fn from(s: &str) -> Self {
        ArrayKey::from_str_key(s)
    }
}

/// The backing store of one array: ordered key → slot mapping plus the
/// next auto-increment integer key.
#[derive(Debug, Default)]
pub struct HashTable {
    entries: IndexMap<ArrayKey, Value, FxBuildHasher>,
    next_index: i64,
}

impl HashTable {
    pub fn new() -> Self {
        HashTable::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &ArrayKey) -> Option<&Value> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &ArrayKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite. Integer keys advance the auto-increment
    /// counter past themselves.
    pub fn insert(&mut self, key: ArrayKey, value: Value) {
        if let ArrayKey::Int(n) = key {
            if n >= self.next_index {
                self.next_index = n.wrapping_add(1);
            }
        }
        self.entries.insert(key, value);
    }

    /// Append under the next auto-increment integer key, returning the key
    /// that was used.
    pub fn push(&mut self, value: Value) -> ArrayKey {
        let key = ArrayKey::Int(self.next_index);
        self.insert(key.clone(), value);
        key
    }

    /// Remove an entry, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &ArrayKey) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Slot for `key`, created as null if absent. The materialization half
    /// of the lazy l-value protocol; bare reads go through [`Self::get`].
    pub fn entry_or_null(&mut self, key: ArrayKey) -> &mut Value {
        if let ArrayKey::Int(n) = key {
            if n >= self.next_index && !self.entries.contains_key(&key) {
                self.next_index = n.wrapping_add(1);
            }
        }
        self.entries.entry(key).or_insert(Value::NULL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArrayKey, &Value)> {
        self.entries.iter()
    }

    /// Independent copy with every slot value-copied (nested arrays copied
    /// recursively, references still aliasing their original slots).
    pub fn deep_copy(&self) -> HashTable {
        let mut entries = IndexMap::with_capacity_and_hasher(self.entries.len(), FxBuildHasher);
        for (key, value) in &self.entries {
            entries.insert(key.clone(), value.value_copy());
        }
        HashTable {
            entries,
            next_index: self.next_index,
        }
    }
}

/// Shared handle to a live array container.
///
/// `Rc`-based: an array and every slot pointing into it belong to a single
/// execution context. Value semantics across assignment are provided by
/// [`Value::assign`] deep-copying, not by the handle.
#[derive(Clone)]
pub struct TableRef(Rc<RefCell<HashTable>>);

impl TableRef {
    pub fn new(table: HashTable) -> Self {
        TableRef(Rc::new(RefCell::new(table)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, HashTable> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, HashTable> {
        self.0.borrow_mut()
    }

    /// Whether two handles point at the same container.
    #[inline]
    pub fn same_table(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Fresh handle to a deep copy of the container.
    pub fn deep_copy(&self) -> TableRef {
        TableRef::new(self.0.borrow().deep_copy())
    }
}

impl fmt::Debug for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableRef(len={})", self.0.borrow().len())
    }
}
