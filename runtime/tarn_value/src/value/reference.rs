//! The shared mutable cell behind `Value::Ref`.
//!
//! Aliasing exists in exactly one place in the value domain: two variables
//! bound by reference hold clones of the same `RefSlot`, and a write
//! through either is observable through the other. The cell is `Rc`-based
//! on purpose — reference slots are confined to the execution context that
//! created them and must not cross threads.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::Value;

/// Handle to a shared mutable value slot.
#[derive(Clone)]
pub struct RefSlot(Rc<RefCell<Value>>);

impl RefSlot {
    #[inline]
    pub fn new(value: Value) -> Self {
        RefSlot(Rc::new(RefCell::new(value)))
    }

    /// Current content of the slot.
    #[inline]
    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    /// Replace the slot content in place.
    #[inline]
    pub fn set(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    /// Clear the binding back to null.
    #[inline]
    pub fn clear(&self) {
        *self.0.borrow_mut() = Value::NULL;
    }

    /// Whether two handles alias the same slot.
    #[inline]
    pub fn same_slot(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for RefSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefSlot({:?})", &*self.0.borrow())
    }
}
