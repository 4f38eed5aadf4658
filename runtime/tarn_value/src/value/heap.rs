//! Factory-enforced heap allocation for value payloads.
//!
//! `Heap<T>` has a constructor private to the value module, so external
//! code cannot wrap an arbitrary allocation in a `Value::Str`: all heap
//! payloads go through `Value::` factory methods. Cloning shares the
//! allocation; the payload is immutable for the life of the allocation,
//! which is what makes string values assignment-safe by construction.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared immutable heap payload.
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    /// Module-private: construction goes through `Value` factories.
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Whether two handles share one allocation. Test hook for the
    /// copy-on-assign guarantees; never affects semantics.
    #[inline]
    pub fn shares_allocation(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: fmt::Display> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
