//! Dependency-keyed memoization with tagged results.
//!
//! DESIGN
//! ======
//! [`TaggedMemo`] recomputes only when its dependency value changes; the
//! cached allocation is handed back untouched otherwise. Results come wrapped
//! in [`Tagged`], whose boolean marker rides alongside the value without ever
//! showing up in equality, serialization, or debug output. Downstream
//! introspection can ask for it; structural comparison cannot see it.

#[cfg(test)]
#[path = "memo_test.rs"]
mod memo_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use serde::{Serialize, Serializer};

/// A memoized computation result carrying a hidden marker.
///
/// Clones share both the value allocation and the marker, so reconfiguring
/// the marker on one clone is visible through the others: they are the same
/// logical result.
pub struct Tagged<T> {
    value: Rc<T>,
    tag: Rc<Cell<bool>>,
}

impl<T> Tagged<T> {
    fn new(value: T) -> Self {
        Self {
            value: Rc::new(value),
            tag: Rc::new(Cell::new(true)),
        }
    }

    /// Current marker value. Starts as `true` for every memoized result.
    pub fn tag(&self) -> bool {
        self.tag.get()
    }

    /// Reconfigure the marker without touching the value.
    pub fn set_tag(&self, tag: bool) {
        self.tag.set(tag);
    }

    /// True when both wrappers hand out the same cached allocation.
    pub fn shares_allocation(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.value, &b.value)
    }
}

impl<T> Clone for Tagged<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            tag: Rc::clone(&self.tag),
        }
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

// The marker is invisible below this line: equality, serialization, and
// debug formatting all see only the inner value.

impl<T: PartialEq> PartialEq for Tagged<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: PartialEq> PartialEq<T> for Tagged<T> {
    fn eq(&self, other: &T) -> bool {
        *self.value == *other
    }
}

impl<T: fmt::Debug> fmt::Debug for Tagged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: Serialize> Serialize for Tagged<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Recompute-on-dependency-change cache.
///
/// The first call always computes; later calls reuse the cached result while
/// the dependency value compares equal.
pub struct TaggedMemo<D, T> {
    cached: Option<(D, Tagged<T>)>,
}

impl<D: PartialEq, T> TaggedMemo<D, T> {
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Return the cached result for `deps`, computing it if `deps` changed.
    pub fn get_with(&mut self, deps: D, compute: impl FnOnce(&D) -> T) -> Tagged<T> {
        if let Some((cached_deps, value)) = &self.cached {
            if *cached_deps == deps {
                return value.clone();
            }
        }
        let value = Tagged::new(compute(&deps));
        self.cached = Some((deps, value.clone()));
        value
    }
}

impl<D: PartialEq, T> Default for TaggedMemo<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Call-site adapter: each invocation of the returned closure re-evaluates
/// `deps` and recomputes only when the dependency value changed.
pub fn use_tagged_memo<D, T>(
    deps: impl Fn() -> D + 'static,
    compute: impl Fn(&D) -> T + 'static,
) -> impl Fn() -> Tagged<T>
where
    D: PartialEq + 'static,
    T: 'static,
{
    let memo = RefCell::new(TaggedMemo::new());
    move || {
        let current = deps();
        memo.borrow_mut().get_with(current, &compute)
    }
}
