//! Direct, absence-aware comparison of two optional items.
//!
//! These helpers are for comparing single items outside of a collection
//! diff, where either side may be missing:
//!
//! - both absent: equal
//! - exactly one absent: not equal
//! - both present: the configured policy decides
//!
//! The same-type helpers additionally treat two references to the very same
//! object as equal without consulting the policy.

use super::{Equality, EqualityPair, ItemEquality};

/// Compare with value equality.
///
/// Two references to the same object are equal even when the value is not
/// equal to itself.
pub fn equals<T: PartialEq + ?Sized>(base: Option<&T>, working: Option<&T>) -> bool {
    match (base, working) {
        (None, None) => true,
        (Some(b), Some(w)) => is_same_object(b, w) || b == w,
        _ => false,
    }
}

/// Compare two items of possibly different types with `equality`.
pub fn equals_with<B, W, E>(base: Option<&B>, working: Option<&W>, equality: &E) -> bool
where
    B: ?Sized,
    W: ?Sized,
    E: ItemEquality<B, W> + ?Sized,
{
    match (base, working) {
        (None, None) => true,
        (Some(b), Some(w)) => equality.is_equal(b, w),
        _ => false,
    }
}

/// Compare two items of the same type with `equality`.
///
/// Two references to the same object are equal without evaluating
/// `equality`.
pub fn same_with<T, E>(base: Option<&T>, working: Option<&T>, equality: &E) -> bool
where
    E: ItemEquality<T, T> + ?Sized,
{
    match (base, working) {
        (None, None) => true,
        (Some(b), Some(w)) => is_same_object(b, w) || equality.is_equal(b, w),
        _ => false,
    }
}

/// Compare two items on every projection in `projections`.
///
/// An empty list compares by value.
pub fn equals_by<T>(
    base: Option<&T>,
    working: Option<&T>,
    projections: impl IntoIterator<Item = EqualityPair<T, T>>,
) -> bool
where
    T: PartialEq,
{
    same_with(base, working, &Equality::projections(projections))
}

/// Compare two items on every pair in `pairs`.
///
/// An empty list compares by value.
pub fn equals_by_pairs<B, W>(
    base: Option<&B>,
    working: Option<&W>,
    pairs: impl IntoIterator<Item = EqualityPair<B, W>>,
) -> bool
where
    B: PartialEq<W>,
{
    equals_with(base, working, &Equality::fields(pairs))
}

fn is_same_object<T: ?Sized>(a: &T, b: &T) -> bool {
    // Distinct zero-sized values share an address.
    std::mem::size_of_val(a) != 0 && std::ptr::eq(a, b)
}
