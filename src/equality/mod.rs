//! Equality policies for matched items.
//!
//! Once two items are matched by key, an equality policy decides whether the
//! pair is unchanged or updated. Policies are immutable values built from a
//! handful of named constructors:
//!
//! - [`Equality::value`]: `base == working` via [`PartialEq`]
//! - [`Equality::custom`]: an arbitrary predicate, used verbatim
//! - [`Equality::fields`]: a conjunction of [`EqualityPair`]s, each comparing
//!   one projection of the base item with one projection of the working item
//! - [`Equality::projections`] / [`Equality::field`]: the same-type form, where
//!   one projection is applied to both sides
//!
//! An empty pair list falls back to value equality, never to a constant.
//!
//! ```
//! use collection_cmp::equality::{Equality, EqualityPair, ItemEquality};
//!
//! struct Stored { id: String, amount: i32 }
//! struct Incoming { id: String, amount: i64 }
//!
//! let eq = Equality::<Stored, Incoming>::custom(|b, w| i64::from(b.amount) == w.amount);
//! let same = EqualityPair::new(|b: &Stored| i64::from(b.amount), |w: &Incoming| w.amount);
//! assert!(same.is_equal(
//!     &Stored { id: "1".into(), amount: 2 },
//!     &Incoming { id: "1".into(), amount: 2 },
//! ));
//! assert!(eq.is_equal(
//!     &Stored { id: "1".into(), amount: 2 },
//!     &Incoming { id: "1".into(), amount: 2 },
//! ));
//! ```

pub mod object;

use crate::error::{CmpError, Result};
use std::fmt;
use std::sync::Arc;

type Predicate<B, W> = Arc<dyn Fn(&B, &W) -> bool + Send + Sync>;

/// Decides whether a base item and a working item are equal.
///
/// This is the seam the diff engine consumes. It is implemented by
/// [`Equality`] and by any `Fn(&B, &W) -> bool`.
pub trait ItemEquality<B: ?Sized, W: ?Sized> {
    /// Check whether `base` and `working` are equal under this policy.
    fn is_equal(&self, base: &B, working: &W) -> bool;
}

impl<B: ?Sized, W: ?Sized, F> ItemEquality<B, W> for F
where
    F: Fn(&B, &W) -> bool,
{
    fn is_equal(&self, base: &B, working: &W) -> bool {
        self(base, working)
    }
}

// ============================================================================
// Equality pairs
// ============================================================================

/// One projection of a base item compared with one projection of a working
/// item.
///
/// The projections may return different types as long as the base value is
/// [`PartialEq`] with the working value.
pub struct EqualityPair<B, W> {
    name: Option<String>,
    test: Predicate<B, W>,
}

/// An [`EqualityPair`] applying the same projection on both sides.
pub type Projection<O> = EqualityPair<O, O>;

impl<B: 'static, W: 'static> EqualityPair<B, W> {
    /// Create a pair from a base-side and a working-side projection.
    pub fn new<V1, V2, FB, FW>(base: FB, working: FW) -> Self
    where
        V1: PartialEq<V2>,
        FB: Fn(&B) -> V1 + Send + Sync + 'static,
        FW: Fn(&W) -> V2 + Send + Sync + 'static,
    {
        Self {
            name: None,
            test: Arc::new(move |b: &B, w: &W| base(b) == working(w)),
        }
    }

    /// Create a pair from a comparison of borrowed parts of both items.
    ///
    /// Use this when the projected values borrow from the items, so no owned
    /// value has to be produced per comparison.
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&B, &W) -> bool + Send + Sync + 'static,
    {
        Self {
            name: None,
            test: Arc::new(compare),
        }
    }
}

impl<O: 'static> EqualityPair<O, O> {
    /// Create a pair that applies `projection` to both items.
    pub fn same<V, F>(projection: F) -> Self
    where
        V: PartialEq,
        F: Fn(&O) -> V + Send + Sync + 'static,
    {
        Self {
            name: None,
            test: Arc::new(move |b: &O, w: &O| projection(b) == projection(w)),
        }
    }
}

impl<B, W> EqualityPair<B, W> {
    /// Attach a name, used in debug output.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name attached with [`named`](Self::named), if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check whether both projections yield equal values.
    pub fn is_equal(&self, base: &B, working: &W) -> bool {
        (self.test)(base, working)
    }
}

impl<B, W> Clone for EqualityPair<B, W> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<B, W> fmt::Debug for EqualityPair<B, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualityPair")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Equality policy
// ============================================================================

enum Strategy<B, W> {
    Value(fn(&B, &W) -> bool),
    Custom(Predicate<B, W>),
    Fields(Arc<[EqualityPair<B, W>]>),
}

fn value_eq<B: PartialEq<W>, W>(base: &B, working: &W) -> bool {
    base == working
}

/// An immutable equality policy between base items `B` and working items `W`.
///
/// Cloning is cheap and the policy can be shared across threads.
pub struct Equality<B, W> {
    strategy: Strategy<B, W>,
}

impl<B, W> Equality<B, W> {
    /// Value equality: `base == working`.
    #[must_use]
    pub fn value() -> Self
    where
        B: PartialEq<W>,
    {
        Self {
            strategy: Strategy::Value(value_eq::<B, W>),
        }
    }

    /// Use `predicate` verbatim.
    #[must_use]
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&B, &W) -> bool + Send + Sync + 'static,
    {
        Self {
            strategy: Strategy::Custom(Arc::new(predicate)),
        }
    }

    /// Equal iff every pair holds. An empty list means value equality.
    #[must_use]
    pub fn fields(pairs: impl IntoIterator<Item = EqualityPair<B, W>>) -> Self
    where
        B: PartialEq<W>,
    {
        let pairs: Vec<_> = pairs.into_iter().collect();
        if pairs.is_empty() {
            Self::value()
        } else {
            Self::from_pairs(pairs)
        }
    }

    /// Like [`fields`](Self::fields) for item types without value equality.
    ///
    /// With nothing to fall back to, an empty pair list is rejected.
    pub fn try_fields(pairs: impl IntoIterator<Item = EqualityPair<B, W>>) -> Result<Self> {
        let pairs: Vec<_> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(CmpError::invalid_configuration(
                "at least one equality pair is required when items have no value equality",
            ));
        }
        Ok(Self::from_pairs(pairs))
    }

    fn from_pairs(pairs: Vec<EqualityPair<B, W>>) -> Self {
        Self {
            strategy: Strategy::Fields(pairs.into()),
        }
    }

    /// Check whether `base` and `working` are equal under this policy.
    pub fn is_equal(&self, base: &B, working: &W) -> bool {
        match &self.strategy {
            Strategy::Value(eq) => eq(base, working),
            Strategy::Custom(predicate) => predicate(base, working),
            Strategy::Fields(pairs) => pairs.iter().all(|pair| pair.is_equal(base, working)),
        }
    }

    /// Short name of the configured strategy.
    #[must_use]
    pub const fn strategy_name(&self) -> &'static str {
        match self.strategy {
            Strategy::Value(_) => "value",
            Strategy::Custom(_) => "custom",
            Strategy::Fields(_) => "fields",
        }
    }

    /// Number of equality pairs, zero for value and custom policies.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        match &self.strategy {
            Strategy::Fields(pairs) => pairs.len(),
            Strategy::Value(_) | Strategy::Custom(_) => 0,
        }
    }
}

impl<O: PartialEq> Equality<O, O> {
    /// Same-type form of [`fields`](Self::fields).
    #[must_use]
    pub fn projections(projections: impl IntoIterator<Item = Projection<O>>) -> Self {
        Self::fields(projections)
    }
}

impl<O: PartialEq + 'static> Equality<O, O> {
    /// Equal iff `projection` yields equal values on both items.
    #[must_use]
    pub fn field<V, F>(projection: F) -> Self
    where
        V: PartialEq,
        F: Fn(&O) -> V + Send + Sync + 'static,
    {
        Self::from_pairs(vec![EqualityPair::same(projection)])
    }
}

impl<B: PartialEq<W>, W> Default for Equality<B, W> {
    fn default() -> Self {
        Self::value()
    }
}

impl<B, W> Clone for Equality<B, W> {
    fn clone(&self) -> Self {
        let strategy = match &self.strategy {
            Strategy::Value(eq) => Strategy::Value(*eq),
            Strategy::Custom(predicate) => Strategy::Custom(Arc::clone(predicate)),
            Strategy::Fields(pairs) => Strategy::Fields(Arc::clone(pairs)),
        };
        Self { strategy }
    }
}

impl<B, W> fmt::Debug for Equality<B, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Equality");
        dbg.field("strategy", &self.strategy_name());
        if let Strategy::Fields(pairs) = &self.strategy {
            dbg.field("pairs", pairs);
        }
        dbg.finish()
    }
}

impl<B, W> ItemEquality<B, W> for Equality<B, W> {
    fn is_equal(&self, base: &B, working: &W) -> bool {
        Self::is_equal(self, base, working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Obj {
        id: String,
        n: i32,
    }

    #[derive(Debug, Clone)]
    struct Obj2 {
        id: String,
        n: i64,
    }

    fn obj(id: &str, n: i32) -> Obj {
        Obj { id: id.into(), n }
    }

    fn obj2(id: &str, n: i64) -> Obj2 {
        Obj2 { id: id.into(), n }
    }

    #[test]
    fn test_value_equality() {
        let eq = Equality::<Obj, Obj>::value();
        assert!(eq.is_equal(&obj("1", 1), &obj("1", 1)));
        assert!(!eq.is_equal(&obj("1", 1), &obj("1", 2)));
        assert_eq!(eq.strategy_name(), "value");
    }

    #[test]
    fn test_custom_predicate_used_verbatim() {
        let eq = Equality::<Obj, Obj2>::custom(|b, w| i64::from(b.n) == w.n);
        assert!(eq.is_equal(&obj("1", 2), &obj2("9", 2)));
        assert!(!eq.is_equal(&obj("1", 2), &obj2("1", 3)));
        assert_eq!(eq.strategy_name(), "custom");
    }

    #[test]
    fn test_projections_are_a_conjunction() {
        let eq = Equality::projections([
            Projection::same(|o: &Obj| o.id.clone()),
            Projection::same(|o: &Obj| o.n),
        ]);
        assert_eq!(eq.pair_count(), 2);
        assert!(eq.is_equal(&obj("1", 1), &obj("1", 1)));
        assert!(!eq.is_equal(&obj("1", 1), &obj("2", 1)));
        assert!(!eq.is_equal(&obj("1", 1), &obj("1", 2)));
    }

    #[test]
    fn test_single_field_ignores_other_fields() {
        let eq = Equality::field(|o: &Obj| o.id.clone());
        assert!(eq.is_equal(&obj("1", 9), &obj("1", 8)));
    }

    #[test]
    fn test_cross_type_pairs() {
        let eq = Equality::try_fields([
            EqualityPair::new(|b: &Obj| b.id.clone(), |w: &Obj2| w.id.clone()),
            EqualityPair::new(|b: &Obj| i64::from(b.n), |w: &Obj2| w.n),
        ])
        .expect("non-empty pair list");

        assert!(eq.is_equal(&obj("2", 2), &obj2("2", 2)));
        assert!(!eq.is_equal(&obj("2", 2), &obj2("2", 20)));
    }

    #[test]
    fn test_empty_pairs_fall_back_to_value_equality() {
        let eq = Equality::<Obj, Obj>::projections(Vec::new());
        assert_eq!(eq.strategy_name(), "value");
        assert!(eq.is_equal(&obj("1", 1), &obj("1", 1)));
        assert!(!eq.is_equal(&obj("1", 1), &obj("1", 2)));
    }

    #[test]
    fn test_try_fields_rejects_empty_list() {
        let err = Equality::<Obj, Obj2>::try_fields(Vec::new()).expect_err("empty list");
        assert!(matches!(err, CmpError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_evaluated_per_call_without_caching() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let eq = Equality::<Obj, Obj>::custom(move |b, w| {
            counter.fetch_add(1, Ordering::SeqCst);
            b.n == w.n
        });

        let (a, b) = (obj("1", 1), obj("1", 1));
        assert!(eq.is_equal(&a, &b));
        assert!(eq.is_equal(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clone_shares_policy() {
        let eq = Equality::field(|o: &Obj| o.n).clone();
        assert!(eq.is_equal(&obj("1", 1), &obj("2", 1)));
        assert_eq!(eq.pair_count(), 1);
    }

    #[test]
    fn test_closures_are_item_equalities() {
        fn check<E: ItemEquality<Obj, Obj2>>(eq: &E) -> bool {
            eq.is_equal(&obj("1", 5), &obj2("1", 5))
        }
        assert!(check(&|b: &Obj, w: &Obj2| b.id == w.id));
    }

    #[test]
    fn test_named_pair_debug() {
        let pair = Projection::same(|o: &Obj| o.n).named("n");
        assert_eq!(pair.name(), Some("n"));
        assert!(format!("{pair:?}").contains("\"n\""));
    }
}
