//! Classified pairs: one record per key of a comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an entity changed between the base and working collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present only in the working collection
    Added,
    /// Present only in the base collection
    Removed,
    /// Present in both, but not equal under the equality policy
    Updated,
    /// Present in both and equal under the equality policy
    Unchanged,
}

impl ChangeKind {
    /// All kinds, in result group order.
    pub const ALL: [Self; 4] = [Self::Removed, Self::Added, Self::Updated, Self::Unchanged];

    /// Get the kind name as a lowercase string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }

    /// One-character marker used in terse listings.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
            Self::Updated => '~',
            Self::Unchanged => '=',
        }
    }

    /// Whether this kind counts as a change.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Whether this kind is an existence-only difference.
    #[must_use]
    pub const fn is_difference(&self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The most recent version of an entity: working if present, else base.
#[derive(Debug, PartialEq)]
pub enum Latest<'a, B, W> {
    Base(&'a B),
    Working(&'a W),
}

impl<B, W> Clone for Latest<'_, B, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, W> Copy for Latest<'_, B, W> {}

impl<'a, T> Latest<'a, T, T> {
    /// Collapse to the item itself when both sides share a type.
    #[must_use]
    pub const fn into_inner(self) -> &'a T {
        match self {
            Self::Base(item) | Self::Working(item) => item,
        }
    }
}

/// The relationship between a base item and a working item sharing a key.
///
/// Pairs are created once during classification and never change. Which
/// sides are present is determined by the kind:
///
/// | kind        | base | working |
/// |-------------|------|---------|
/// | `Added`     | -    | yes     |
/// | `Removed`   | yes  | -       |
/// | `Updated`   | yes  | yes     |
/// | `Unchanged` | yes  | -       |
///
/// Unchanged pairs keep only the base item since the working item was proven
/// equal to it.
pub struct ClassifiedPair<'a, K, B, W> {
    key: K,
    sides: Sides<'a, B, W>,
    kind: ChangeKind,
}

enum Sides<'a, B, W> {
    Base(&'a B),
    Working(&'a W),
    Both(&'a B, &'a W),
}

impl<B, W> Clone for Sides<'_, B, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, W> Copy for Sides<'_, B, W> {}

impl<'a, K, B, W> ClassifiedPair<'a, K, B, W> {
    pub(crate) const fn added(key: K, working: &'a W) -> Self {
        Self {
            key,
            sides: Sides::Working(working),
            kind: ChangeKind::Added,
        }
    }

    pub(crate) const fn removed(key: K, base: &'a B) -> Self {
        Self {
            key,
            sides: Sides::Base(base),
            kind: ChangeKind::Removed,
        }
    }

    pub(crate) const fn updated(key: K, base: &'a B, working: &'a W) -> Self {
        Self {
            key,
            sides: Sides::Both(base, working),
            kind: ChangeKind::Updated,
        }
    }

    pub(crate) const fn unchanged(key: K, base: &'a B) -> Self {
        Self {
            key,
            sides: Sides::Base(base),
            kind: ChangeKind::Unchanged,
        }
    }

    /// Key that matched the base and working items.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Base item, absent for additions.
    pub const fn base(&self) -> Option<&'a B> {
        match self.sides {
            Sides::Base(base) | Sides::Both(base, _) => Some(base),
            Sides::Working(_) => None,
        }
    }

    /// Working item, absent for removals and unchanged pairs.
    pub const fn working(&self) -> Option<&'a W> {
        match self.sides {
            Sides::Working(working) | Sides::Both(_, working) => Some(working),
            Sides::Base(_) => None,
        }
    }

    /// How the entity changed.
    pub const fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Working item if present, else base item.
    pub const fn latest(&self) -> Latest<'a, B, W> {
        match self.sides {
            Sides::Working(working) | Sides::Both(_, working) => Latest::Working(working),
            Sides::Base(base) => Latest::Base(base),
        }
    }
}

impl<K: Clone, B, W> Clone for ClassifiedPair<'_, K, B, W> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            sides: self.sides,
            kind: self.kind,
        }
    }
}

impl<K: PartialEq, B: PartialEq, W: PartialEq> PartialEq for ClassifiedPair<'_, K, B, W> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.key == other.key
            && self.base() == other.base()
            && self.working() == other.working()
    }
}

impl<K: fmt::Debug, B: fmt::Debug, W: fmt::Debug> fmt::Debug for ClassifiedPair<'_, K, B, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifiedPair")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("base", &self.base())
            .field("working", &self.working())
            .finish()
    }
}
