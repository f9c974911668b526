//! Key partitioning of collections.
//!
//! A [`Partition`] associates each key extracted from a collection with one
//! item of that collection. What happens when two items share a key is a
//! [`CollisionPolicy`] decision made explicitly by the caller; the same
//! policy is applied to both sides of a comparison.
//!
//! Partitions preserve first-seen key order, so iterating one is
//! deterministic for a given input.

use crate::error::{CmpError, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// How to treat items whose keys collide within one collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Keep the first item seen under a key and discard later duplicates
    #[default]
    FirstWins,
    /// Abort partitioning with a key collision error
    FailFast,
}

impl CollisionPolicy {
    /// Get the policy name as used in config files and on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FirstWins => "first-wins",
            Self::FailFast => "fail-fast",
        }
    }

    /// Parse a policy from its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "first-wins" | "first" => Some(Self::FirstWins),
            "fail-fast" | "strict" => Some(Self::FailFast),
            _ => None,
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which input collection of a comparison a partition was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Base,
    Working,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Working => f.write_str("working"),
        }
    }
}

/// Key to item association built from one collection.
///
/// Items are borrowed from the partitioned collection; the partition never
/// copies or mutates them.
#[derive(Debug, Clone)]
pub struct Partition<'a, K, T> {
    entries: IndexMap<K, &'a T>,
    source_len: usize,
    side: Side,
}

impl<'a, K: Eq + Hash, T> Partition<'a, K, T> {
    /// Partition `items` by `key_of` under `policy`.
    ///
    /// With [`CollisionPolicy::FailFast`] the first repeated key aborts the
    /// whole partition.
    pub fn build<F>(items: &'a [T], key_of: F, policy: CollisionPolicy, side: Side) -> Result<Self>
    where
        K: fmt::Debug,
        F: Fn(&T) -> K,
    {
        let mut entries = IndexMap::with_capacity(items.len());
        let mut discarded = 0usize;

        for item in items {
            match entries.entry(key_of(item)) {
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
                Entry::Occupied(slot) => match policy {
                    CollisionPolicy::FirstWins => {
                        tracing::debug!("Discarding duplicate {side} key {:?}", slot.key());
                        discarded += 1;
                    }
                    CollisionPolicy::FailFast => {
                        return Err(CmpError::key_collision(format!("{:?}", slot.key()), side));
                    }
                },
            }
        }

        if discarded > 0 {
            tracing::debug!(
                "Partitioned {} {side} items into {} keys ({discarded} duplicates discarded)",
                items.len(),
                entries.len()
            );
        }

        Ok(Self {
            entries,
            source_len: items.len(),
            side,
        })
    }

    /// Look up the item stored under `key`.
    pub fn get(&self, key: &K) -> Option<&'a T> {
        self.entries.get(key).copied()
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over keys and items in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &'a T)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Iterate over keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the partition holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of items in the collection this partition was built from.
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_len
    }

    /// Whether every source item got its own key.
    #[must_use]
    pub fn is_lossless(&self) -> bool {
        self.entries.len() == self.source_len
    }

    /// The side this partition was built for.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }
}

/// Partition `items` by `key_of`.
///
/// Convenience wrapper over [`Partition::build`].
pub fn partition<K, T, F>(
    items: &[T],
    key_of: F,
    policy: CollisionPolicy,
    side: Side,
) -> Result<Partition<'_, K, T>>
where
    K: Eq + Hash + fmt::Debug,
    F: Fn(&T) -> K,
{
    Partition::build(items, key_of, policy, side)
}

/// Check if `items` can be partitioned by `key_of` without collisions.
///
/// Independent of any [`CollisionPolicy`]: true iff every item yields a
/// distinct key, which is also exactly when fail-fast partitioning succeeds.
pub fn can_partition<K, T, F>(items: &[T], key_of: F) -> bool
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = indexmap::IndexSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(key_of(item)))
}

/// Collect every key that occurs more than once in `items`.
///
/// Keys are returned once each, in the order their first duplicate was seen.
pub fn colliding_keys<K, T, F>(items: &[T], key_of: F) -> Vec<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut counts: IndexMap<K, usize> = IndexMap::with_capacity(items.len());
    let mut collisions = Vec::new();
    for item in items {
        let key = key_of(item);
        let count = counts.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            collisions.push(key);
        }
    }
    collisions
}
