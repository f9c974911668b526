//! Key-based diff engine implementation.

pub use super::engine_config::DiffOptions;
use super::pair::ClassifiedPair;
use super::result::DiffResult;
use crate::equality::ItemEquality;
use crate::error::Result;
use crate::partition::{CollisionPolicy, Partition, Side};
use std::fmt::Debug;
use std::hash::Hash;

/// Diff engine for comparing two keyed collections.
///
/// The engine holds no state between calls; one instance can serve any
/// number of concurrent comparisons.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diff engine from explicit options
    pub const fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Set the policy for repeated keys
    pub const fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.options.collision_policy = policy;
        self
    }

    /// Always compute the added set, even when it is provably empty
    pub const fn with_full_added_scan(mut self, full: bool) -> Self {
        self.options.full_added_scan = full;
        self
    }

    /// Get the engine options.
    pub const fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare `base` against `working`.
    ///
    /// Items are matched by the keys `base_key` and `working_key` extract and
    /// matched pairs are classified with `equality`. A key collision under
    /// [`CollisionPolicy::FailFast`] aborts the whole comparison.
    pub fn diff<'a, K, B, W, KB, KW, E>(
        &self,
        base: &'a [B],
        working: &'a [W],
        base_key: KB,
        working_key: KW,
        equality: &E,
    ) -> Result<DiffResult<'a, K, B, W>>
    where
        K: Eq + Hash + Clone + Debug,
        KB: Fn(&B) -> K,
        KW: Fn(&W) -> K,
        E: ItemEquality<B, W> + ?Sized,
    {
        let policy = self.options.collision_policy;
        let base_partition = Partition::build(base, base_key, policy, Side::Base)?;
        let working_partition = Partition::build(working, working_key, policy, Side::Working)?;
        Ok(self.classify(&base_partition, &working_partition, equality))
    }

    /// Compare two collections of the same item type sharing one key extractor.
    pub fn diff_same<'a, K, T, F, E>(
        &self,
        base: &'a [T],
        working: &'a [T],
        key_of: F,
        equality: &E,
    ) -> Result<DiffResult<'a, K, T, T>>
    where
        K: Eq + Hash + Clone + Debug,
        F: Fn(&T) -> K,
        E: ItemEquality<T, T> + ?Sized,
    {
        self.diff(base, working, &key_of, &key_of, equality)
    }

    /// Compare like [`diff`](Self::diff), partitioning both sides concurrently.
    ///
    /// Classification starts once both partitions are complete and produces
    /// the same result as the sequential form.
    pub fn diff_parallel<'a, K, B, W, KB, KW, E>(
        &self,
        base: &'a [B],
        working: &'a [W],
        base_key: KB,
        working_key: KW,
        equality: &E,
    ) -> Result<DiffResult<'a, K, B, W>>
    where
        K: Eq + Hash + Clone + Debug + Send,
        B: Sync,
        W: Sync,
        KB: Fn(&B) -> K + Sync,
        KW: Fn(&W) -> K + Sync,
        E: ItemEquality<B, W> + ?Sized,
    {
        let policy = self.options.collision_policy;
        let (base_partition, working_partition) = rayon::join(
            || Partition::build(base, &base_key, policy, Side::Base),
            || Partition::build(working, &working_key, policy, Side::Working),
        );
        Ok(self.classify(&base_partition?, &working_partition?, equality))
    }

    /// Merge two partitions into the four classified groups.
    fn classify<'a, K, B, W, E>(
        &self,
        base: &Partition<'a, K, B>,
        working: &Partition<'a, K, W>,
        equality: &E,
    ) -> DiffResult<'a, K, B, W>
    where
        K: Eq + Hash + Clone,
        E: ItemEquality<B, W> + ?Sized,
    {
        let mut removed = Vec::new();
        let mut updated = Vec::new();
        let mut unchanged = Vec::new();

        for (key, base_item) in base.iter() {
            match working.get(key) {
                Some(working_item) if equality.is_equal(base_item, working_item) => {
                    unchanged.push(ClassifiedPair::unchanged(key.clone(), base_item));
                }
                Some(working_item) => {
                    updated.push(ClassifiedPair::updated(key.clone(), base_item, working_item));
                }
                None => removed.push(ClassifiedPair::removed(key.clone(), base_item)),
            }
        }

        // Equal key counts with no removed key means the key sets are equal.
        let added = if self.options.full_added_scan
            || base.len() != working.len()
            || !removed.is_empty()
        {
            working
                .iter()
                .filter(|(key, _)| !base.contains_key(key))
                .map(|(key, working_item)| ClassifiedPair::added(key.clone(), working_item))
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            "Classified {} base keys and {} working keys: {} removed, {} added, {} updated, {} unchanged",
            base.len(),
            working.len(),
            removed.len(),
            added.len(),
            updated.len(),
            unchanged.len()
        );

        DiffResult::new(removed, added, updated, unchanged)
    }
}
