//! Diff result aggregate.

use super::pair::{ChangeKind, ClassifiedPair, Latest};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one comparison: the four classified groups plus derived views.
///
/// Groups keep the order the engine emitted them in. Removed, updated and
/// unchanged pairs follow base first-seen order; added pairs follow working
/// first-seen order. Every view below is a read over the stored groups and
/// never reclassifies anything.
#[derive(Debug)]
pub struct DiffResult<'a, K, B, W> {
    removed: Vec<ClassifiedPair<'a, K, B, W>>,
    added: Vec<ClassifiedPair<'a, K, B, W>>,
    updated: Vec<ClassifiedPair<'a, K, B, W>>,
    unchanged: Vec<ClassifiedPair<'a, K, B, W>>,
    changes_count: usize,
    different_count: usize,
}

impl<'a, K, B, W> DiffResult<'a, K, B, W> {
    pub(crate) fn new(
        removed: Vec<ClassifiedPair<'a, K, B, W>>,
        added: Vec<ClassifiedPair<'a, K, B, W>>,
        updated: Vec<ClassifiedPair<'a, K, B, W>>,
        unchanged: Vec<ClassifiedPair<'a, K, B, W>>,
    ) -> Self {
        let different_count = removed.len() + added.len();
        let changes_count = different_count + updated.len();
        Self {
            removed,
            added,
            updated,
            unchanged,
            changes_count,
            different_count,
        }
    }

    /// Pairs whose key only exists in the base collection.
    pub fn removed(&self) -> &[ClassifiedPair<'a, K, B, W>] {
        &self.removed
    }

    /// Pairs whose key only exists in the working collection.
    pub fn added(&self) -> &[ClassifiedPair<'a, K, B, W>] {
        &self.added
    }

    /// Pairs present on both sides that are not equal.
    pub fn updated(&self) -> &[ClassifiedPair<'a, K, B, W>] {
        &self.updated
    }

    /// Pairs present on both sides that are equal.
    pub fn unchanged(&self) -> &[ClassifiedPair<'a, K, B, W>] {
        &self.unchanged
    }

    /// The group holding pairs of `kind`.
    pub fn group(&self, kind: ChangeKind) -> &[ClassifiedPair<'a, K, B, W>] {
        match kind {
            ChangeKind::Removed => &self.removed,
            ChangeKind::Added => &self.added,
            ChangeKind::Updated => &self.updated,
            ChangeKind::Unchanged => &self.unchanged,
        }
    }

    // ------------------------------------------------------------------
    // Concatenated views
    // ------------------------------------------------------------------

    /// Stream every pair: removed, added, updated, then unchanged.
    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedPair<'a, K, B, W>> + '_ {
        self.iter_changed().chain(self.unchanged.iter())
    }

    /// Stream removed, added, then updated pairs.
    pub fn iter_changed(&self) -> impl Iterator<Item = &ClassifiedPair<'a, K, B, W>> + '_ {
        self.iter_different().chain(self.updated.iter())
    }

    /// Stream removed, then added pairs.
    pub fn iter_different(&self) -> impl Iterator<Item = &ClassifiedPair<'a, K, B, W>> + '_ {
        self.removed.iter().chain(self.added.iter())
    }

    /// Stream unchanged pairs.
    pub fn iter_unchanged(&self) -> impl Iterator<Item = &ClassifiedPair<'a, K, B, W>> + '_ {
        self.unchanged.iter()
    }

    /// Every pair, in group order.
    pub fn all(&self) -> Vec<&ClassifiedPair<'a, K, B, W>> {
        self.iter().collect()
    }

    /// Removed, added and updated pairs, in that order.
    pub fn changed(&self) -> Vec<&ClassifiedPair<'a, K, B, W>> {
        self.iter_changed().collect()
    }

    /// Existence-only deltas: removed then added pairs.
    pub fn different(&self) -> Vec<&ClassifiedPair<'a, K, B, W>> {
        self.iter_different().collect()
    }

    // ------------------------------------------------------------------
    // Item projections
    // ------------------------------------------------------------------

    /// Working items of the added pairs.
    pub fn added_items(&self) -> Vec<&'a W> {
        self.added.iter().filter_map(ClassifiedPair::working).collect()
    }

    /// Base items of the removed pairs.
    pub fn removed_items(&self) -> Vec<&'a B> {
        self.removed.iter().filter_map(ClassifiedPair::base).collect()
    }

    /// Latest version of every removed or added entity.
    pub fn different_items(&self) -> Vec<Latest<'a, B, W>> {
        self.iter_different().map(ClassifiedPair::latest).collect()
    }

    // ------------------------------------------------------------------
    // Counts
    // ------------------------------------------------------------------

    /// Number of removed, added and updated pairs.
    #[must_use]
    pub const fn changes_count(&self) -> usize {
        self.changes_count
    }

    /// Number of removed and added pairs.
    #[must_use]
    pub const fn different_count(&self) -> usize {
        self.different_count
    }

    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.changes_count > 0
    }

    #[must_use]
    pub const fn has_differences(&self) -> bool {
        self.different_count > 0
    }

    /// Total number of pairs across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes_count + self.unchanged.len()
    }

    /// Check if both collections were empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count summary of this result.
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            total: self.len(),
            removed: self.removed.len(),
            added: self.added.len(),
            updated: self.updated.len(),
            unchanged: self.unchanged.len(),
            changes: self.changes_count,
            different: self.different_count,
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Visit every pair in group order.
    pub fn for_each<F>(&self, visitor: F)
    where
        F: FnMut(&ClassifiedPair<'a, K, B, W>),
    {
        self.iter().for_each(visitor);
    }

    /// Visit removed, added, then updated pairs.
    pub fn for_each_changed<F>(&self, visitor: F)
    where
        F: FnMut(&ClassifiedPair<'a, K, B, W>),
    {
        self.iter_changed().for_each(visitor);
    }

    /// Visit unchanged pairs.
    pub fn for_each_unchanged<F>(&self, visitor: F)
    where
        F: FnMut(&ClassifiedPair<'a, K, B, W>),
    {
        self.unchanged.iter().for_each(visitor);
    }

    /// Map every kind to its group, borrowed.
    ///
    /// All four kinds are present, in group order, even when a group is empty.
    pub fn grouped_by_kind(&self) -> IndexMap<ChangeKind, &[ClassifiedPair<'a, K, B, W>]> {
        ChangeKind::ALL
            .into_iter()
            .map(|kind| (kind, self.group(kind)))
            .collect()
    }

    /// Find the pair classified under `key`.
    pub fn find(&self, key: &K) -> Option<&ClassifiedPair<'a, K, B, W>>
    where
        K: PartialEq,
    {
        self.iter().find(|pair| pair.key() == key)
    }
}

impl<K: Clone, B, W> Clone for DiffResult<'_, K, B, W> {
    fn clone(&self) -> Self {
        Self {
            removed: self.removed.clone(),
            added: self.added.clone(),
            updated: self.updated.clone(),
            unchanged: self.unchanged.clone(),
            changes_count: self.changes_count,
            different_count: self.different_count,
        }
    }
}

impl<'r, 'a, K, B, W> IntoIterator for &'r DiffResult<'a, K, B, W> {
    type Item = &'r ClassifiedPair<'a, K, B, W>;
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'r>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<K: fmt::Display, B, W> fmt::Display for DiffResult<'_, K, B, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for pair in self {
            writeln!(f, "  {} {}", pair.kind().symbol(), pair.key())?;
        }
        Ok(())
    }
}

/// Counts of one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total: usize,
    pub removed: usize,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub changes: usize,
    pub different: usize,
}

impl DiffSummary {
    /// Count of pairs in `kind`'s group.
    #[must_use]
    pub const fn count(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Removed => self.removed,
            ChangeKind::Added => self.added,
            ChangeKind::Updated => self.updated,
            ChangeKind::Unchanged => self.unchanged,
        }
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} removed, {} added, {} updated, {} unchanged",
            self.removed, self.added, self.updated, self.unchanged
        )
    }
}
