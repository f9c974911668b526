//! Configuration types for the diff engine.

use crate::partition::CollisionPolicy;

/// Options controlling how [`DiffEngine`](super::DiffEngine) partitions and
/// classifies its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    /// Policy applied to repeated keys on both sides
    pub collision_policy: CollisionPolicy,
    /// Always compute the added set, even when it is provably empty
    pub full_added_scan: bool,
}

impl DiffOptions {
    /// Options that abort on any duplicate key.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            collision_policy: CollisionPolicy::FailFast,
            ..Self::default()
        }
    }
}
