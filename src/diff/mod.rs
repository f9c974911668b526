//! Key-based diff of two collections.
//!
//! The engine partitions both collections by key, walks the base partition
//! to classify every base key as removed, updated or unchanged, and then
//! derives the added keys from the working partition.
//!
//! # Example
//!
//! ```
//! use collection_cmp::diff::DiffEngine;
//! use collection_cmp::equality::Equality;
//!
//! let base = vec![(1u32, 10), (2, 20)];
//! let working = vec![(2u32, 30), (3, 40)];
//!
//! let result = DiffEngine::new()
//!     .diff_same(&base, &working, |p| p.0, &Equality::field(|p: &(u32, i32)| p.1))
//!     .unwrap();
//!
//! assert_eq!(result.removed_items(), vec![&(1, 10)]);
//! assert_eq!(result.added_items(), vec![&(3, 40)]);
//! assert_eq!(result.updated().len(), 1);
//! assert_eq!(result.changes_count(), 3);
//! ```

mod engine;
mod engine_config;
mod pair;
mod result;

pub use engine::{DiffEngine, DiffOptions};
pub use pair::{ChangeKind, ClassifiedPair, Latest};
pub use result::{DiffResult, DiffSummary};
