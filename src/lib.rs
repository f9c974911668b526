//! **Key-based classification diffs between two collections.**
//!
//! `collection-cmp` compares a *base* collection against a *working*
//! collection. Items on each side are matched by a key that you extract, and
//! every logical entity is classified as **removed**, **added**, **updated** or
//! **unchanged** according to a pluggable equality policy. Both sides may hold
//! the same item type or two different types.
//!
//! The library powers the `collection-cmp` command-line tool, which applies
//! the same engine to documents of JSON records.
//!
//! ## Core Concepts & Modules
//!
//! - **[`partition`]**: builds a key → item association for one collection,
//!   with an explicit [`CollisionPolicy`] for items sharing a key.
//! - **[`equality`]**: immutable equality policies ([`Equality`]) consumed by
//!   the engine through the [`ItemEquality`] trait.
//! - **[`diff`]**: the [`DiffEngine`] and its [`DiffResult`], which exposes
//!   the four classified groups plus derived views and counts.
//! - **[`records`]**: adapters from JSON documents to keys and equality
//!   policies.
//! - **[`reports`]**: summary, table and JSON renderings of a record diff.
//! - **[`config`]** / **[`pipeline`]** / **[`cli`]**: the command-line
//!   application layer.
//!
//! ## Getting Started
//!
//! ```
//! use collection_cmp::{DiffEngine, Equality};
//!
//! #[derive(Debug, PartialEq)]
//! struct Row { id: u32, qty: i32 }
//!
//! let base = vec![Row { id: 1, qty: 1 }, Row { id: 2, qty: 2 }];
//! let working = vec![Row { id: 2, qty: 5 }, Row { id: 3, qty: 3 }];
//!
//! let result = DiffEngine::new()
//!     .diff_same(&base, &working, |r| r.id, &Equality::field(|r: &Row| r.qty))
//!     .expect("first-wins partitioning never fails");
//!
//! assert_eq!(result.removed().len(), 1);
//! assert_eq!(result.added().len(), 1);
//! assert_eq!(result.updated().len(), 1);
//! assert_eq!(result.summary().changes, 3);
//! ```
//!
//! ### Comparing Different Item Types
//!
//! ```
//! use collection_cmp::{DiffEngine, Equality, EqualityPair};
//!
//! struct Stored { sku: String, price: u32 }
//! struct Feed { code: String, cents: u64 }
//!
//! let base = vec![Stored { sku: "a".into(), price: 100 }];
//! let working = vec![Feed { code: "a".into(), cents: 100 }];
//!
//! let equality = Equality::try_fields([EqualityPair::new(
//!     |s: &Stored| u64::from(s.price),
//!     |f: &Feed| f.cents,
//! )])
//! .expect("one pair");
//!
//! let result = DiffEngine::new()
//!     .diff(&base, &working, |s| s.sku.clone(), |f| f.code.clone(), &equality)
//!     .expect("first-wins partitioning never fails");
//! assert!(!result.has_changes());
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // Variable names like `base`/`working` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod equality;
pub mod error;
pub mod partition;
pub mod pipeline;
pub mod records;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, DiffConfig, Validatable};
pub use config::{BehaviorConfig, MatchingConfig, OutputConfig};
pub use diff::{
    ChangeKind, ClassifiedPair, DiffEngine, DiffOptions, DiffResult, DiffSummary, Latest,
};
pub use equality::{Equality, EqualityPair, ItemEquality, Projection};
pub use error::{CmpError, ErrorContext, OptionContext, Result};
pub use partition::{can_partition, colliding_keys, partition, CollisionPolicy, Partition, Side};
pub use records::{
    load_records, parse_records, record_equality, FieldPath, RecordKey, RecordKeyExtractor,
};
pub use reports::{ReportFormat, ReportGenerator};
