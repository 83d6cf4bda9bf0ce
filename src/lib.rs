//! # violation-tree
//!
//! An in-memory index from vehicle plate identifiers to the traffic
//! violations recorded against them.
//!
//! ## Overview
//!
//! The index is a plain, unbalanced binary search tree keyed by plate. Each
//! plate owns an append-only list of [`Violation`]s in the order they were
//! recorded. It includes:
//!
//! - **[`OrderedMultiMap`]**: the generic tree, with insert-or-append, exact
//!   lookup, in-order traversal and inclusive range traversal
//! - **[`Violation`]**: an immutable date/description record
//! - **[`ViolationIndex`]**: the map specialised to plates and violations
//!
//! The crate performs no output of its own. Callers render what the
//! traversals yield.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Violation`] and [`OrderedMultiMap`]
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! Structural changes are reported through [`tracing`] at `trace` level, and
//! dropping a non-empty map at `debug` level. No subscriber is installed.
//!
//! ## Example
//!
//! ```rust
//! use violation_tree::prelude::*;
//!
//! let mut index = ViolationIndex::new();
//! index.record("AB1234", "2023-11-11", "Speeding");
//! index.record("AB1234", "2023-11-12", "Parking in a no-parking zone");
//! index.record("CD5678", "2023-11-13", "Driving without a seatbelt");
//! index.record("EF9101", "2023-11-14", "Running a red light");
//!
//! assert_eq!(index.lookup("AB1234").map(<[Violation]>::len), Some(2));
//! assert!(index.lookup("ZZ0000").is_none());
//!
//! let plates: Vec<&String> = index
//!     .traverse_range("AB0000", "CD9999")
//!     .map(|(plate, _)| plate)
//!     .collect();
//! assert_eq!(plates, vec!["AB1234", "CD5678"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use violation_tree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::index::ViolationIndex;
    pub use crate::multimap::{Iter, OrderedMultiMap, RangeIter};
    pub use crate::violation::Violation;
}

pub mod index;
pub mod multimap;
pub mod violation;

pub use index::ViolationIndex;
pub use multimap::OrderedMultiMap;
pub use violation::Violation;
