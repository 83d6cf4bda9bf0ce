//! The plate-to-violations index.
//!
//! [`ViolationIndex`] is an [`OrderedMultiMap`] keyed by plate identifier.
//! Plates compare byte by byte, so `"ab1234"` and `"AB1234"` are distinct
//! and every upper-case plate sorts before every lower-case one.
//!
//! # Examples
//!
//! ```rust
//! use violation_tree::ViolationIndex;
//!
//! let mut index = ViolationIndex::new();
//! index.record("AB1234", "2023-11-11", "Speeding");
//! index.record("AB1234", "2023-11-12", "Parking in a no-parking zone");
//! index.record("CD5678", "2023-11-13", "Driving without a seatbelt");
//!
//! for (plate, violations) in index.traverse_range("AB0000", "CD9999") {
//!     for violation in violations {
//!         println!("{plate} {violation}");
//!     }
//! }
//! ```

use crate::multimap::OrderedMultiMap;
use crate::violation::Violation;

/// Violations keyed by plate identifier.
pub type ViolationIndex = OrderedMultiMap<String, Violation>;

impl OrderedMultiMap<String, Violation> {
    /// Appends a violation for `plate`, creating the plate's entry on first
    /// use.
    pub fn record(
        &mut self,
        plate: impl Into<String>,
        occurred_on: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.insert(plate.into(), Violation::new(occurred_on, description));
    }
}
