//! Violation records stored under a plate identifier.
//!
//! A [`Violation`] is an immutable pair of strings. The date is kept exactly
//! as supplied; it is never parsed, normalized, or validated.
//!
//! # Examples
//!
//! ```rust
//! use violation_tree::Violation;
//!
//! let violation = Violation::new("2023-11-11", "Speeding");
//! assert_eq!(violation.occurred_on(), "2023-11-11");
//! assert_eq!(violation.to_string(), "2023-11-11: Speeding");
//! ```

use std::fmt;

/// A single traffic violation entry.
///
/// Violations have no identity of their own. Two equal violations recorded
/// under the same plate are kept as two separate entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    occurred_on: String,
    description: String,
}

impl Violation {
    /// Creates a new violation.
    ///
    /// # Arguments
    ///
    /// * `occurred_on` - The date of the violation, stored verbatim
    /// * `description` - Free text describing the violation
    #[must_use]
    pub fn new(occurred_on: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            occurred_on: occurred_on.into(),
            description: description.into(),
        }
    }

    /// Returns the date the violation occurred on.
    #[inline]
    #[must_use]
    pub fn occurred_on(&self) -> &str {
        &self.occurred_on
    }

    /// Returns the description of the violation.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.occurred_on, self.description)
    }
}
