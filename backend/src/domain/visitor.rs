//! Visitor counting aggregate.
//!
//! A deployment holds exactly one [`VisitorRecord`]: a running total plus the
//! number of visits per [`LocationLabel`].
//!
//! ## Invariants
//! - `total` equals the sum of the per-location counts.
//! - Every stored per-location count is at least one.
//! - Labels are case-sensitive; `"Unknown"` is an ordinary bucket.

use std::collections::BTreeMap;
use std::fmt;

/// Label recorded when a visit's location cannot be resolved.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Coarse location a visit is attributed to (a city name or `"Unknown"`).
///
/// # Examples
/// ```
/// use eduverse_backend::domain::LocationLabel;
///
/// let label = LocationLabel::new("  Paris ").expect("valid label");
/// assert_eq!(label.as_str(), "Paris");
/// assert!(LocationLabel::new("   ").is_err());
/// assert!(LocationLabel::unknown().is_unknown());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationLabel(String);

/// Validation errors raised by [`LocationLabel::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationLabelError {
    /// The label is empty once surrounding whitespace is removed.
    #[error("location label must not be blank")]
    Blank,
}

impl LocationLabel {
    /// Build a label, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, LocationLabelError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LocationLabelError::Blank);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// The fallback bucket for unresolvable visits.
    pub fn unknown() -> Self {
        Self(UNKNOWN_LOCATION.to_owned())
    }

    /// Whether this is the fallback bucket.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_LOCATION
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for LocationLabel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<LocationLabel> for String {
    fn from(value: LocationLabel) -> Self {
        value.0
    }
}

/// Reasons stored parts cannot form a [`VisitorRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisitorRecordError {
    /// The per-location counts do not add up to the total.
    #[error("visitor total {total} does not match location sum {sum}")]
    TotalMismatch {
        /// Stored total.
        total: u64,
        /// Sum of the stored per-location counts.
        sum: u64,
    },
    /// A location bucket holds a zero count.
    #[error("location {label} has a zero visit count")]
    ZeroCount {
        /// Offending label.
        label: String,
    },
    /// The per-location counts overflow a `u64`.
    #[error("location counts overflow")]
    Overflow,
}

/// The singleton visitor document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorRecord {
    total: u64,
    locations: BTreeMap<LocationLabel, u64>,
}

impl VisitorRecord {
    /// Record with no visits, reported before anything has been stored.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record created by the very first visit.
    pub fn first_visit(location: LocationLabel) -> Self {
        let mut record = Self::empty();
        record.record(location);
        record
    }

    /// Rebuild a record from stored parts, enforcing the invariants.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use eduverse_backend::domain::{LocationLabel, VisitorRecord};
    ///
    /// let paris = LocationLabel::new("Paris").expect("valid label");
    /// let record = VisitorRecord::from_parts(2, BTreeMap::from([(paris.clone(), 2)]))
    ///     .expect("consistent parts");
    /// assert_eq!(record.count_for(&paris), 2);
    /// assert!(VisitorRecord::from_parts(3, BTreeMap::from([(paris, 2)])).is_err());
    /// ```
    pub fn from_parts(
        total: u64,
        locations: BTreeMap<LocationLabel, u64>,
    ) -> Result<Self, VisitorRecordError> {
        let mut sum: u64 = 0;
        for (label, count) in &locations {
            if *count == 0 {
                return Err(VisitorRecordError::ZeroCount {
                    label: label.to_string(),
                });
            }
            sum = sum
                .checked_add(*count)
                .ok_or(VisitorRecordError::Overflow)?;
        }
        if sum != total {
            return Err(VisitorRecordError::TotalMismatch { total, sum });
        }
        Ok(Self { total, locations })
    }

    /// Apply one visit and return the new total.
    pub fn record(&mut self, location: LocationLabel) -> u64 {
        *self.locations.entry(location).or_insert(0) += 1;
        self.total += 1;
        self.total
    }

    /// Running total of visits.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Per-location counts, ordered by label.
    pub fn locations(&self) -> &BTreeMap<LocationLabel, u64> {
        &self.locations
    }

    /// Visits attributed to `location` (zero when never seen).
    pub fn count_for(&self, location: &LocationLabel) -> u64 {
        self.locations.get(location).copied().unwrap_or(0)
    }

    /// Whether the total matches the per-location sum.
    pub fn is_consistent(&self) -> bool {
        self.locations.values().sum::<u64>() == self.total
    }
}

/// Outcome of recording one visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitReceipt {
    /// Total visits after this one.
    pub total: u64,
    /// Location the visit was attributed to.
    pub location: LocationLabel,
}
