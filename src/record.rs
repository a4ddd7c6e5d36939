//! Synthetic record structures.
//!
//! This module provides the entity every codec serializes:
//! - [`Record`] - one synthetic person with an id, name, timestamp and address
//! - [`Address`] - the two-line postal address owned by a record
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use serbench::{Address, Record};
//!
//! let when = Utc.with_ymd_and_hms(2026, 11, 5, 9, 30, 0).unwrap();
//! let record = Record::new(7, "Awesome", when, Address::new("Flat 1", "The Meadows"));
//!
//! assert_eq!(record.id, 7);
//! assert_eq!(record.address.line2, "The Meadows");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A postal address with two free-text lines.
///
/// Either line may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Address {
    /// First address line
    pub line1: String,
    /// Second address line
    pub line2: String,
}

impl Address {
    /// Create an address from its two lines
    #[must_use]
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Address {
            line1: line1.into(),
            line2: line2.into(),
        }
    }
}

/// A synthetic record
///
/// Field declaration order is significant: positional encodings such as compact
/// MessagePack write the fields in this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, unique within a generated dataset
    pub id: u64,
    /// Display name
    pub name: String,
    /// A point in time (near future for generated data)
    pub timestamp: DateTime<Utc>,
    /// Owned postal address
    pub address: Address,
}

impl Record {
    /// Create a new record
    #[must_use]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        timestamp: DateTime<Utc>,
        address: Address,
    ) -> Self {
        Record {
            id,
            name: name.into(),
            timestamp,
            address,
        }
    }
}

/// Find the first position where two datasets differ.
///
/// Returns `None` when both datasets are equal. A length difference is reported
/// at the index of the first record present in only one of them.
#[must_use]
pub fn first_difference(expected: &[Record], actual: &[Record]) -> Option<usize> {
    expected
        .iter()
        .zip(actual)
        .position(|(a, b)| a != b)
        .or_else(|| (expected.len() != actual.len()).then_some(expected.len().min(actual.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(id: u64) -> Record {
        let when = Utc.with_ymd_and_hms(2026, 11, 5, 9, 30, 0).unwrap();
        Record::new(id, "Awesome", when, Address::new("Flat 1", "The Meadows"))
    }

    #[test]
    fn test_address_allows_empty_lines() {
        let address = Address::new("", "");
        assert!(address.line1.is_empty());
        assert_eq!(address, Address::default());
    }

    #[test]
    fn test_first_difference_equal() {
        let records = vec![sample(0), sample(1)];
        assert_eq!(first_difference(&records, &records.clone()), None);
        assert_eq!(first_difference(&[], &[]), None);
    }

    #[test]
    fn test_first_difference_changed_field() {
        let expected = vec![sample(0), sample(1), sample(2)];
        let mut actual = expected.clone();
        actual[1].address.line1 = "Flat 2".to_string();
        assert_eq!(first_difference(&expected, &actual), Some(1));
    }

    #[test]
    fn test_first_difference_length() {
        let expected = vec![sample(0), sample(1)];
        assert_eq!(first_difference(&expected, &expected[..1]), Some(1));
        assert_eq!(first_difference(&[], &expected), Some(0));
    }
}
