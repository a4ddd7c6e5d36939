//! Synthetic dataset generation.
//!
//! [`generate`] builds the fixed dataset every benchmark run uses. [`DatasetGenerator`]
//! is the configurable form: it can pin the clock, change the constant fields, or
//! read the clock once per record.
//!
//! # Examples
//!
//! ```
//! use serbench::generator::generate;
//!
//! let records = generate(3);
//! let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
//! assert_eq!(ids, vec![0, 1, 2]);
//! ```

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{BenchError, Result};
use crate::record::{Address, Record};

/// Name given to every generated record.
pub const DEFAULT_NAME: &str = "Awesome";
/// First address line of every generated record.
pub const DEFAULT_LINE1: &str = "Flat 1";
/// Second address line of every generated record.
pub const DEFAULT_LINE2: &str = "The Meadows";
/// Days between "now" and the generated timestamps.
pub const DEFAULT_OFFSET_DAYS: i64 = 20;

/// Generate `n` records with ids `0..n` using the default constants.
///
/// The clock is read once, so every record carries the same timestamp.
#[must_use]
pub fn generate(n: usize) -> Vec<Record> {
    DatasetGenerator::new().generate(n)
}

/// When the generator reads the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampMode {
    /// Read the clock once per [`DatasetGenerator::generate`] call
    #[default]
    Once,
    /// Read the clock for every record
    PerRecord,
}

/// Configurable dataset generator.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use serbench::generator::DatasetGenerator;
///
/// let anchor = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// let generator = DatasetGenerator::new().with_anchor(anchor);
///
/// let records = generator.generate(2);
/// assert_eq!(records[0].timestamp, Utc.with_ymd_and_hms(2026, 1, 21, 0, 0, 0).unwrap());
/// assert_eq!(records, generator.generate(2));
/// ```
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    name: String,
    address: Address,
    offset: TimeDelta,
    anchor: Option<DateTime<Utc>>,
    mode: TimestampMode,
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            address: Address::new(DEFAULT_LINE1, DEFAULT_LINE2),
            offset: TimeDelta::days(DEFAULT_OFFSET_DAYS),
            anchor: None,
            mode: TimestampMode::default(),
        }
    }
}

impl DatasetGenerator {
    /// Create a generator with the default constants
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name given to every record
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the address given to every record
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Set the distance between "now" and the generated timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidDataset`] if `days` is outside the range chrono
    /// can represent as a duration.
    pub fn with_offset_days(mut self, days: i64) -> Result<Self> {
        self.offset = TimeDelta::try_days(days).ok_or_else(|| {
            BenchError::InvalidDataset(format!("timestamp offset of {days} days is out of range"))
        })?;
        Ok(self)
    }

    /// Pin "now" to a fixed instant, making generation deterministic.
    ///
    /// A pinned anchor ignores [`TimestampMode`].
    #[must_use]
    pub fn with_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Choose when the clock is read
    #[must_use]
    pub fn with_timestamp_mode(mut self, mode: TimestampMode) -> Self {
        self.mode = mode;
        self
    }

    /// Generate `n` records with ids `0..n` in order.
    ///
    /// Timestamps that would fall outside chrono's range saturate at
    /// `DateTime::<Utc>::MAX_UTC` for positive offsets and `MIN_UTC` for negative ones.
    #[must_use]
    pub fn generate(&self, n: usize) -> Vec<Record> {
        let once = self.timestamp();
        (0..n)
            .map(|i| {
                let timestamp = match (self.anchor, self.mode) {
                    (None, TimestampMode::PerRecord) => self.timestamp(),
                    _ => once,
                };
                Record::new(i as u64, self.name.clone(), timestamp, self.address.clone())
            })
            .collect()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        let bound = if self.offset < TimeDelta::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        self.anchor
            .unwrap_or_else(Utc::now)
            .checked_add_signed(self.offset)
            .unwrap_or(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_ids_in_order() {
        let records = generate(5);
        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.id, i as u64);
            assert_eq!(record.name, DEFAULT_NAME);
            assert_eq!(record.address.line1, DEFAULT_LINE1);
            assert_eq!(record.address.line2, DEFAULT_LINE2);
        }
    }

    #[test]
    fn test_generate_zero() {
        assert!(generate(0).is_empty());
    }

    #[test]
    fn test_timestamp_is_in_the_future() {
        let before = Utc::now();
        let records = generate(1);
        assert!(records[0].timestamp > before + TimeDelta::days(19));
        assert!(records[0].timestamp <= Utc::now() + TimeDelta::days(DEFAULT_OFFSET_DAYS));
    }

    #[test]
    fn test_anchor_is_deterministic() {
        let anchor = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        let generator = DatasetGenerator::new()
            .with_anchor(anchor)
            .with_timestamp_mode(TimestampMode::PerRecord);
        let records = generator.generate(10);
        assert!(records
            .iter()
            .all(|r| r.timestamp == anchor + TimeDelta::days(20)));
        assert_eq!(records, generator.generate(10));
    }

    #[test]
    fn test_custom_fields() {
        let records = DatasetGenerator::new()
            .with_name("")
            .with_address(Address::new("", "Somewhere"))
            .generate(2);
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].address, Address::new("", "Somewhere"));
    }

    #[test]
    fn test_offset_out_of_range() {
        let err = DatasetGenerator::new()
            .with_offset_days(i64::MAX)
            .unwrap_err();
        assert!(matches!(err, BenchError::InvalidDataset(_)));
    }

    #[test]
    fn test_offset_saturates_at_max() {
        let generator = DatasetGenerator::new()
            .with_anchor(DateTime::<Utc>::MAX_UTC)
            .with_offset_days(1)
            .unwrap();
        assert_eq!(generator.generate(1)[0].timestamp, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_offset_saturates_at_min() {
        let generator = DatasetGenerator::new()
            .with_anchor(DateTime::<Utc>::MIN_UTC)
            .with_offset_days(-1)
            .unwrap();
        assert_eq!(generator.generate(1)[0].timestamp, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_negative_offset() {
        let anchor = Utc.with_ymd_and_hms(2030, 6, 21, 0, 0, 0).unwrap();
        let records = DatasetGenerator::new()
            .with_anchor(anchor)
            .with_offset_days(-20)
            .unwrap()
            .generate(1);
        assert_eq!(
            records[0].timestamp,
            Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap()
        );
    }
}
