//! Core data types for the sensordeck measurement store
//!
//! This module defines the fundamental types used throughout the store layer:
//! - `Reading`: one stored timestamped triple of numeric measurements
//! - `Field`: the closed enumeration of selectable measurement fields
//! - `DateRange`: an inclusive time interval for queries

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single stored reading
///
/// Readings are immutable once stored; they are created by the seeding
/// process and never mutated in place. Each measurement field is optional:
/// an absent field is excluded from aggregates rather than treated as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Unix timestamp in milliseconds (UTC)
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field3: Option<f64>,
}

impl Reading {
    /// Create a reading with all three measurements present
    pub fn new(timestamp: i64, field1: f64, field2: f64, field3: f64) -> Self {
        Self {
            timestamp,
            field1: Some(field1),
            field2: Some(field2),
            field3: Some(field3),
        }
    }

    /// Create a reading with no measurements set
    pub fn at(timestamp: i64) -> Self {
        Self {
            timestamp,
            field1: None,
            field2: None,
            field3: None,
        }
    }

    /// Builder method: set one field by enum value
    pub fn with(mut self, field: Field, value: f64) -> Self {
        match field {
            Field::Field1 => self.field1 = Some(value),
            Field::Field2 => self.field2 = Some(value),
            Field::Field3 => self.field3 = Some(value),
        }
        self
    }

    /// Get the numeric value of the selected field, if present
    pub fn value_of(&self, field: Field) -> Option<f64> {
        match field {
            Field::Field1 => self.field1,
            Field::Field2 => self.field2,
            Field::Field3 => self.field3,
        }
    }
}

/// The fixed set of selectable measurement fields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Field1,
    Field2,
    Field3,
}

impl Field {
    /// All fields, for iteration and error messages
    pub fn all() -> &'static [Field] {
        &[Field::Field1, Field::Field2, Field::Field3]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Field1 => "field1",
            Field::Field2 => "field2",
            Field::Field3 => "field3",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "field1" => Ok(Field::Field1),
            "field2" => Ok(Field::Field2),
            "field3" => Ok(Field::Field3),
            _ => Err(()),
        }
    }
}

/// Inclusive time interval for queries: [start, end], both in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start timestamp (inclusive), in milliseconds
    pub start: i64,
    /// End timestamp (inclusive), in milliseconds
    pub end: i64,
}

impl DateRange {
    /// Create a new range, returning None if inverted
    pub fn try_new(start: i64, end: i64) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Check if a timestamp falls within this range (inclusive on both ends)
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Get the duration in milliseconds
    pub fn duration_millis(&self) -> i64 {
        self.end - self.start
    }
}

/// A (timestamp, value) pair projected out of a reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedValue {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Value of the selected field
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_value_of() {
        let reading = Reading::at(1000).with(Field::Field1, 42.0);

        assert_eq!(reading.value_of(Field::Field1), Some(42.0));
        assert_eq!(reading.value_of(Field::Field2), None);
        assert_eq!(reading.value_of(Field::Field3), None);
    }

    #[test]
    fn test_reading_serialization() {
        let reading = Reading::new(1000, 1.0, 2.0, 3.0);
        let json = serde_json::to_string(&reading).unwrap();
        let restored: Reading = serde_json::from_str(&json).unwrap();

        assert_eq!(reading, restored);
    }

    #[test]
    fn test_reading_partial_deserialization() {
        // Stored rows may lack some fields entirely
        let restored: Reading = serde_json::from_str(r#"{"timestamp": 5, "field2": 7.5}"#).unwrap();

        assert_eq!(restored.timestamp, 5);
        assert_eq!(restored.field1, None);
        assert_eq!(restored.field2, Some(7.5));
    }

    #[test]
    fn test_field_parse_and_display() {
        assert_eq!("field1".parse::<Field>(), Ok(Field::Field1));
        assert_eq!("field3".parse::<Field>(), Ok(Field::Field3));
        assert!("field4".parse::<Field>().is_err());
        assert!("FIELD1".parse::<Field>().is_err());

        assert_eq!(Field::Field2.to_string(), "field2");
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::try_new(1000, 2000).unwrap();

        assert!(!range.contains(999));
        assert!(range.contains(1000));
        assert!(range.contains(1500));
        assert!(range.contains(2000));
        assert!(!range.contains(2001));
    }

    #[test]
    fn test_date_range_inverted() {
        assert!(DateRange::try_new(2000, 1000).is_none());
        // A single instant is a valid range
        assert!(DateRange::try_new(1000, 1000).is_some());
    }
}
