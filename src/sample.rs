//! Width classes and range-checked samples.
//!
//! A sample is an ordered sequence of integers together with the
//! half-open range every element is declared to lie in. Both the
//! tabular and the algorithmic method produce samples of the three
//! standard width classes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Errors raised when building a sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// A value lies outside `[low, high)`.
    #[error("value {value} lies outside declared range [{low}, {high})")]
    OutOfRange {
        /// Offending value.
        value: u64,
        /// Inclusive lower bound.
        low: u64,
        /// Exclusive upper bound.
        high: u64,
    },

    /// `high <= low`.
    #[error("declared range [{low}, {high}) is empty")]
    EmptyRange {
        /// Inclusive lower bound.
        low: u64,
        /// Exclusive upper bound.
        high: u64,
    },

    /// Range admits more values than can be bucketed.
    #[error("declared range spans {span} values, at most {max} allowed")]
    RangeTooWide {
        /// Values the range admits.
        span: u64,
        /// Largest accepted span.
        max: u64,
    },

    /// Range inference found no class for a value.
    #[error("no width class can hold value {value}")]
    NoWidthClass {
        /// Offending value.
        value: u64,
    },
}

/// One of the three output ranges a value is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthClass {
    /// `[0, 10)`
    OneDigit,
    /// `[10, 100)`
    TwoDigit,
    /// `[100, 1000)`
    ThreeDigit,
}

impl WidthClass {
    /// All classes, narrowest first.
    pub const ALL: [WidthClass; 3] = [
        WidthClass::OneDigit,
        WidthClass::TwoDigit,
        WidthClass::ThreeDigit,
    ];

    /// Inclusive lower bound.
    pub const fn low(self) -> u64 {
        match self {
            WidthClass::OneDigit => 0,
            WidthClass::TwoDigit => 10,
            WidthClass::ThreeDigit => 100,
        }
    }

    /// Exclusive upper bound.
    pub const fn high(self) -> u64 {
        match self {
            WidthClass::OneDigit => 10,
            WidthClass::TwoDigit => 100,
            WidthClass::ThreeDigit => 1000,
        }
    }

    /// Number of distinct values in the class.
    pub const fn span(self) -> u64 {
        self.high() - self.low()
    }

    /// The class range as a `Range`.
    pub fn range(self) -> Range<u64> {
        self.low()..self.high()
    }

    /// Maps an arbitrary residue (`value mod span`) into the class.
    ///
    /// This is the tabular mapping: one-digit is `v mod 10`, two-digit
    /// is `v mod 90 + 10`, three-digit is `v mod 900 + 100`.
    pub const fn from_residue(self, residue: u64) -> u64 {
        self.low() + residue % self.span()
    }

    /// Narrowest class whose range holds every value, if any.
    ///
    /// Note the classes are disjoint, so `[3, 42]` has no class.
    pub fn containing(values: &[u64]) -> Option<WidthClass> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        Self::ALL
            .into_iter()
            .find(|class| min >= class.low() && max < class.high())
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            WidthClass::OneDigit => "1 digit",
            WidthClass::TwoDigit => "2 digits",
            WidthClass::ThreeDigit => "3 digits",
        }
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered sequence of integers with a declared half-open range.
///
/// Every element lies in `[low, high)`; the constructors enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    low: u64,
    high: u64,
    values: Vec<u64>,
}

impl Sample {
    /// Widest declared range a sample may have; scoring allocates one
    /// bucket per admissible value.
    pub const MAX_SPAN: u64 = 1 << 20;

    /// Builds a sample over an explicit range, checking every value.
    pub fn new(values: Vec<u64>, low: u64, high: u64) -> Result<Self, SampleError> {
        if high <= low {
            return Err(SampleError::EmptyRange { low, high });
        }
        if high - low > Self::MAX_SPAN {
            return Err(SampleError::RangeTooWide {
                span: high - low,
                max: Self::MAX_SPAN,
            });
        }
        if let Some(&value) = values.iter().find(|&&v| v < low || v >= high) {
            return Err(SampleError::OutOfRange { value, low, high });
        }
        Ok(Self { low, high, values })
    }

    /// Builds a sample declared over one width class.
    pub fn for_class(values: Vec<u64>, class: WidthClass) -> Result<Self, SampleError> {
        Self::new(values, class.low(), class.high())
    }

    /// Builds a sample whose values are already known to lie in the class.
    pub(crate) fn from_class_unchecked(values: Vec<u64>, class: WidthClass) -> Self {
        debug_assert!(values.iter().all(|v| class.range().contains(v)));
        Self {
            low: class.low(),
            high: class.high(),
            values,
        }
    }

    /// Builds a sample over the narrowest width class holding all values.
    pub fn infer(values: Vec<u64>) -> Result<Self, SampleError> {
        match WidthClass::containing(&values) {
            Some(class) => Self::for_class(values, class),
            None => {
                let value = values.iter().copied().max().unwrap_or_default();
                Err(SampleError::NoWidthClass { value })
            }
        }
    }

    /// Declared lower bound (inclusive).
    #[inline]
    pub fn low(&self) -> u64 {
        self.low
    }

    /// Declared upper bound (exclusive).
    #[inline]
    pub fn high(&self) -> u64 {
        self.high
    }

    /// Number of distinct values the declared range admits.
    #[inline]
    pub fn span(&self) -> u64 {
        self.high - self.low
    }

    /// The width class matching the declared range exactly, if any.
    pub fn width_class(&self) -> Option<WidthClass> {
        WidthClass::ALL
            .into_iter()
            .find(|class| class.low() == self.low && class.high() == self.high)
    }

    /// The values, in draw order.
    #[inline]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the sample holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the sample, returning its values.
    pub fn into_values(self) -> Vec<u64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_ranges() {
        assert_eq!(WidthClass::OneDigit.range(), 0..10);
        assert_eq!(WidthClass::TwoDigit.range(), 10..100);
        assert_eq!(WidthClass::ThreeDigit.range(), 100..1000);
    }

    #[test]
    fn test_residue_mapping() {
        assert_eq!(WidthClass::OneDigit.from_residue(12345), 5);
        assert_eq!(WidthClass::TwoDigit.from_residue(12345), 12345 % 90 + 10);
        assert_eq!(WidthClass::ThreeDigit.from_residue(12345), 12345 % 900 + 100);
        assert_eq!(WidthClass::TwoDigit.from_residue(89), 99);
        assert_eq!(WidthClass::TwoDigit.from_residue(90), 10);
    }

    #[test]
    fn test_containing_picks_narrowest() {
        assert_eq!(WidthClass::containing(&[0, 9]), Some(WidthClass::OneDigit));
        assert_eq!(WidthClass::containing(&[10, 99]), Some(WidthClass::TwoDigit));
        assert_eq!(WidthClass::containing(&[100, 999]), Some(WidthClass::ThreeDigit));
        assert_eq!(WidthClass::containing(&[3, 42]), None);
        assert_eq!(WidthClass::containing(&[1000]), None);
        assert_eq!(WidthClass::containing(&[]), None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let result = Sample::for_class(vec![1, 2, 10], WidthClass::OneDigit);
        assert_eq!(
            result,
            Err(SampleError::OutOfRange {
                value: 10,
                low: 0,
                high: 10
            })
        );
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(matches!(
            Sample::new(vec![], 5, 5),
            Err(SampleError::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_wide_range_rejected() {
        assert!(matches!(
            Sample::new(vec![0], 0, u64::MAX),
            Err(SampleError::RangeTooWide { .. })
        ));
        assert!(Sample::new(vec![0], 0, Sample::MAX_SPAN).is_ok());
    }

    #[test]
    fn test_infer_class() {
        let sample = Sample::infer(vec![150, 999, 100]).unwrap();
        assert_eq!(sample.width_class(), Some(WidthClass::ThreeDigit));
        assert_eq!(sample.len(), 3);

        assert!(matches!(
            Sample::infer(vec![5, 5000]),
            Err(SampleError::NoWidthClass { value: 5000 })
        ));
    }
}
