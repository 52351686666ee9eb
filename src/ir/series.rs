//! Component series and the slot → value table

use crate::error::SearchError;
use crate::ir::ratio::Ratio;
use crate::ir::types::Value;
use std::fmt;

/// Largest slot count the integer series covers
pub const INT_SERIES_CAP: usize = 128;

/// One decade of the E12 preferred values, in tenths
const E12_TENTHS: [u64; 12] = [10, 12, 15, 18, 22, 27, 33, 39, 47, 56, 68, 82];

/// Component series selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Series {
    /// Integer values 1, 2, 3, ...
    #[default]
    Int,
    /// E12 preferred values, extended decade by decade
    E12,
}

impl Series {
    /// Component value of the `index`-th member of the series
    pub fn value(self, index: usize) -> Ratio {
        match self {
            Series::Int => Ratio::from_integer(index as u64 + 1),
            Series::E12 => {
                let base = E12_TENTHS[index % E12_TENTHS.len()];
                let decade = (index / E12_TENTHS.len()) as u32;
                // base / 10 is always representable
                Ratio::new(base, 10)
                    .unwrap_or_else(Ratio::one)
                    .scaled_by_decade(decade)
            }
        }
    }

    /// Largest number of slots this series can assign distinct members to
    pub fn capacity(self) -> usize {
        match self {
            Series::Int => INT_SERIES_CAP,
            Series::E12 => usize::MAX,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::Int => write!(f, "INT"),
            Series::E12 => write!(f, "E12"),
        }
    }
}

/// Immutable mapping from slot index to component value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesTable {
    values: Vec<Ratio>,
}

impl SeriesTable {
    /// Assign the first `n` members of `series` to slots `0..n`
    pub fn from_series(series: Series, n: usize) -> Result<Self, SearchError> {
        if n > series.capacity() {
            return Err(SearchError::InvalidProblem(format!(
                "series {} holds at most {} values, {} slots requested",
                series,
                series.capacity(),
                n
            )));
        }
        Ok(Self {
            values: (0..n).map(|i| series.value(i)).collect(),
        })
    }

    /// Every one of the `n` slots holds the same component value
    pub fn uniform(n: usize, value: Ratio) -> Self {
        Self {
            values: vec![value; n],
        }
    }

    /// Component value of a slot
    pub fn get(&self, slot: Value) -> Option<&Ratio> {
        self.values.get(slot)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ratio> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_series_values() {
        assert_eq!(Series::Int.value(0), Ratio::one());
        assert_eq!(Series::Int.value(4), Ratio::from_integer(5));
    }

    #[test]
    fn test_e12_series_first_decade() {
        assert_eq!(Series::E12.value(0), Ratio::one());
        assert_eq!(Series::E12.value(1), Ratio::new(6, 5).unwrap());
        assert_eq!(Series::E12.value(11), Ratio::new(41, 5).unwrap());
    }

    #[test]
    fn test_e12_series_extends_by_decade() {
        assert_eq!(Series::E12.value(12), Ratio::from_integer(10));
        assert_eq!(Series::E12.value(13), Ratio::from_integer(12));
        assert_eq!(Series::E12.value(24), Ratio::from_integer(100));
    }

    #[test]
    fn test_series_display() {
        assert_eq!(Series::Int.to_string(), "INT");
        assert_eq!(Series::E12.to_string(), "E12");
        assert_eq!(Series::default(), Series::Int);
    }

    #[test]
    fn test_table_from_series() {
        let table = SeriesTable::from_series(Series::Int, 3).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(2), Some(&Ratio::from_integer(3)));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_table_over_capacity() {
        let result = SeriesTable::from_series(Series::Int, INT_SERIES_CAP + 1);
        assert!(matches!(result, Err(SearchError::InvalidProblem(_))));
    }

    #[test]
    fn test_uniform_table() {
        let table = SeriesTable::uniform(4, Ratio::one());
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|v| *v == Ratio::one()));
        assert!(SeriesTable::uniform(0, Ratio::one()).is_empty());
    }
}
