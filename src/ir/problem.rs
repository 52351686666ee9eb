//! Problem definition: slots, their component values and the target

use crate::error::SearchError;
use crate::ir::ratio::Ratio;
use crate::ir::series::{Series, SeriesTable};
use crate::ir::types::Value;
use crate::tabulator::coder::MAX_SLOTS;

/// A search problem over `N` slots.
///
/// Holds the series table and target the evaluator reads; built once and
/// passed by reference to every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    target: Ratio,
    series: SeriesTable,
}

impl Problem {
    /// Create a problem over every slot of `series`
    pub fn new(target: Ratio, series: SeriesTable) -> Result<Self, SearchError> {
        if series.is_empty() {
            return Err(SearchError::InvalidProblem(
                "slot count must be positive".to_string(),
            ));
        }
        if series.len() > MAX_SLOTS {
            return Err(SearchError::InvalidProblem(format!(
                "at most {} slots are supported, got {}",
                MAX_SLOTS,
                series.len()
            )));
        }
        if target.is_zero() {
            return Err(SearchError::InvalidProblem(
                "target resistance must be positive".to_string(),
            ));
        }
        if let Some(slot) = series.iter().position(Ratio::is_zero) {
            return Err(SearchError::InvalidProblem(format!(
                "slot {} has a zero component value",
                slot
            )));
        }
        Ok(Self { target, series })
    }

    /// Create a problem over `n` slots taken from a named series
    pub fn from_series(n: usize, target: Ratio, series: Series) -> Result<Self, SearchError> {
        if n == 0 {
            return Err(SearchError::InvalidProblem(
                "slot count must be positive".to_string(),
            ));
        }
        Self::new(target, SeriesTable::from_series(series, n)?)
    }

    /// Number of slots
    pub fn size(&self) -> usize {
        self.series.len()
    }

    pub fn target(&self) -> &Ratio {
        &self.target
    }

    pub fn series(&self) -> &SeriesTable {
        &self.series
    }

    /// Component value of `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is not below [`Problem::size`]; trees only ever
    /// hold slots drawn from `0..size`.
    pub fn value(&self, slot: Value) -> &Ratio {
        match self.series.get(slot) {
            Some(value) => value,
            None => panic!("slot {} out of range for {} slots", slot, self.size()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_from_series() {
        let problem = Problem::from_series(3, Ratio::one(), Series::Int).unwrap();
        assert_eq!(problem.size(), 3);
        assert_eq!(problem.value(2), &Ratio::from_integer(3));
        assert_eq!(problem.target(), &Ratio::one());
    }

    #[test]
    fn test_zero_slots_rejected() {
        assert!(matches!(
            Problem::from_series(0, Ratio::one(), Series::Int),
            Err(SearchError::InvalidProblem(_))
        ));
        assert!(matches!(
            Problem::new(Ratio::one(), SeriesTable::uniform(0, Ratio::one())),
            Err(SearchError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(matches!(
            Problem::from_series(2, Ratio::zero(), Series::Int),
            Err(SearchError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_zero_component_rejected() {
        let series = SeriesTable::uniform(2, Ratio::zero());
        assert!(matches!(
            Problem::new(Ratio::one(), series),
            Err(SearchError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_too_many_slots_rejected() {
        let series = SeriesTable::uniform(MAX_SLOTS + 1, Ratio::one());
        assert!(matches!(
            Problem::new(Ratio::one(), series),
            Err(SearchError::InvalidProblem(_))
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_value_out_of_range_panics() {
        let problem = Problem::from_series(2, Ratio::one(), Series::Int).unwrap();
        problem.value(5);
    }
}
