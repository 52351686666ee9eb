//! Exhaustive tabulation of small series/parallel networks
//!
//! For every slot set of size `1..=m`, all distinct resistances realizable
//! by a series/parallel network using exactly those slots are enumerated
//! bottom-up: a set's networks are the series and parallel combinations of
//! the networks of each split into two non-empty halves. Splits are
//! canonicalized by putting the lowest slot in the first half.
//!
//! Table size grows with `C(N, m)` and the number of distinct resistances
//! grows roughly exponentially in `m`, so tabulation refuses configurations
//! above [`MAX_TABLE_KEYS`] slot sets.

use crate::error::SearchError;
use crate::ir::{Composition, Network, Problem, Ratio};
use crate::semantics::cost::cost_of;
use crate::tabulator::coder::{Mask, MultisetCoder};
use crate::tabulator::{TableEntry, Tabulator};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Upper bound on the number of slot sets a table may hold
pub const MAX_TABLE_KEYS: u128 = 2_000_000;

/// Tabulator holding every realizable resistance of every small slot set
#[derive(Debug, Clone)]
pub struct ExhaustiveTabulator {
    arity: usize,
    coder: MultisetCoder,
    table: HashMap<Mask, Vec<TableEntry>>,
}

/// Number of subsets of size `1..=k` of `n` items, saturating
fn slot_set_count(n: usize, k: usize) -> u128 {
    let mut total: u128 = 0;
    let mut binom: u128 = 1;
    for i in 1..=k.min(n) {
        binom = binom.saturating_mul((n - i + 1) as u128) / i as u128;
        total = total.saturating_add(binom);
    }
    total
}

impl ExhaustiveTabulator {
    /// Build the table for `problem` covering slot sets of up to `arity` slots.
    ///
    /// Arity above the slot count is clamped to it. Deterministic for a
    /// given problem.
    pub fn tabulate(problem: &Problem, arity: usize) -> Result<Self, SearchError> {
        if arity == 0 {
            return Err(SearchError::InvalidProblem(
                "tabulator arity must be positive".to_string(),
            ));
        }
        let n = problem.size();
        let arity = arity.min(n);
        let coder = MultisetCoder::new(n)?;

        let keys = slot_set_count(n, arity);
        if keys > MAX_TABLE_KEYS {
            return Err(SearchError::InvalidProblem(format!(
                "tabulating {} slots at arity {} needs {} slot sets (limit {})",
                n, arity, keys, MAX_TABLE_KEYS
            )));
        }

        let start = Instant::now();
        let mut table: HashMap<Mask, Vec<TableEntry>> = HashMap::with_capacity(keys as usize);

        let mut level: Vec<Mask> = (0..n).map(Mask::single).collect();
        for &mask in &level {
            let slot = mask.lowest().unwrap_or_default();
            let resistance = problem.value(slot).clone();
            table.insert(
                mask,
                vec![TableEntry {
                    cost: cost_of(problem, &resistance),
                    resistance,
                    network: Arc::new(Network::leaf(slot)),
                }],
            );
        }

        for size in 2..=arity {
            let mut next = Vec::new();
            for &mask in &level {
                let highest = mask.iter().last().unwrap_or_default();
                for slot in (highest + 1)..n {
                    next.push(mask.with(slot));
                }
            }
            for &mask in &next {
                let entries = Self::tabulate_set(problem, &table, mask);
                table.insert(mask, entries);
            }
            debug!(
                size,
                sets = next.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "tabulated slot sets"
            );
            level = next;
        }

        let tabulator = Self {
            arity,
            coder,
            table,
        };
        info!(
            arity,
            sets = tabulator.len(),
            entries = tabulator.entry_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "tabulation complete"
        );
        Ok(tabulator)
    }

    /// Distinct resistances for `mask`, built from its already tabulated subsets
    fn tabulate_set(
        problem: &Problem,
        table: &HashMap<Mask, Vec<TableEntry>>,
        mask: Mask,
    ) -> Vec<TableEntry> {
        let mut found: BTreeMap<Ratio, Network> = BTreeMap::new();
        let Some(lowest) = mask.lowest() else {
            return Vec::new();
        };
        let anchor = Mask::single(lowest);
        let rest = mask.difference(anchor);

        // Enumerate submasks of `rest`; each gives the half holding `lowest`
        let mut sub = rest.bits();
        loop {
            let left = Mask::from_bits(sub).union(anchor);
            if left != mask {
                let right = mask.difference(left);
                if let (Some(left_entries), Some(right_entries)) =
                    (table.get(&left), table.get(&right))
                {
                    for a in left_entries {
                        for b in right_entries {
                            found
                                .entry(&a.resistance + &b.resistance)
                                .or_insert_with(|| {
                                    Network::combine(
                                        Composition::Series,
                                        Network::clone(&a.network),
                                        Network::clone(&b.network),
                                    )
                                });
                            found
                                .entry(a.resistance.parallel(&b.resistance))
                                .or_insert_with(|| {
                                    Network::combine(
                                        Composition::Parallel,
                                        Network::clone(&a.network),
                                        Network::clone(&b.network),
                                    )
                                });
                        }
                    }
                }
            }
            if sub == 0 {
                break;
            }
            sub = (sub - 1) & rest.bits();
        }

        found
            .into_iter()
            .map(|(resistance, network)| TableEntry {
                cost: cost_of(problem, &resistance),
                resistance,
                network: Arc::new(network),
            })
            .collect()
    }

    /// Number of slot sets in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total number of candidate networks across all slot sets
    pub fn entry_count(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }
}

impl Tabulator for ExhaustiveTabulator {
    fn arity(&self) -> usize {
        self.arity
    }

    fn coder(&self) -> &MultisetCoder {
        &self.coder
    }

    fn lookup(&self, key: Mask) -> Option<&[TableEntry]> {
        self.table.get(&key).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Series, SeriesTable};
    use crate::semantics::cost::network_resistance;

    fn unit_problem(n: usize) -> Problem {
        Problem::new(Ratio::one(), SeriesTable::uniform(n, Ratio::one())).unwrap()
    }

    fn resistances(tabulator: &ExhaustiveTabulator, slots: &[usize]) -> Vec<Ratio> {
        tabulator
            .entries_for(slots)
            .unwrap()
            .iter()
            .map(|e| e.resistance.clone())
            .collect()
    }

    #[test]
    fn test_slot_set_count() {
        assert_eq!(slot_set_count(4, 2), 4 + 6);
        assert_eq!(slot_set_count(3, 5), 7);
        assert_eq!(slot_set_count(5, 0), 0);
    }

    #[test]
    fn test_zero_arity_rejected() {
        let problem = unit_problem(2);
        assert!(matches!(
            ExhaustiveTabulator::tabulate(&problem, 0),
            Err(SearchError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_oversized_table_rejected() {
        let problem = Problem::from_series(128, Ratio::one(), Series::Int).unwrap();
        assert!(matches!(
            ExhaustiveTabulator::tabulate(&problem, 5),
            Err(SearchError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_arity_clamped_to_slot_count() {
        let problem = unit_problem(2);
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 5).unwrap();
        assert_eq!(tabulator.arity(), 2);
        assert_eq!(tabulator.len(), 3);
    }

    #[test]
    fn test_single_slot_entries_are_leaves() {
        let problem = Problem::from_series(3, Ratio::one(), Series::Int).unwrap();
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 1).unwrap();
        let entries = tabulator.entries_for(&[2]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(*entries[0].network, Network::leaf(2));
        assert_eq!(entries[0].resistance, Ratio::from_integer(3));
        assert_eq!(entries[0].cost, Ratio::from_integer(2));
    }

    #[test]
    fn test_two_unit_slots() {
        let problem = unit_problem(2);
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 2).unwrap();
        assert_eq!(
            resistances(&tabulator, &[1, 0]),
            vec![Ratio::new(1, 2).unwrap(), Ratio::from_integer(2)]
        );
    }

    #[test]
    fn test_three_unit_slots() {
        let problem = unit_problem(3);
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 3).unwrap();
        assert_eq!(
            resistances(&tabulator, &[0, 1, 2]),
            vec![
                Ratio::new(1, 3).unwrap(),
                Ratio::new(2, 3).unwrap(),
                Ratio::new(3, 2).unwrap(),
                Ratio::from_integer(3),
            ]
        );
    }

    #[test]
    fn test_four_unit_slots_count() {
        // Known count of distinct series/parallel values of four unit resistors
        let problem = unit_problem(4);
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 4).unwrap();
        assert_eq!(resistances(&tabulator, &[0, 1, 2, 3]).len(), 9);
    }

    #[test]
    fn test_entries_are_consistent() {
        let problem = Problem::from_series(4, Ratio::from_integer(2), Series::E12).unwrap();
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 3).unwrap();
        for slots in [vec![0, 1], vec![1, 2, 3], vec![0, 2, 3]] {
            let entries = tabulator.entries_for(&slots).unwrap();
            assert!(entries.windows(2).all(|w| w[0].resistance < w[1].resistance));
            for entry in entries {
                assert_eq!(network_resistance(&problem, &entry.network), entry.resistance);
                assert_eq!(entry.cost, cost_of(&problem, &entry.resistance));
                assert!(entry.network.is_alternating());
                let mut used = entry.network.slots();
                used.sort_unstable();
                assert_eq!(used, slots);
            }
        }
    }

    #[test]
    fn test_table_covers_all_small_sets() {
        let problem = unit_problem(5);
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 2).unwrap();
        assert_eq!(tabulator.len(), 5 + 10);
        assert!(tabulator.entry_count() >= tabulator.len());
        assert!(tabulator.lookup(Mask::from_bits(0b111)).is_none());
    }
}
