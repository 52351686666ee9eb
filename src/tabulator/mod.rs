//! Tables of small optimal subnetworks and the queries the search runs on them
//!
//! A tabulator maps every slot set of size at most its arity `m` to the
//! distinct resistances realizable on exactly those slots, each with one
//! representative network. The local search consumes it through three
//! operations:
//! - [`Tabulator::lookup`]: all candidates for a slot set (random expansion)
//! - [`Tabulator::binary_search`]: best candidate for one expandable with the
//!   rest of the tree held fixed
//! - [`Tabulator::linear_search`]: best pair of candidates for two expandables
//!
//! Tree resistance is strictly increasing in the resistance of any single
//! expandable (series adds, `a·x/(a+x)` grows with `x`), and candidates are
//! sorted by resistance, so the candidate closest to the target is found by
//! bisecting for the point where the tree crosses the target.

pub mod coder;
pub mod exhaustive;

pub use coder::{Mask, MultisetCoder, MAX_SLOTS};
pub use exhaustive::ExhaustiveTabulator;

use crate::error::SearchError;
use crate::ir::{Network, NodeId, Problem, Ratio, Tree, Value};
use crate::semantics::cost::{cost_of, resistance_with};
use std::sync::Arc;

/// One candidate subnetwork for a slot set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Resistance of the network on its own
    pub resistance: Ratio,
    /// Distance of that resistance from the target, on its own
    pub cost: Ratio,
    pub network: Arc<Network>,
}

/// Read-only source of optimal small subnetworks
pub trait Tabulator {
    /// Largest slot set size the table covers
    fn arity(&self) -> usize;

    /// Coder producing this table's keys
    fn coder(&self) -> &MultisetCoder;

    /// Candidates for a key, sorted by ascending resistance
    fn lookup(&self, key: Mask) -> Option<&[TableEntry]>;

    /// Non-empty candidate list for a multiset of slots
    fn entries_for(&self, hidden: &[Value]) -> Result<&[TableEntry], SearchError> {
        let key = self.coder().encode(hidden)?;
        match self.lookup(key) {
            Some(entries) if !entries.is_empty() => Ok(entries),
            _ => Err(SearchError::TabulatorMiss {
                key,
                size: hidden.len(),
            }),
        }
    }

    /// Candidate for `expandable` minimizing the whole tree's cost.
    ///
    /// Every other node keeps its current resistance. Ties go to the lower
    /// resistance.
    fn binary_search(
        &self,
        problem: &Problem,
        tree: &Tree,
        expandable: NodeId,
    ) -> Result<Arc<Network>, SearchError> {
        let entries = self.entries_for(&tree.node(expandable).hidden)?;
        let (index, _) = bisect(problem, tree, expandable, entries, &[]);
        Ok(entries[index].network.clone())
    }

    /// Jointly optimal candidates for two distinct expandables.
    ///
    /// Scans the first expandable's candidates linearly and bisects the
    /// second's for each. Ties go to the earliest pair.
    fn linear_search(
        &self,
        problem: &Problem,
        tree: &Tree,
        first: NodeId,
        second: NodeId,
    ) -> Result<(Arc<Network>, Arc<Network>), SearchError> {
        if first == second {
            let network = self.binary_search(problem, tree, first)?;
            return Ok((network.clone(), network));
        }
        let first_entries = self.entries_for(&tree.node(first).hidden)?;
        let second_entries = self.entries_for(&tree.node(second).hidden)?;

        let mut best: Option<(Ratio, usize, usize)> = None;
        for (i, entry) in first_entries.iter().enumerate() {
            let fixed = [(first, &entry.resistance)];
            let (j, cost) = bisect(problem, tree, second, second_entries, &fixed);
            let improves = match &best {
                Some((best_cost, _, _)) => cost < *best_cost,
                None => true,
            };
            if improves {
                best = Some((cost, i, j));
            }
        }

        // first_entries is non-empty, so a pair was recorded
        let (_, i, j) = best.unwrap_or((Ratio::zero(), 0, 0));
        Ok((
            first_entries[i].network.clone(),
            second_entries[j].network.clone(),
        ))
    }
}

/// Index and cost of the best entry for `node`, with `fixed` substitutions
/// applied to the rest of the tree.
fn bisect(
    problem: &Problem,
    tree: &Tree,
    node: NodeId,
    entries: &[TableEntry],
    fixed: &[(NodeId, &Ratio)],
) -> (usize, Ratio) {
    let resistance_at = |index: usize| {
        let mut substitutions: Vec<(NodeId, &Ratio)> = fixed.iter().copied().collect();
        substitutions.push((node, &entries[index].resistance));
        resistance_with(problem, tree, &substitutions)
    };

    // First entry whose tree resistance reaches the target
    let (mut lo, mut hi) = (0, entries.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if resistance_at(mid) < *problem.target() {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    let mut best: Option<(usize, Ratio)> = None;
    for index in [lo.checked_sub(1), Some(lo)].into_iter().flatten() {
        if index >= entries.len() {
            continue;
        }
        let cost = cost_of(problem, &resistance_at(index));
        let improves = match &best {
            Some((_, best_cost)) => cost < *best_cost,
            None => true,
        };
        if improves {
            best = Some((index, cost));
        }
    }
    // entries is non-empty, so one of the two neighbours exists
    best.unwrap_or_else(|| (0, cost_of(problem, &resistance_at(0))))
}
