//! Hill climbing by re-optimizing one or two expandables at a time

use crate::error::SearchError;
use crate::ir::{NodeId, Problem, Ratio, Tree};
use crate::semantics::cost::evaluate_cost;
use crate::tabulator::Tabulator;
use rand::Rng;
use tracing::debug;

/// What one call to [`iteratively_improve`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImproveOutcome {
    /// Cost before the first step, then after every improving step
    pub history: Vec<Ratio>,
    /// Tabulator queries issued, including the final non-improving one
    pub queries: u64,
}

impl ImproveOutcome {
    /// Cost the tree ended with
    pub fn final_cost(&self) -> &Ratio {
        // history always starts with the initial cost
        &self.history[self.history.len() - 1]
    }

    /// Number of strictly improving steps
    pub fn steps(&self) -> u64 {
        self.history.len().saturating_sub(1) as u64
    }
}

/// Re-optimize random expandables until a step fails to lower the cost.
///
/// Each step draws two expandables uniformly with replacement. The same one
/// twice asks the tabulator for its best network with the rest of the tree
/// fixed; two different ones ask for the best pair. The step's networks are
/// installed either way, and the loop ends at the first step whose cost is
/// not strictly lower. With no expandables the tree is left as is.
pub fn iteratively_improve<T, R>(
    problem: &Problem,
    tree: &mut Tree,
    expandables: &[NodeId],
    tabulator: &T,
    rng: &mut R,
) -> Result<ImproveOutcome, SearchError>
where
    T: Tabulator + ?Sized,
    R: Rng,
{
    let mut best_cost = evaluate_cost(problem, tree);
    let mut outcome = ImproveOutcome {
        history: vec![best_cost.clone()],
        queries: 0,
    };
    if expandables.is_empty() {
        return Ok(outcome);
    }

    loop {
        let first = expandables[rng.random_range(0..expandables.len())];
        let second = expandables[rng.random_range(0..expandables.len())];
        if first == second {
            let network = tabulator.binary_search(problem, tree, first)?;
            tree.set_tabulated(first, network);
        } else {
            let (a, b) = tabulator.linear_search(problem, tree, first, second)?;
            tree.set_tabulated(first, a);
            tree.set_tabulated(second, b);
        }
        outcome.queries += 1;

        let cost = evaluate_cost(problem, tree);
        if cost >= best_cost {
            break;
        }
        debug!(
            step = outcome.history.len(),
            from = %best_cost,
            to = %cost,
            "improving step"
        );
        best_cost = cost;
        outcome.history.push(best_cost.clone());
    }
    Ok(outcome)
}
