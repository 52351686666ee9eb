//! Resistance and cost of networks and trees, in exact rationals

use crate::ir::{Child, Composition, Network, NodeId, Problem, Ratio, Tree};

/// Combine component resistances according to `kind`.
///
/// Series sums, parallel folds with successive parallel-combines. No parts
/// at all yields zero.
pub fn combine(kind: Composition, parts: impl IntoIterator<Item = Ratio>) -> Ratio {
    let mut parts = parts.into_iter();
    let Some(first) = parts.next() else {
        return Ratio::zero();
    };
    match kind {
        Composition::Series => parts.fold(first, |acc, r| acc + r),
        Composition::Parallel => parts.fold(first, |acc, r| acc.parallel(&r)),
    }
}

/// Resistance of a tabulated network
pub fn network_resistance(problem: &Problem, network: &Network) -> Ratio {
    match network {
        Network::Leaf(slot) => problem.value(*slot).clone(),
        Network::Composite { kind, children } => combine(
            *kind,
            children.iter().map(|c| network_resistance(problem, c)),
        ),
    }
}

/// Resistance of a whole tree
pub fn tree_resistance(problem: &Problem, tree: &Tree) -> Ratio {
    resistance_with(problem, tree, &[])
}

/// Resistance of a tree with some nodes' resistances replaced.
///
/// Each `(node, r)` substitution makes `node` contribute exactly `r`,
/// whatever its children are. Used to score candidate subnetworks for an
/// expandable without touching the tree.
pub fn resistance_with(problem: &Problem, tree: &Tree, substitutions: &[(NodeId, &Ratio)]) -> Ratio {
    node_resistance(problem, tree, tree.root(), substitutions)
}

fn node_resistance(
    problem: &Problem,
    tree: &Tree,
    id: NodeId,
    substitutions: &[(NodeId, &Ratio)],
) -> Ratio {
    if let Some((_, r)) = substitutions.iter().find(|(node, _)| *node == id) {
        return (*r).clone();
    }
    let node = tree.node(id);
    let values = node.values.iter().map(|&v| problem.value(v).clone());
    let children = node.children.iter().map(|child| match child {
        Child::Owned(child_id) => node_resistance(problem, tree, *child_id, substitutions),
        Child::Tabulated(network) => network_resistance(problem, network),
    });
    combine(node.kind, values.chain(children))
}

/// Cost of a resistance: `|r - t| / t` for the problem's target `t`
pub fn cost_of(problem: &Problem, resistance: &Ratio) -> Ratio {
    resistance.distance_to(problem.target())
}

/// Cost of a tree against the problem's target
pub fn evaluate_cost(problem: &Problem, tree: &Tree) -> Ratio {
    cost_of(problem, &tree_resistance(problem, tree))
}
