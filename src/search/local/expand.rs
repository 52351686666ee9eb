//! Random construction of series/parallel trees over slots

use crate::error::SearchError;
use crate::ir::{Child, NodeId, Tree};
use crate::tabulator::Tabulator;
use rand::Rng;

/// Expand `node` into a random tree whose small groups are expandables.
///
/// A node holding at most `arity` slots becomes an expandable: its slots
/// move to `hidden` and a uniformly random tabulated network for them is
/// attached as its only child. A larger node deals its slots one by one to
/// a uniformly chosen child, where choosing one past the last child opens
/// a new one, then expands every child in order.
///
/// Every expandable created is appended to `expandables`.
///
/// # Errors
/// `InvalidProblem` if the node holds no slots, `TabulatorMiss` if the
/// tabulator lacks a slot set of size at most `arity`.
pub fn randomly_expand<T, R>(
    tree: &mut Tree,
    node: NodeId,
    arity: usize,
    tabulator: &T,
    rng: &mut R,
    expandables: &mut Vec<NodeId>,
) -> Result<(), SearchError>
where
    T: Tabulator + ?Sized,
    R: Rng,
{
    let values = std::mem::take(&mut tree.node_mut(node).values);
    if values.is_empty() {
        return Err(SearchError::InvalidProblem(format!(
            "node {} has no slots to expand",
            node
        )));
    }

    if values.len() <= arity {
        let entries = tabulator.entries_for(&values)?;
        let chosen = entries[rng.random_range(0..entries.len())].network.clone();
        tree.node_mut(node).hidden = values;
        tree.set_tabulated(node, chosen);
        expandables.push(node);
        return Ok(());
    }

    let mut children: Vec<NodeId> = tree
        .node(node)
        .children
        .iter()
        .filter_map(|child| match child {
            Child::Owned(id) => Some(*id),
            Child::Tabulated(_) => None,
        })
        .collect();
    for value in values {
        let j = rng.random_range(0..=children.len());
        if j == children.len() {
            children.push(tree.add_child(node));
        }
        tree.node_mut(children[j]).values.push(value);
    }

    for child in children {
        randomly_expand(tree, child, arity, tabulator, rng, expandables)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Composition, Problem, Ratio, Series, SeriesTable};
    use crate::tabulator::ExhaustiveTabulator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn unit_problem(n: usize) -> Problem {
        Problem::new(Ratio::one(), SeriesTable::uniform(n, Ratio::one())).unwrap()
    }

    fn expand(problem: &Problem, arity: usize, seed: u64) -> (Tree, Vec<NodeId>) {
        let tabulator = ExhaustiveTabulator::tabulate(problem, arity).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut tree = Tree::new((0..problem.size()).collect());
        let mut expandables = Vec::new();
        let root = tree.root();
        randomly_expand(&mut tree, root, arity, &tabulator, &mut rng, &mut expandables).unwrap();
        (tree, expandables)
    }

    #[test]
    fn test_small_root_becomes_expandable() {
        let problem = unit_problem(3);
        let (tree, expandables) = expand(&problem, 3, 1);
        let root = tree.node(tree.root());
        assert_eq!(expandables, vec![tree.root()]);
        assert!(root.values.is_empty());
        assert_eq!(root.hidden, vec![0, 1, 2]);
        assert!(root.tabulated_child().is_some());
    }

    #[test]
    fn test_slot_conservation() {
        let problem = Problem::from_series(12, Ratio::from_integer(7), Series::E12).unwrap();
        for seed in 0..40 {
            let (tree, expandables) = expand(&problem, 2, seed);
            assert_eq!(tree.slots(), (0..12).collect::<Vec<_>>(), "seed {}", seed);
            assert_eq!(tree.wired_slots(), (0..12).collect::<Vec<_>>(), "seed {}", seed);
            let hidden: usize = expandables.iter().map(|&e| tree.node(e).hidden.len()).sum();
            assert_eq!(hidden, 12);
        }
    }

    #[test]
    fn test_alternation() {
        let problem = unit_problem(10);
        for seed in 0..40 {
            let (tree, _) = expand(&problem, 3, seed);
            assert!(tree.is_alternating(), "seed {}", seed);
            assert_eq!(tree.node(tree.root()).kind, Composition::Series);
        }
    }

    #[test]
    fn test_node_shapes_after_expansion() {
        let problem = unit_problem(9);
        for seed in 0..20 {
            let (tree, expandables) = expand(&problem, 2, seed);
            assert_eq!(tree.expandables(), expandables);
            for id in tree.preorder() {
                let node = tree.node(id);
                assert!(node.values.is_empty());
                if node.is_expandable() {
                    assert!(node.hidden.len() <= 2);
                    assert_eq!(node.children.len(), 1);
                    assert!(node.tabulated_child().is_some());
                } else {
                    assert!(!node.children.is_empty());
                    assert!(node.children.iter().all(|c| matches!(c, Child::Owned(_))));
                }
            }
        }
    }

    #[test]
    fn test_empty_node_rejected() {
        let problem = unit_problem(2);
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut tree = Tree::new(vec![]);
        let root = tree.root();
        let result = randomly_expand(&mut tree, root, 2, &tabulator, &mut rng, &mut Vec::new());
        assert!(matches!(result, Err(SearchError::InvalidProblem(_))));
    }

    #[test]
    fn test_arity_above_table_misses() {
        let problem = unit_problem(3);
        let tabulator = ExhaustiveTabulator::tabulate(&problem, 2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut tree = Tree::new(vec![0, 1, 2]);
        let root = tree.root();
        let result = randomly_expand(&mut tree, root, 3, &tabulator, &mut rng, &mut Vec::new());
        assert!(matches!(result, Err(SearchError::TabulatorMiss { size: 3, .. })));
    }

    #[test]
    fn test_same_seed_same_tree() {
        let problem = unit_problem(8);
        let (a, _) = expand(&problem, 2, 99);
        let (b, _) = expand(&problem, 2, 99);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }
}
