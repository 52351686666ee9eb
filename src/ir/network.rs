//! Immutable series/parallel networks held by the tabulator
//!
//! Networks are shared between the table and every tree that selects them,
//! so they are never mutated after construction. Composites are kept
//! flattened: a child never has the same kind as its parent.

use crate::ir::problem::Problem;
use crate::ir::types::{Composition, Value};
use std::fmt;

/// A series/parallel network over a set of slots
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    /// A single component slot
    Leaf(Value),
    /// Two or more sub-networks combined in series or in parallel
    Composite {
        kind: Composition,
        children: Vec<Network>,
    },
}

impl Network {
    pub fn leaf(slot: Value) -> Self {
        Network::Leaf(slot)
    }

    /// Combine two networks, splicing in children that already have `kind`
    pub fn combine(kind: Composition, a: Network, b: Network) -> Self {
        let mut children = Vec::new();
        for part in [a, b] {
            match part {
                Network::Composite {
                    kind: part_kind,
                    children: part_children,
                } if part_kind == kind => children.extend(part_children),
                other => children.push(other),
            }
        }
        Network::Composite { kind, children }
    }

    /// Kind of the outermost composition, `None` for a leaf
    pub fn kind(&self) -> Option<Composition> {
        match self {
            Network::Leaf(_) => None,
            Network::Composite { kind, .. } => Some(*kind),
        }
    }

    /// Slots used by this network, in left-to-right order
    pub fn slots(&self) -> Vec<Value> {
        let mut slots = Vec::new();
        self.collect_slots(&mut slots);
        slots
    }

    fn collect_slots(&self, out: &mut Vec<Value>) {
        match self {
            Network::Leaf(slot) => out.push(*slot),
            Network::Composite { children, .. } => {
                for child in children {
                    child.collect_slots(out);
                }
            }
        }
    }

    /// True when no composite has a child of its own kind
    pub fn is_alternating(&self) -> bool {
        match self {
            Network::Leaf(_) => true,
            Network::Composite { kind, children } => children.iter().all(|child| {
                child.kind() != Some(*kind) && child.is_alternating()
            }),
        }
    }

    /// Render with component values, e.g. `(1 + (2 || 3))`
    pub fn render(&self, problem: &Problem) -> String {
        match self {
            Network::Leaf(slot) => format!("{}", problem.value(*slot).to_f64()),
            Network::Composite { kind, children } => {
                let parts: Vec<String> = children.iter().map(|c| c.render(problem)).collect();
                format!("({})", parts.join(kind.operator()))
            }
        }
    }
}

impl fmt::Display for Network {
    /// Slot-level rendering, e.g. `(r0 + (r1 || r2))`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Leaf(slot) => write!(f, "r{}", slot),
            Network::Composite { kind, children } => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", kind.operator())?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
