//! Search trees over slots, stored in a per-restart arena
//!
//! A [`Tree`] owns all of its nodes in one vector and is released in bulk
//! when dropped. Child edges say explicitly whether they point at a node of
//! this arena ([`Child::Owned`]) or at a network shared with the tabulator
//! ([`Child::Tabulated`]); the latter are never mutated by the search.

use crate::ir::network::Network;
use crate::ir::problem::Problem;
use crate::ir::types::{Composition, Value};
use std::fmt;
use std::sync::Arc;

/// Index of a node in its tree (arena).
pub type NodeId = usize;

/// An edge from a node to one of its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// A node owned by the same tree
    Owned(NodeId),
    /// A network borrowed from the tabulator
    Tabulated(Arc<Network>),
}

/// A node of a search tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Slots assigned here that are not yet expanded
    pub values: Vec<Value>,
    /// Slots collapsed here when this node became expandable
    pub hidden: Vec<Value>,
    pub children: Vec<Child>,
    pub kind: Composition,
}

impl Node {
    pub fn new(kind: Composition) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// An expandable stands for its hidden slots through one tabulated child
    pub fn is_expandable(&self) -> bool {
        !self.hidden.is_empty()
    }

    /// The network currently selected for an expandable
    pub fn tabulated_child(&self) -> Option<&Arc<Network>> {
        match self.children.as_slice() {
            [Child::Tabulated(network)] => Some(network),
            _ => None,
        }
    }
}

/// A series/parallel tree whose root is a series composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// A flat tree: one series root holding `values`
    pub fn new(values: Vec<Value>) -> Self {
        let mut root = Node::new(Composition::Series);
        root.values = values;
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new empty owned child of the opposite kind to `parent`
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        let kind = self.nodes[parent].kind.opposite();
        let id = self.nodes.len();
        self.nodes.push(Node::new(kind));
        self.nodes[parent].children.push(Child::Owned(id));
        id
    }

    /// Make `network` the sole child of `id`
    pub fn set_tabulated(&mut self, id: NodeId, network: Arc<Network>) {
        let node = &mut self.nodes[id];
        node.children.clear();
        node.children.push(Child::Tabulated(network));
    }

    /// Copy of the tree that shares nothing with the tabulator
    pub fn deep_clone(&self) -> Tree {
        let nodes = self
            .nodes
            .iter()
            .map(|node| Node {
                values: node.values.clone(),
                hidden: node.hidden.clone(),
                kind: node.kind,
                children: node
                    .children
                    .iter()
                    .map(|child| match child {
                        Child::Owned(id) => Child::Owned(*id),
                        Child::Tabulated(network) => {
                            Child::Tabulated(Arc::new(Network::clone(network)))
                        }
                    })
                    .collect(),
            })
            .collect();
        Tree {
            nodes,
            root: self.root,
        }
    }

    /// Node ids reachable from the root, parents before children
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            for child in self.nodes[id].children.iter().rev() {
                if let Child::Owned(child_id) = child {
                    stack.push(*child_id);
                }
            }
        }
        order
    }

    /// Expandable nodes reachable from the root
    pub fn expandables(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.nodes[id].is_expandable())
            .collect()
    }

    /// All slots the tree accounts for, sorted.
    ///
    /// Unexpanded `values` and expandables' `hidden` slots are counted;
    /// tabulated networks are treated as opaque stand-ins for `hidden`.
    pub fn slots(&self) -> Vec<Value> {
        let mut slots = Vec::new();
        for id in self.preorder() {
            let node = &self.nodes[id];
            slots.extend_from_slice(&node.values);
            slots.extend_from_slice(&node.hidden);
        }
        slots.sort_unstable();
        slots
    }

    /// Slots actually wired into the network, sorted
    pub fn wired_slots(&self) -> Vec<Value> {
        let mut slots = Vec::new();
        for id in self.preorder() {
            let node = &self.nodes[id];
            slots.extend_from_slice(&node.values);
            for child in &node.children {
                if let Child::Tabulated(network) = child {
                    slots.extend(network.slots());
                }
            }
        }
        slots.sort_unstable();
        slots
    }

    /// Root is series and every owned child has the opposite kind of its parent
    pub fn is_alternating(&self) -> bool {
        if self.nodes[self.root].kind != Composition::Series {
            return false;
        }
        self.preorder().into_iter().all(|id| {
            let kind = self.nodes[id].kind;
            self.nodes[id].children.iter().all(|child| match child {
                Child::Owned(child_id) => self.nodes[*child_id].kind == kind.opposite(),
                Child::Tabulated(network) => network.is_alternating(),
            })
        })
    }

    /// Render with component values.
    ///
    /// Single-child nodes are transparent, so an expandable renders as its
    /// selected network.
    pub fn render(&self, problem: &Problem) -> String {
        self.render_node(self.root, problem)
    }

    fn render_node(&self, id: NodeId, problem: &Problem) -> String {
        let node = &self.nodes[id];
        let mut parts: Vec<String> = node
            .values
            .iter()
            .map(|&v| format!("{}", problem.value(v).to_f64()))
            .collect();
        for child in &node.children {
            parts.push(match child {
                Child::Owned(child_id) => self.render_node(*child_id, problem),
                Child::Tabulated(network) => network.render(problem),
            });
        }
        if parts.len() == 1 {
            parts.pop().unwrap_or_default()
        } else {
            format!("({})", parts.join(node.kind.operator()))
        }
    }

    fn fmt_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[id];
        let parts = node.values.len() + node.children.len();
        if parts != 1 {
            write!(f, "(")?;
        }
        let mut first = true;
        for v in &node.values {
            if !first {
                write!(f, "{}", node.kind.operator())?;
            }
            first = false;
            write!(f, "r{}", v)?;
        }
        for child in &node.children {
            if !first {
                write!(f, "{}", node.kind.operator())?;
            }
            first = false;
            match child {
                Child::Owned(child_id) => self.fmt_node(*child_id, f)?,
                Child::Tabulated(network) => write!(f, "{}", network)?,
            }
        }
        if parts != 1 {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, f)
    }
}
