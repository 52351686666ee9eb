//! Core types shared by trees and tabulated networks

use std::fmt;

/// Index of one component slot in the series table.
///
/// Slots are distinct even when their component values coincide.
pub type Value = usize;

/// How the children of a node are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Composition {
    /// Resistance is the sum of the children
    #[default]
    Series,
    /// Resistance is the reciprocal of the sum of reciprocals
    Parallel,
}

impl Composition {
    /// The kind a child of this node takes
    pub fn opposite(self) -> Self {
        match self {
            Composition::Series => Composition::Parallel,
            Composition::Parallel => Composition::Series,
        }
    }

    /// Operator used when rendering a composition inline
    pub fn operator(self) -> &'static str {
        match self {
            Composition::Series => " + ",
            Composition::Parallel => " || ",
        }
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composition::Series => write!(f, "series"),
            Composition::Parallel => write!(f, "parallel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_alternates() {
        assert_eq!(Composition::Series.opposite(), Composition::Parallel);
        assert_eq!(Composition::Parallel.opposite(), Composition::Series);
        assert_eq!(Composition::Series.opposite().opposite(), Composition::Series);
    }

    #[test]
    fn test_composition_display() {
        assert_eq!(format!("{}", Composition::Series), "series");
        assert_eq!(format!("{}", Composition::Parallel), "parallel");
        assert_eq!(Composition::default(), Composition::Series);
    }
}
