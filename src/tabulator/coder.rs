//! Canonical keys for multisets of slots
//!
//! Slots are distinct by construction, so a multiset of slots is a set and
//! a fixed-width bitmask is a canonical, order-independent key for it.

use crate::error::SearchError;
use crate::ir::Value;
use std::fmt;

/// Largest slot count a [`Mask`] can key
pub const MAX_SLOTS: usize = 128;

/// Bitmask key over slots: bit `i` is set when slot `i` is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Mask(u128);

impl Mask {
    pub const EMPTY: Mask = Mask(0);

    pub fn from_bits(bits: u128) -> Self {
        Mask(bits)
    }

    pub fn bits(self) -> u128 {
        self.0
    }

    /// Mask holding only `slot`
    pub fn single(slot: Value) -> Self {
        Mask(1u128 << slot)
    }

    /// Number of slots in the set
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, slot: Value) -> bool {
        slot < MAX_SLOTS && self.0 & (1u128 << slot) != 0
    }

    pub fn with(self, slot: Value) -> Self {
        Mask(self.0 | (1u128 << slot))
    }

    pub fn union(self, other: Mask) -> Self {
        Mask(self.0 | other.0)
    }

    pub fn difference(self, other: Mask) -> Self {
        Mask(self.0 & !other.0)
    }

    /// Lowest slot in the set
    pub fn lowest(self) -> Option<Value> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as Value)
        }
    }

    /// Slots in ascending order
    pub fn iter(self) -> impl Iterator<Item = Value> {
        let mut rest = self.0;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let slot = rest.trailing_zeros() as Value;
            rest &= rest - 1;
            Some(slot)
        })
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, slot) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, "}}")
    }
}

/// Encodes slot multisets of a problem into [`Mask`] keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisetCoder {
    slots: usize,
}

impl MultisetCoder {
    /// Coder for slots `0..slots`
    pub fn new(slots: usize) -> Result<Self, SearchError> {
        if slots > MAX_SLOTS {
            return Err(SearchError::InvalidProblem(format!(
                "at most {} slots can be encoded, got {}",
                MAX_SLOTS, slots
            )));
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Key of a multiset of slots, independent of their order.
    ///
    /// Fails on a slot outside `0..slots` or a slot listed twice.
    pub fn encode(&self, values: &[Value]) -> Result<Mask, SearchError> {
        let mut mask = Mask::EMPTY;
        for &slot in values {
            if slot >= self.slots {
                return Err(SearchError::InvalidProblem(format!(
                    "slot {} out of range for {} slots",
                    slot, self.slots
                )));
            }
            if mask.contains(slot) {
                return Err(SearchError::InvalidProblem(format!(
                    "slot {} appears twice",
                    slot
                )));
            }
            mask = mask.with(slot);
        }
        Ok(mask)
    }
}
