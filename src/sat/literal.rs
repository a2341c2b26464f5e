#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal encodings.
//!
//! A literal is a variable together with a polarity. Every encoding exposes the
//! same dense `index` (`2 * var` for the positive literal, `2 * var + 1` for the
//! negative one), which is what watch lists are indexed by, and its `Ord`
//! agrees with that index. Feature extraction relies on that order to pick a
//! single owner for clauses that are reachable from several watch lists.

use core::cmp::Ordering;
use core::ops::Not;
use std::fmt::Debug;
use std::hash::Hash;

/// Zero-based variable identifier.
pub type Variable = u32;

pub trait Literal: Copy + Debug + Eq + Hash + Ord + Default {
    fn new(var: Variable, polarity: bool) -> Self;
    fn variable(self) -> Variable;

    /// `true` for the unsigned (positive) literal.
    fn polarity(self) -> bool;

    #[must_use]
    fn negated(self) -> Self;

    fn is_positive(self) -> bool {
        self.polarity()
    }

    fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// Dense watch-slot index.
    fn index(self) -> usize {
        self.variable() as usize * 2 + usize::from(self.is_negated())
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self::new((index / 2) as Variable, index % 2 == 0)
    }

    /// Builds a literal from a signed DIMACS-style integer. DIMACS variables are
    /// one-based, so `3` maps to variable 2 and `-1` to the negation of variable 0.
    #[must_use]
    fn from_i32(value: i32) -> Self {
        debug_assert_ne!(value, 0, "0 is not a DIMACS literal");
        let polarity = value.is_positive();
        let var = value.unsigned_abs() - 1;
        Self::new(var, polarity)
    }
}

/// Literal stored as its own watch index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DoubleLiteral(u32);

impl Literal for DoubleLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        if polarity {
            Self(var * 2)
        } else {
            Self(var * 2 + 1)
        }
    }

    fn variable(self) -> Variable {
        self.0 / 2
    }

    fn polarity(self) -> bool {
        self.0 % 2 == 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Not for DoubleLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

/// Literal with the polarity packed into the high bit.
///
/// The raw representation does not sort in watch-index order, so ordering goes
/// through [`Literal::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedLiteral(u32);

impl Literal for PackedLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var & 0x7FFF_FFFF | ((u32::from(polarity)) << 31))
    }

    fn variable(self) -> Variable {
        self.0 & 0x7FFF_FFFF
    }

    fn polarity(self) -> bool {
        (self.0 >> 31) != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 0x8000_0000)
    }
}

impl PartialOrd for PackedLiteral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackedLiteral {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl Not for PackedLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}
