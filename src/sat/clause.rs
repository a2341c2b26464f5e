#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Body of a long clause (four literals or more) as stored in the clause arena.
//!
//! Binary and ternary clauses never get a body: they exist only as watch
//! entries, see [`crate::sat::watch::Watched`].

use crate::sat::literal::{DoubleLiteral, Literal};
use core::ops::Index;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clause<L: Literal = DoubleLiteral> {
    pub literals: SmallVec<[L; 8]>,
    /// Glue (literal block distance). Only meaningful for redundant clauses.
    pub lbd: u32,
    activity: f64,
    red: bool,
}

impl<L: Literal> Clause<L> {
    #[must_use]
    pub fn new(literals: &[L], red: bool) -> Self {
        Self {
            literals: SmallVec::from_slice(literals),
            lbd: 0,
            activity: 0.0,
            red,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    /// Learnt (redundant) rather than part of the original formula.
    #[must_use]
    pub const fn is_red(&self) -> bool {
        self.red
    }

    #[must_use]
    pub const fn glue(&self) -> u32 {
        self.lbd
    }

    #[must_use]
    pub const fn activity(&self) -> f64 {
        self.activity
    }

    pub fn bump_activity(&mut self, increment: f64) {
        self.activity += increment;
    }

    pub fn rescale_activity(&mut self, factor: f64) {
        self.activity *= factor;
    }
}

impl<L: Literal> Index<usize> for Clause<L> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}
