#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-literal watch lists.
//!
//! Binary and ternary clauses are stored inline in the watch entries of every
//! literal they contain. Long clauses are stored in the arena and watched by
//! their first two literals through a [`ClauseRef`].

use crate::sat::literal::{DoubleLiteral, Literal};
use smallvec::SmallVec;
use std::ops::Index;

/// Offset of a long clause in the clause arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClauseRef(pub u32);

impl ClauseRef {
    #[must_use]
    pub const fn offset(self) -> usize {
        self.0 as usize
    }
}

/// One entry of a literal's watch list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watched<L: Literal = DoubleLiteral> {
    Binary {
        other: L,
        red: bool,
    },
    /// `lit2 < lit3` always holds.
    Ternary {
        lit2: L,
        lit3: L,
        red: bool,
    },
    Long {
        cref: ClauseRef,
    },
    /// Bookkeeping marker owned by the clause database. Not a clause.
    Index {
        idx: u32,
    },
}

impl<L: Literal> Watched<L> {
    #[must_use]
    pub fn ternary(a: L, b: L, red: bool) -> Self {
        let (lit2, lit3) = if a < b { (a, b) } else { (b, a) };
        Self::Ternary { lit2, lit3, red }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchLists<L: Literal = DoubleLiteral>(Vec<SmallVec<[Watched<L>; 6]>>);

impl<L: Literal> WatchLists<L> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![SmallVec::new(); num_vars * 2])
    }

    /// Grows the lists so that every literal of `num_vars` variables has a slot.
    pub fn ensure_num_vars(&mut self, num_vars: usize) {
        let target = num_vars * 2;
        if self.0.len() < target {
            self.0.resize_with(target, SmallVec::new);
        }
    }

    pub fn add(&mut self, lit: L, watched: Watched<L>) {
        self.0[lit.index()].push(watched);
    }

    #[must_use]
    pub fn num_lists(&self) -> usize {
        self.0.len()
    }
}

impl<L: Literal> Index<L> for WatchLists<L> {
    type Output = [Watched<L>];

    fn index(&self, index: L) -> &Self::Output {
        &self.0[index.index()]
    }
}
