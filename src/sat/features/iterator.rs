#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Visits every irredundant clause of a [`ClauseSource`] exactly once.
//!
//! Every clause of size two or more is reachable from the watch lists of
//! several of its literals. Instead of remembering which clauses were already
//! seen, each clause is only processed from one owning literal:
//! - binary: the smaller of its two literals,
//! - ternary: the smallest of its three literals,
//! - long: the smaller of its first two literals, which are the two it is
//!   watched by.

use crate::sat::clause_db::ClauseSource;
use crate::sat::literal::Literal;
use crate::sat::watch::Watched;

/// Logical view of one clause, independent of how it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClauseShape {
    pub size: usize,
    pub pos: usize,
    pub neg: usize,
}

impl ClauseShape {
    pub fn of<'a, L: Literal + 'a>(lits: impl IntoIterator<Item = &'a L>) -> Self {
        let (size, pos) = lits
            .into_iter()
            .fold((0, 0), |(size, pos), lit| {
                (size + 1, pos + usize::from(lit.is_positive()))
            });
        Self {
            size,
            pos,
            neg: size - pos,
        }
    }

    /// At most one positive literal.
    #[must_use]
    pub const fn is_horn(self) -> bool {
        self.pos <= 1
    }

    /// Positive/negative ratio: 0 for all-negative, 1 for all-positive.
    #[must_use]
    pub fn pnr(self) -> f64 {
        pnr(self.pos, self.size)
    }
}

/// `0.5 + (2·pos - size) / (2·size)`, i.e. the positive share of `size`
/// occurrences.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pnr(pos: usize, size: usize) -> f64 {
    let pos = pos as f64;
    let size = size as f64;
    0.5 + (2.0f64.mul_add(pos, -size) / (2.0 * size))
}

/// Calls `each_cl` once per irredundant clause and `each_lit` once per literal
/// occurrence in that clause.
///
/// # Panics
///
/// Panics when a watch list holds a database bookkeeping entry
/// ([`Watched::Index`]); those must be cleared before clauses are enumerated.
pub fn for_all_clauses<L, C, F, G>(source: &C, mut each_cl: F, mut each_lit: G)
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
    F: FnMut(ClauseShape),
    G: FnMut(L, ClauseShape),
{
    for index in 0..source.num_vars() * 2 {
        let lit = L::from_index(index);
        for &watched in source.watch_list(lit) {
            for_one_clause(source, watched, lit, &mut each_cl, &mut each_lit);
        }
    }
}

/// [`for_all_clauses`] without the per-literal callback.
pub fn for_each_clause<L, C, F>(source: &C, each_cl: F)
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
    F: FnMut(ClauseShape),
{
    for_all_clauses(source, each_cl, |_: L, _| {});
}

fn for_one_clause<L, C, F, G>(source: &C, watched: Watched<L>, lit: L, each_cl: &mut F, each_lit: &mut G)
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
    F: FnMut(ClauseShape),
    G: FnMut(L, ClauseShape),
{
    match watched {
        Watched::Binary { other, red } => {
            if red || lit > other {
                return;
            }
            let shape = ClauseShape::of(&[lit, other]);
            each_cl(shape);
            each_lit(lit, shape);
            each_lit(other, shape);
        }
        Watched::Ternary { lit2, lit3, red } => {
            if red || lit > lit2 {
                return;
            }
            debug_assert!(lit2 < lit3);
            let shape = ClauseShape::of(&[lit, lit2, lit3]);
            each_cl(shape);
            each_lit(lit, shape);
            each_lit(lit2, shape);
            each_lit(lit3, shape);
        }
        Watched::Long { cref } => {
            let clause = source.resolve(cref);
            if clause.is_red() || lit != clause[0].min(clause[1]) {
                return;
            }
            let shape = ClauseShape::of(clause.iter());
            each_cl(shape);
            for &cl_lit in clause.iter() {
                each_lit(cl_lit, shape);
            }
        }
        Watched::Index { idx } => {
            unreachable!("bookkeeping entry {idx} in the watch list of {lit:?} during clause traversal")
        }
    }
}
