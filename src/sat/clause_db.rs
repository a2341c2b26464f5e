#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Watch-indexed clause database.
//!
//! Clauses are stored the way a CDCL solver keeps them once the formula has
//! been loaded:
//! - binary clauses live only in the watch lists of both of their literals,
//! - ternary clauses live only in the watch lists of all three literals,
//! - longer clauses are allocated in an arena and watched by their first two
//!   literals.
//!
//! Aggregate counters for binary and ternary clauses are maintained on
//! insertion, so callers never have to rescan the watch lists to count them.
//!
//! Feature extraction does not depend on `ClauseDb` directly but on the
//! read-only [`ClauseSource`] trait, which any solver can implement.

use crate::sat::clause::Clause;
use crate::sat::error::{ClauseDbError, ClauseDbResult};
use crate::sat::literal::{DoubleLiteral, Literal, Variable};
use crate::sat::watch::{ClauseRef, WatchLists, Watched};
use itertools::Itertools;

/// Activity decay applied to the clause activity increment after each conflict.
const DECAY_FACTOR: f64 = 0.95;

/// Activities above this are rescaled to keep them in floating point range.
const RESCALE_LIMIT: f64 = 1e20;

/// Counters for the clauses that only exist as watch entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinTriStats {
    pub irred_bins: usize,
    pub red_bins: usize,
    pub irred_tris: usize,
    pub red_tris: usize,
}

/// Read-only view of a clause database.
///
/// Everything feature extraction needs from a solver: the variable universe,
/// per-literal watch lists, resolution of long clause references, the
/// binary/ternary counters, the long clause populations and the current clause
/// activity increment.
pub trait ClauseSource<L: Literal> {
    fn num_vars(&self) -> usize;

    fn watch_list(&self, lit: L) -> &[Watched<L>];

    /// Resolves a long clause reference.
    ///
    /// # Panics
    ///
    /// Implementations may panic on a reference that does not belong to them.
    fn resolve(&self, cref: ClauseRef) -> &Clause<L>;

    fn bin_tri(&self) -> BinTriStats;

    fn long_irred(&self) -> &[ClauseRef];

    fn long_red(&self) -> &[ClauseRef];

    fn cla_inc(&self) -> f64;

    /// Irredundant clauses of every size.
    fn num_irred_clauses(&self) -> usize {
        let bin_tri = self.bin_tri();
        self.long_irred().len() + bin_tri.irred_bins + bin_tri.irred_tris
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClauseDb<L: Literal = DoubleLiteral> {
    num_vars: usize,
    arena: Vec<Clause<L>>,
    watches: WatchLists<L>,
    long_irred: Vec<ClauseRef>,
    long_red: Vec<ClauseRef>,
    bin_tri: BinTriStats,
    cla_inc: f64,
}

impl<L: Literal> Default for ClauseDb<L> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<L: Literal> ClauseDb<L> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            arena: Vec::new(),
            watches: WatchLists::new(num_vars),
            long_irred: Vec::new(),
            long_red: Vec::new(),
            bin_tri: BinTriStats::default(),
            cla_inc: 1.0,
        }
    }

    /// Adds a fresh variable and returns its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new_var(&mut self) -> Variable {
        let var = self.num_vars as Variable;
        self.num_vars += 1;
        self.watches.ensure_num_vars(self.num_vars);
        var
    }

    /// Stores a clause and attaches its watches.
    ///
    /// Returns the arena reference for long clauses. Binary and ternary clauses
    /// are stored inline in the watch lists and have no reference.
    ///
    /// # Errors
    ///
    /// Rejects empty and unit clauses, literals over unknown variables,
    /// repeated literals and tautologies.
    pub fn add_clause(&mut self, lits: &[L], red: bool) -> ClauseDbResult<Option<ClauseRef>> {
        self.check_clause(lits)?;

        match *lits {
            [a, b] => {
                self.watches.add(a, Watched::Binary { other: b, red });
                self.watches.add(b, Watched::Binary { other: a, red });
                if red {
                    self.bin_tri.red_bins += 1;
                } else {
                    self.bin_tri.irred_bins += 1;
                }
                Ok(None)
            }
            [a, b, c] => {
                self.watches.add(a, Watched::ternary(b, c, red));
                self.watches.add(b, Watched::ternary(a, c, red));
                self.watches.add(c, Watched::ternary(a, b, red));
                if red {
                    self.bin_tri.red_tris += 1;
                } else {
                    self.bin_tri.irred_tris += 1;
                }
                Ok(None)
            }
            _ => {
                let offset =
                    u32::try_from(self.arena.len()).map_err(|_| ClauseDbError::ArenaExhausted)?;
                let cref = ClauseRef(offset);
                self.arena.push(Clause::new(lits, red));
                self.watches.add(lits[0], Watched::Long { cref });
                self.watches.add(lits[1], Watched::Long { cref });
                if red {
                    self.long_red.push(cref);
                } else {
                    self.long_irred.push(cref);
                }
                Ok(Some(cref))
            }
        }
    }

    /// Convenience wrapper over [`ClauseDb::add_clause`] taking DIMACS literals.
    ///
    /// # Errors
    ///
    /// See [`ClauseDb::add_clause`].
    pub fn add_dimacs(&mut self, lits: &[i32], red: bool) -> ClauseDbResult<Option<ClauseRef>> {
        let lits = lits.iter().copied().map(L::from_i32).collect_vec();
        self.add_clause(&lits, red)
    }

    fn check_clause(&self, lits: &[L]) -> ClauseDbResult<()> {
        match lits {
            [] => return Err(ClauseDbError::EmptyClause),
            [unit] => return Err(ClauseDbError::UnitClause(unit.variable())),
            _ => {}
        }

        if let Some(lit) = lits
            .iter()
            .find(|lit| lit.variable() as usize >= self.num_vars)
        {
            return Err(ClauseDbError::VariableOutOfRange {
                var: lit.variable(),
                num_vars: self.num_vars,
            });
        }

        // same-variable literals are adjacent in literal order
        for (a, b) in lits.iter().sorted().tuple_windows() {
            if a == b {
                return Err(ClauseDbError::DuplicateLiteral(a.variable()));
            }
            if a.variable() == b.variable() {
                return Err(ClauseDbError::Tautology(a.variable()));
            }
        }
        Ok(())
    }

    /// Inserts a bookkeeping marker into the watch list of `lit`.
    pub fn add_index_watch(&mut self, lit: L, idx: u32) {
        self.watches.add(lit, Watched::Index { idx });
    }

    fn clause_mut(&mut self, cref: ClauseRef) -> ClauseDbResult<&mut Clause<L>> {
        self.arena
            .get_mut(cref.offset())
            .ok_or(ClauseDbError::UnknownClause(cref.0))
    }

    /// # Errors
    ///
    /// Fails on a reference that was never handed out by this database.
    pub fn set_glue(&mut self, cref: ClauseRef, glue: u32) -> ClauseDbResult<()> {
        self.clause_mut(cref)?.lbd = glue;
        Ok(())
    }

    /// Bumps a long clause by the current activity increment.
    ///
    /// # Errors
    ///
    /// Fails on a reference that was never handed out by this database.
    pub fn bump_clause_activity(&mut self, cref: ClauseRef) -> ClauseDbResult<()> {
        let inc = self.cla_inc;
        let clause = self.clause_mut(cref)?;
        clause.bump_activity(inc);
        if clause.activity() > RESCALE_LIMIT {
            self.rescale_activities();
        }
        Ok(())
    }

    /// Grows the activity increment, which decays every existing activity
    /// relative to future bumps.
    pub fn decay_clause_activities(&mut self) {
        self.cla_inc /= DECAY_FACTOR;
        if self.cla_inc > RESCALE_LIMIT {
            self.rescale_activities();
        }
    }

    fn rescale_activities(&mut self) {
        let factor = RESCALE_LIMIT.recip();
        for clause in &mut self.arena {
            clause.rescale_activity(factor);
        }
        self.cla_inc *= factor;
    }

    #[must_use]
    pub const fn watches(&self) -> &WatchLists<L> {
        &self.watches
    }

    #[must_use]
    pub fn clause(&self, cref: ClauseRef) -> Option<&Clause<L>> {
        self.arena.get(cref.offset())
    }
}

impl<L: Literal> ClauseSource<L> for ClauseDb<L> {
    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn watch_list(&self, lit: L) -> &[Watched<L>] {
        &self.watches[lit]
    }

    fn resolve(&self, cref: ClauseRef) -> &Clause<L> {
        &self.arena[cref.offset()]
    }

    fn bin_tri(&self) -> BinTriStats {
        self.bin_tri
    }

    fn long_irred(&self) -> &[ClauseRef] {
        &self.long_irred
    }

    fn long_red(&self) -> &[ClauseRef] {
        &self.long_red
    }

    fn cla_inc(&self) -> f64 {
        self.cla_inc
    }
}
