//! This crate computes structural and statistical features of a SAT instance
//! held in a solver's watch-indexed clause database, for use by portfolio and
//! algorithm-selection logic.

/// The `sat` module holds the clause database view (literals, clauses, watch
/// lists) and the feature extraction built on top of it.
pub mod sat;
