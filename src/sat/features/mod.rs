#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Structural and statistical features of the formula held in a clause database.
//!
//! The features describe the irredundant (original) clauses through their
//! variable-clause graph, polarity balance and Horn structure, and summarise
//! the long redundant and irredundant clause populations through size, glue and
//! activity distributions. They are meant for algorithm selection, e.g. picking
//! a solver configuration from a portfolio.
//!
//! Extraction is a pure read of the database: it runs to completion, allocates
//! only a per-variable counter array that is dropped before returning, and
//! yields the same record every time for an unchanged database.
//!
//! ```
//! use sat_features::sat::clause_db::ClauseDb;
//! use sat_features::sat::features::FeatureExtractor;
//! use sat_features::sat::literal::DoubleLiteral;
//!
//! let mut db = ClauseDb::<DoubleLiteral>::new(3);
//! db.add_dimacs(&[1, -2], false).unwrap();
//! db.add_dimacs(&[-1, 2, 3], false).unwrap();
//!
//! let features = FeatureExtractor::new(&db).extract();
//! assert_eq!(features.num_clauses, 2);
//! assert!((features.binary - 0.5).abs() < 1e-12);
//! ```

pub mod config;
pub mod distribution;
pub mod iterator;
pub mod record;
pub mod stats;

pub use config::FeatureConfig;
pub use record::{Distrib, FEATURE_NAMES, MetricStats, NUM_FEATURES, SolveFeatures};

use crate::sat::clause_db::ClauseSource;
use crate::sat::literal::Literal;
use std::marker::PhantomData;
use std::time::Instant;
use tracing::{debug, info};

/// Computes [`SolveFeatures`] from a [`ClauseSource`].
#[derive(Debug)]
pub struct FeatureExtractor<'a, L: Literal, C: ClauseSource<L> + ?Sized> {
    source: &'a C,
    config: FeatureConfig,
    marker: PhantomData<L>,
}

impl<'a, L: Literal, C: ClauseSource<L> + ?Sized> FeatureExtractor<'a, L, C> {
    #[must_use]
    pub fn new(source: &'a C) -> Self {
        Self::with_config(source, FeatureConfig::default())
    }

    #[must_use]
    pub const fn with_config(source: &'a C, config: FeatureConfig) -> Self {
        Self {
            source,
            config,
            marker: PhantomData,
        }
    }

    /// Runs every stage and returns the finished record.
    ///
    /// # Panics
    ///
    /// Panics if a watch list holds a bookkeeping entry instead of a clause,
    /// see [`iterator::for_all_clauses`].
    #[must_use]
    pub fn extract(&self) -> SolveFeatures {
        let start = Instant::now();
        let eps = self.config.eps;

        let (feat, census) = stats::fill_vars_cls(self.source, SolveFeatures::default());
        let feat = stats::count_active_vars(feat, &census);
        debug!(
            num_vars = feat.num_vars,
            num_clauses = feat.num_clauses,
            horn_clauses = census.horn_clauses,
            "features: counted occurrences"
        );

        let feat = stats::calculate_clause_stats(self.source, feat, &census);
        let feat = stats::calculate_variable_stats(feat, &census);
        debug!(
            vcg_cls_mean = feat.vcg_cls.mean,
            vcg_var_mean = feat.vcg_var.mean,
            pnr_cls_mean = feat.pnr_cls.mean,
            pnr_var_mean = feat.pnr_var.mean,
            horn_mean = feat.horn_var.mean,
            "features: first moments"
        );

        let feat = stats::calculate_extra_clause_stats(self.source, feat, eps);
        let mut feat = stats::calculate_extra_var_stats(feat, &census, eps);
        debug!(
            vcg_cls_std = feat.vcg_cls.std,
            vcg_var_std = feat.vcg_var.std,
            "features: second moments"
        );

        feat.red_cl_distrib =
            distribution::calculate_cl_distributions(self.source, self.source.long_red());
        feat.irred_cl_distrib =
            distribution::calculate_cl_distributions(self.source, self.source.long_irred());

        if self.config.verbosity > 0 {
            info!(
                elapsed = ?start.elapsed(),
                num_vars = feat.num_vars,
                num_clauses = feat.num_clauses,
                "features extracted"
            );
        }
        feat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause_db::ClauseDb;
    use crate::sat::literal::{DoubleLiteral, PackedLiteral};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn small_db<L: Literal>() -> ClauseDb<L> {
        // (x1 v x2) (-x1 v -x2 v x3)
        let mut db = ClauseDb::new(3);
        db.add_dimacs(&[1, 2], false).unwrap();
        db.add_dimacs(&[-1, -2, 3], false).unwrap();
        db
    }

    fn check_small(feat: &SolveFeatures) {
        assert_eq!(feat.num_vars, 3);
        assert_eq!(feat.num_clauses, 2);
        assert!(close(feat.var_cl_ratio, 1.5));
        assert!(close(feat.horn, 0.5));
        assert!(close(feat.binary, 0.5));
        assert!(close(feat.trinary, 0.5));

        assert!(close(feat.vcg_cls.min, 2.0 / 3.0));
        assert!(close(feat.vcg_cls.max, 1.0));
        assert!(close(feat.vcg_cls.spread, 1.0 / 3.0));
        assert!(close(feat.vcg_cls.mean, 5.0 / 6.0));
        assert!(close(feat.vcg_cls.std, 0.2));

        assert!(close(feat.pnr_cls.min, 1.0 / 3.0));
        assert!(close(feat.pnr_cls.max, 1.0));
        assert!(close(feat.pnr_cls.mean, 2.0 / 3.0));
        assert!(close(feat.pnr_cls.std, 0.5));

        assert!(close(feat.vcg_var.min, 0.5));
        assert!(close(feat.vcg_var.max, 1.0));
        assert!(close(feat.vcg_var.mean, 5.0 / 6.0));
        assert!(close(feat.vcg_var.std, 2.0f64.sqrt() / 5.0));

        assert!(close(feat.pnr_var.min, 0.5));
        assert!(close(feat.pnr_var.max, 1.0));
        assert!(close(feat.pnr_var.mean, 2.0 / 3.0));
        assert!(close(feat.pnr_var.std, 2.0f64.sqrt() / 4.0));

        assert!(close(feat.horn_var.min, 0.5));
        assert!(close(feat.horn_var.max, 0.5));
        assert!(close(feat.horn_var.spread, 0.0));
        assert!(close(feat.horn_var.mean, 0.5));
        assert!(close(feat.horn_var.std, 0.0));
    }

    #[test]
    fn test_small_formula() {
        let db = small_db::<DoubleLiteral>();
        check_small(&FeatureExtractor::new(&db).extract());
    }

    #[test]
    fn test_encoding_does_not_matter() {
        let db = small_db::<PackedLiteral>();
        check_small(&FeatureExtractor::new(&db).extract());
    }

    #[test]
    fn test_verbose_extraction_matches_quiet() {
        let db = small_db::<DoubleLiteral>();
        let config = FeatureConfig {
            verbosity: 1,
            ..FeatureConfig::default()
        };
        assert_eq!(
            FeatureExtractor::with_config(&db, config).extract(),
            FeatureExtractor::new(&db).extract()
        );
    }

    #[test]
    fn test_through_trait_object() {
        let db = small_db::<DoubleLiteral>();
        let source: &dyn ClauseSource<DoubleLiteral> = &db;
        check_small(&FeatureExtractor::new(source).extract());
    }
}
