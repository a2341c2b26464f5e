#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The feature record handed to callers.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Length of [`SolveFeatures::to_vector`].
pub const NUM_FEATURES: usize = 43;

/// Names of the entries of [`SolveFeatures::to_vector`], in order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "num_vars",
    "num_clauses",
    "var_cl_ratio",
    "binary",
    "trinary",
    "horn",
    "vcg_var_min",
    "vcg_var_max",
    "vcg_var_spread",
    "vcg_var_mean",
    "vcg_var_std",
    "vcg_cls_min",
    "vcg_cls_max",
    "vcg_cls_spread",
    "vcg_cls_mean",
    "vcg_cls_std",
    "pnr_var_min",
    "pnr_var_max",
    "pnr_var_spread",
    "pnr_var_mean",
    "pnr_var_std",
    "pnr_cls_min",
    "pnr_cls_max",
    "pnr_cls_spread",
    "pnr_cls_mean",
    "pnr_cls_std",
    "horn_min",
    "horn_max",
    "horn_spread",
    "horn_mean",
    "horn_std",
    "red_size_mean",
    "red_size_var",
    "red_glue_mean",
    "red_glue_var",
    "red_activity_mean",
    "red_activity_var",
    "irred_size_mean",
    "irred_size_var",
    "irred_glue_mean",
    "irred_glue_var",
    "irred_activity_mean",
    "irred_activity_var",
];

/// Summary of one ratio over a population of clauses or variables.
///
/// `std` is the standard deviation divided by the mean, zero when either is
/// negligible.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub spread: f64,
    pub mean: f64,
    pub std: f64,
}

impl MetricStats {
    const fn values(&self) -> [f64; 5] {
        [self.min, self.max, self.spread, self.mean, self.std]
    }
}

/// Mean and variance of size, glue and scaled activity over a clause population.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distrib {
    pub size_mean: f64,
    pub size_var: f64,
    pub glue_mean: f64,
    pub glue_var: f64,
    /// Activity divided by the activity increment at extraction time.
    pub activity_mean: f64,
    pub activity_var: f64,
}

impl Distrib {
    const fn values(&self) -> [f64; 6] {
        [
            self.size_mean,
            self.size_var,
            self.glue_mean,
            self.glue_var,
            self.activity_mean,
            self.activity_var,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolveFeatures {
    /// Variables occurring in at least one irredundant clause.
    pub num_vars: usize,
    /// Irredundant clauses of every size.
    pub num_clauses: usize,
    pub var_cl_ratio: f64,
    /// Fraction of binary irredundant clauses.
    pub binary: f64,
    /// Fraction of ternary irredundant clauses.
    pub trinary: f64,
    /// Fraction of irredundant clauses with at most one positive literal.
    pub horn: f64,

    /// Variable occurrences over `num_clauses`.
    pub vcg_var: MetricStats,
    /// Clause size over `num_vars`.
    pub vcg_cls: MetricStats,
    /// Positive share of a variable's occurrences.
    pub pnr_var: MetricStats,
    /// Positive share of a clause's literals.
    pub pnr_cls: MetricStats,
    /// Horn clause occurrences of a variable over `num_clauses`.
    pub horn_var: MetricStats,

    pub red_cl_distrib: Distrib,
    pub irred_cl_distrib: Distrib,
}

impl SolveFeatures {
    /// Flattens the record into the fixed-size vector described by
    /// [`FEATURE_NAMES`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_vector(&self) -> [f64; NUM_FEATURES] {
        let mut out = [0.0; NUM_FEATURES];
        let head = [
            self.num_vars as f64,
            self.num_clauses as f64,
            self.var_cl_ratio,
            self.binary,
            self.trinary,
            self.horn,
        ];
        let values = head
            .into_iter()
            .chain(self.vcg_var.values())
            .chain(self.vcg_cls.values())
            .chain(self.pnr_var.values())
            .chain(self.pnr_cls.values())
            .chain(self.horn_var.values())
            .chain(self.red_cl_distrib.values())
            .chain(self.irred_cl_distrib.values());
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = value;
        }
        out
    }
}

fn stat_line(f: &mut Formatter<'_>, label: &str, value: impl Display) -> fmt::Result {
    writeln!(f, "|  {label:<28} {value:>18}  |")
}

impl Display for SolveFeatures {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=======================[ Instance Features ]========================="
        )?;
        stat_line(f, FEATURE_NAMES[0], self.num_vars)?;
        stat_line(f, FEATURE_NAMES[1], self.num_clauses)?;
        for (label, value) in FEATURE_NAMES.iter().zip(self.to_vector()).skip(2) {
            stat_line(f, label, format!("{value:.6}"))?;
        }
        writeln!(
            f,
            "====================================================================="
        )
    }
}
