#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Occurrence counting and the first- and second-moment stages.
//!
//! Every stage takes the record by value and returns it with its own fields
//! filled in. Later stages read what earlier ones wrote: the second-moment
//! stages need the means, and every ratio needs the active variable count.

use crate::sat::clause_db::ClauseSource;
use crate::sat::features::iterator::{for_all_clauses, for_each_clause, pnr, ClauseShape};
use crate::sat::features::record::{MetricStats, SolveFeatures};
use crate::sat::literal::Literal;

/// Occurrences of one variable in irredundant clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarData {
    pub size: usize,
    pub num_pos: usize,
    /// Occurrences in Horn clauses.
    pub horn: usize,
}

impl VarData {
    const fn is_active(&self) -> bool {
        self.size > 0
    }
}

/// Result of the counting pass. Lives for one extraction only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Census {
    pub vars: Vec<VarData>,
    pub horn_clauses: usize,
}

impl Census {
    pub fn active(&self) -> impl Iterator<Item = &VarData> {
        self.vars.iter().filter(|var| var.is_active())
    }

    #[must_use]
    pub fn num_active(&self) -> usize {
        self.active().count()
    }
}

/// Running min, max and sum of one ratio.
#[derive(Debug, Clone, Copy)]
struct Running {
    min: f64,
    max: f64,
    sum: f64,
    seen: bool,
}

impl Running {
    const fn new() -> Self {
        Self {
            min: f64::MAX,
            max: f64::MIN,
            sum: 0.0,
            seen: false,
        }
    }

    fn push(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.seen = true;
    }

    /// An empty population reports zeros rather than its sentinels.
    fn finish(self, population: usize) -> MetricStats {
        if !self.seen {
            return MetricStats::default();
        }
        MetricStats {
            min: self.min,
            max: self.max,
            spread: self.max - self.min,
            mean: mean(self.sum, population),
            std: 0.0,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: f64, population: usize) -> f64 {
    if sum > 0.0 && population > 0 {
        sum / population as f64
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn float_div(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// `sqrt(sq_dev / population) / mean`, or 0 when either the deviation or the
/// mean is within `eps` of zero.
#[allow(clippy::cast_precision_loss)]
fn normalized_std(sq_dev: f64, population: usize, mean: f64, eps: f64) -> f64 {
    if sq_dev > eps && mean > eps && population > 0 {
        (sq_dev / population as f64).sqrt() / mean
    } else {
        0.0
    }
}

/// Size ratio and positive/negative ratio of a clause. `None` for empty clauses.
fn clause_ratios(shape: ClauseShape, num_vars: usize) -> Option<(f64, f64)> {
    if shape.size == 0 {
        return None;
    }
    Some((float_div(shape.size, num_vars), shape.pnr()))
}

/// Size ratio, positive/negative ratio and Horn ratio of an active variable.
fn var_ratios(var: &VarData, num_clauses: usize) -> (f64, f64, f64) {
    (
        float_div(var.size, num_clauses),
        pnr(var.num_pos, var.size),
        float_div(var.horn, num_clauses),
    )
}

/// Counting pass: clause count, Horn clauses, and per-variable occurrences.
pub fn fill_vars_cls<L, C>(source: &C, mut feat: SolveFeatures) -> (SolveFeatures, Census)
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
{
    feat.num_vars = source.num_vars();
    feat.num_clauses = source.num_irred_clauses();

    let mut vars = vec![VarData::default(); feat.num_vars];
    let mut horn_clauses = 0;
    for_all_clauses(
        source,
        |shape| {
            if shape.is_horn() {
                horn_clauses += 1;
            }
        },
        |lit: L, shape| {
            let var = &mut vars[lit.variable() as usize];
            if shape.is_horn() {
                var.horn += 1;
            }
            if lit.is_positive() {
                var.num_pos += 1;
            }
            var.size += 1;
        },
    );

    (feat, Census { vars, horn_clauses })
}

/// Narrows `num_vars` to variables that actually occur and derives the
/// variable/clause ratio from it.
#[must_use]
pub fn count_active_vars(mut feat: SolveFeatures, census: &Census) -> SolveFeatures {
    feat.num_vars = census.num_active();
    if feat.num_vars > 0 {
        feat.var_cl_ratio = float_div(feat.num_vars, feat.num_clauses);
    }
    feat
}

/// Clause-side first moments plus the Horn, binary and ternary fractions.
pub fn calculate_clause_stats<L, C>(source: &C, mut feat: SolveFeatures, census: &Census) -> SolveFeatures
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
{
    let num_vars = feat.num_vars;
    let mut vcg = Running::new();
    let mut pnr_acc = Running::new();
    for_each_clause(source, |shape| {
        if let Some((size_ratio, pnr_ratio)) = clause_ratios(shape, num_vars) {
            vcg.push(size_ratio);
            pnr_acc.push(pnr_ratio);
        }
    });

    feat.vcg_cls = vcg.finish(feat.num_clauses);
    feat.pnr_cls = pnr_acc.finish(feat.num_clauses);
    feat.horn = float_div(census.horn_clauses, feat.num_clauses);

    let bin_tri = source.bin_tri();
    feat.binary = float_div(bin_tri.irred_bins, feat.num_clauses);
    feat.trinary = float_div(bin_tri.irred_tris, feat.num_clauses);
    feat
}

/// Variable-side first moments over active variables.
#[must_use]
pub fn calculate_variable_stats(mut feat: SolveFeatures, census: &Census) -> SolveFeatures {
    if feat.num_vars == 0 {
        return feat;
    }

    let mut vcg = Running::new();
    let mut pnr_acc = Running::new();
    let mut horn = Running::new();
    for var in census.active() {
        let (size_ratio, pnr_ratio, horn_ratio) = var_ratios(var, feat.num_clauses);
        vcg.push(size_ratio);
        pnr_acc.push(pnr_ratio);
        horn.push(horn_ratio);
    }

    feat.vcg_var = vcg.finish(feat.num_vars);
    feat.pnr_var = pnr_acc.finish(feat.num_vars);
    feat.horn_var = horn.finish(feat.num_vars);
    feat
}

/// Clause-side normalised standard deviations. Needs the clause means.
pub fn calculate_extra_clause_stats<L, C>(source: &C, mut feat: SolveFeatures, eps: f64) -> SolveFeatures
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
{
    let num_vars = feat.num_vars;
    let vcg_mean = feat.vcg_cls.mean;
    let pnr_mean = feat.pnr_cls.mean;

    let mut vcg_sq = 0.0;
    let mut pnr_sq = 0.0;
    for_each_clause(source, |shape| {
        if let Some((size_ratio, pnr_ratio)) = clause_ratios(shape, num_vars) {
            vcg_sq += (vcg_mean - size_ratio).powi(2);
            pnr_sq += (pnr_mean - pnr_ratio).powi(2);
        }
    });

    feat.vcg_cls.std = normalized_std(vcg_sq, feat.num_clauses, vcg_mean, eps);
    feat.pnr_cls.std = normalized_std(pnr_sq, feat.num_clauses, pnr_mean, eps);
    feat
}

/// Variable-side normalised standard deviations. Needs the variable means.
#[must_use]
pub fn calculate_extra_var_stats(mut feat: SolveFeatures, census: &Census, eps: f64) -> SolveFeatures {
    if feat.num_vars == 0 {
        return feat;
    }

    let mut vcg_sq = 0.0;
    let mut pnr_sq = 0.0;
    let mut horn_sq = 0.0;
    for var in census.active() {
        let (size_ratio, pnr_ratio, horn_ratio) = var_ratios(var, feat.num_clauses);
        vcg_sq += (feat.vcg_var.mean - size_ratio).powi(2);
        pnr_sq += (feat.pnr_var.mean - pnr_ratio).powi(2);
        horn_sq += (feat.horn_var.mean - horn_ratio).powi(2);
    }

    feat.vcg_var.std = normalized_std(vcg_sq, feat.num_vars, feat.vcg_var.mean, eps);
    feat.pnr_var.std = normalized_std(pnr_sq, feat.num_vars, feat.pnr_var.mean, eps);
    feat.horn_var.std = normalized_std(horn_sq, feat.num_vars, feat.horn_var.mean, eps);
    feat
}
