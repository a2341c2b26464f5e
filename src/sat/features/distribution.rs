//! Mean and variance of size, glue and activity over a long clause population.

use crate::sat::clause_db::ClauseSource;
use crate::sat::features::record::Distrib;
use crate::sat::literal::Literal;
use crate::sat::watch::ClauseRef;

/// Size, glue and activity scaled by the current activity increment.
#[allow(clippy::cast_precision_loss)]
fn sample<L, C>(source: &C, cref: ClauseRef, cla_inc: f64) -> [f64; 3]
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
{
    let clause = source.resolve(cref);
    [
        clause.len() as f64,
        f64::from(clause.glue()),
        clause.activity() / cla_inc,
    ]
}

/// An empty population leaves the summary at zero.
///
/// The means are running means, exact for a population of identical values,
/// so such a population has a variance of exactly zero.
#[allow(clippy::cast_precision_loss)]
pub fn calculate_cl_distributions<L, C>(source: &C, clauses: &[ClauseRef]) -> Distrib
where
    L: Literal,
    C: ClauseSource<L> + ?Sized,
{
    if clauses.is_empty() {
        return Distrib::default();
    }

    let cla_inc = source.cla_inc();

    let mut means = [0.0; 3];
    for (seen, &cref) in clauses.iter().enumerate() {
        let count = (seen + 1) as f64;
        for (mean, value) in means.iter_mut().zip(sample(source, cref, cla_inc)) {
            *mean += (value - *mean) / count;
        }
    }

    let mut vars = [0.0; 3];
    for &cref in clauses {
        for ((var, mean), value) in vars.iter_mut().zip(means).zip(sample(source, cref, cla_inc)) {
            *var += (mean - value).powi(2);
        }
    }
    let population = clauses.len() as f64;
    for var in &mut vars {
        *var /= population;
    }

    let [size_mean, glue_mean, activity_mean] = means;
    let [size_var, glue_var, activity_var] = vars;
    Distrib {
        size_mean,
        size_var,
        glue_mean,
        glue_var,
        activity_mean,
        activity_var,
    }
}
