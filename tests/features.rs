use sat_features::sat::clause_db::{ClauseDb, ClauseSource};
use sat_features::sat::features::distribution::calculate_cl_distributions;
use sat_features::sat::features::iterator::{for_all_clauses, for_each_clause};
use sat_features::sat::features::{Distrib, FeatureExtractor, MetricStats, SolveFeatures};
use sat_features::sat::literal::{DoubleLiteral, Literal};

type Db = ClauseDb<DoubleLiteral>;

fn db_from(num_vars: usize, irred: &[&[i32]], red: &[&[i32]]) -> Db {
    let mut db = Db::new(num_vars);
    for clause in irred {
        db.add_dimacs(clause, false).unwrap();
    }
    for clause in red {
        db.add_dimacs(clause, true).unwrap();
    }
    db
}

fn extract(db: &Db) -> SolveFeatures {
    FeatureExtractor::new(db).extract()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn clause_count_matches_visits() {
    let db = db_from(
        6,
        &[
            &[1, 2],
            &[-3, 4],
            &[1, -5, 6],
            &[-2, -3, -4],
            &[1, 2, 3, 4, 5],
            &[-6, 5, -4, 3, -2],
        ],
        &[&[1, 6], &[2, 3, 4], &[-1, -2, -3, -4, -5]],
    );

    let mut visits = 0;
    for_each_clause(&db, |_| visits += 1);

    let bin_tri = db.bin_tri();
    let expected = bin_tri.irred_bins + bin_tri.irred_tris + db.long_irred().len();
    assert_eq!(expected, 6);
    assert_eq!(visits, expected);
    assert_eq!(extract(&db).num_clauses, expected);

    let mut occurrences = 0;
    for_all_clauses(&db, |_| {}, |_: DoubleLiteral, _| occurrences += 1);
    assert_eq!(occurrences, 2 + 2 + 3 + 3 + 5 + 5);
}

#[test]
fn binary_and_ternary_fractions() {
    let mixed = extract(&db_from(5, &[&[1, 2], &[1, 2, 3], &[1, 2, 3, 4, 5], &[-4, 5]], &[]));
    assert!(mixed.binary + mixed.trinary <= 1.0);
    assert!(close(mixed.binary, 0.5));
    assert!(close(mixed.trinary, 0.25));

    let short = extract(&db_from(3, &[&[1, 2], &[-1, 2, 3], &[2, -3]], &[&[1, 2, 3, -4]]));
    assert!(close(short.binary + short.trinary, 1.0));
}

#[test]
fn pnr_extremes() {
    let positive = extract(&db_from(2, &[&[1, 2]], &[]));
    assert!(close(positive.pnr_cls.min, 1.0));
    assert!(close(positive.pnr_cls.max, 1.0));
    assert!(close(positive.pnr_cls.mean, 1.0));

    let negative = extract(&db_from(2, &[&[-1, -2]], &[]));
    assert!(close(negative.pnr_cls.min, 0.0));
    assert!(close(negative.pnr_cls.max, 0.0));
    assert!(close(negative.pnr_cls.mean, 0.0));
    assert!(close(negative.pnr_var.max, 0.0));
}

#[test]
fn horn_fraction() {
    let horn = extract(&db_from(
        5,
        &[&[-1, -2], &[1, -2, -3], &[-1, -2, -3, 4], &[-4, -5]],
        &[&[1, 2, 3]],
    ));
    assert!(close(horn.horn, 1.0));

    let non_horn = extract(&db_from(5, &[&[1, 2], &[1, 2, -3], &[-1, 2, 3, 4, -5]], &[]));
    assert!(close(non_horn.horn, 0.0));
    assert!(close(non_horn.horn_var.max, 0.0));
}

#[test]
fn empty_irredundant_set_is_all_zero() {
    let db = db_from(4, &[], &[&[1, 2], &[1, 2, 3, 4]]);
    let features = extract(&db);

    assert_eq!(features.num_vars, 0);
    assert_eq!(features.num_clauses, 0);
    for stats in [
        features.vcg_cls,
        features.pnr_cls,
        features.vcg_var,
        features.pnr_var,
        features.horn_var,
    ] {
        assert_eq!(stats, MetricStats::default());
    }
    assert_eq!(features.irred_cl_distrib, Distrib::default());
    assert!(features.to_vector().iter().all(|v| v.is_finite()));
    assert!(features.red_cl_distrib.size_mean > 0.0);
}

#[test]
fn empty_database() {
    let features = extract(&Db::new(0));
    assert_eq!(features, SolveFeatures::default());
}

#[test]
fn distribution_singleton() {
    let mut db = Db::new(5);
    let cref = db.add_dimacs(&[1, 2, 3, 4, 5], true).unwrap().unwrap();
    db.set_glue(cref, 3).unwrap();
    db.bump_clause_activity(cref).unwrap();
    db.decay_clause_activities();

    let distrib = calculate_cl_distributions(&db, db.long_red());
    assert_eq!(distrib.size_mean, 5.0);
    assert_eq!(distrib.glue_mean, 3.0);
    assert_eq!(distrib.activity_mean, 1.0 / db.cla_inc());
    assert_eq!(distrib.size_var, 0.0);
    assert_eq!(distrib.glue_var, 0.0);
    assert_eq!(distrib.activity_var, 0.0);

    assert_eq!(calculate_cl_distributions(&db, db.long_irred()), Distrib::default());
}

#[test]
fn identical_population_has_zero_spread() {
    let mut db = Db::new(8);
    for clause in [[1, -2, 8, 4], [2, -3, 7, 5], [5, -6, 4, 8], [6, -7, 3, 1], [7, -8, 3, 2]] {
        let cref = db.add_dimacs(&clause, true).unwrap().unwrap();
        db.set_glue(cref, 7).unwrap();
        db.bump_clause_activity(cref).unwrap();
    }
    db.decay_clause_activities();
    db.decay_clause_activities();

    let distrib = calculate_cl_distributions(&db, db.long_red());
    assert_eq!(distrib.size_mean, 4.0);
    assert_eq!(distrib.size_var, 0.0);
    assert_eq!(distrib.glue_var, 0.0);
    assert_eq!(distrib.activity_var, 0.0);

    let uniform = extract(&db_from(6, &[&[1, 2, 3], &[-4, -5, -6], &[1, -3, 5]], &[]));
    assert_eq!(uniform.vcg_cls.std, 0.0);
    assert_eq!(uniform.vcg_cls.spread, 0.0);
}

#[test]
fn extraction_is_idempotent() {
    let mut db = db_from(
        7,
        &[&[1, -2], &[2, 3, -4], &[-1, 4, 5, -6, 7], &[6, -7]],
        &[&[1, 2, 3, 4], &[-5, -6, -7, 1]],
    );
    for cref in db.long_red().to_vec() {
        db.bump_clause_activity(cref).unwrap();
        db.decay_clause_activities();
    }

    let first = extract(&db).to_vector().map(f64::to_bits);
    let second = extract(&db).to_vector().map(f64::to_bits);
    assert_eq!(first, second);
}

#[test]
#[should_panic(expected = "bookkeeping entry")]
fn bookkeeping_marker_aborts() {
    let mut db = db_from(3, &[&[1, 2, 3]], &[]);
    db.add_index_watch(DoubleLiteral::from_i32(3), 1);
    let _ = extract(&db);
}

#[test]
fn record_serializes() {
    let features = extract(&db_from(3, &[&[1, 2], &[-1, -2, 3]], &[]));
    let json = serde_json::to_string(&features).unwrap();
    let back: SolveFeatures = serde_json::from_str(&json).unwrap();
    assert_eq!(back.num_clauses, 2);
    assert!(close(back.horn, features.horn));
}
