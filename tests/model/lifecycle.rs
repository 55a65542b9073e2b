use paco::model::Model;
use paco::model::paco::PacoModel;

use crate::common::{predecessor, random_permutation, recount};

fn assert_table_matches(model: &PacoModel, length: usize) {
    let resident: Vec<Vec<usize>> = model.population().map(<[usize]>::to_vec).collect();
    let expected = recount(length, &resident);
    for (row, successors) in expected.iter().enumerate() {
        for (successor, &count) in successors.iter().enumerate() {
            assert_eq!(
                model.edges().count(predecessor(row), successor),
                count,
                "edge ({:?}, {successor})",
                predecessor(row)
            );
        }
    }
}

#[test]
fn test_edge_counts_match_population_after_updates() {
    let length = 7;
    let mut rng = fastrand::Rng::with_seed(11);
    let mut model = PacoModel::builder(length)
        .population_size(3)
        .build()
        .unwrap();
    model.initialize();

    for round in 0..40 {
        let batch: Vec<Vec<usize>> = (0..=(round % 3))
            .map(|_| random_permutation(&mut rng, length))
            .collect();
        model.update(&batch);
        assert_table_matches(&model, length);
    }
    assert_eq!(model.population_len(), 3);
}

#[test]
fn test_out_degree_matches_resident_count() {
    let length = 5;
    let mut rng = fastrand::Rng::with_seed(5);
    let mut model = PacoModel::builder(length)
        .population_size(4)
        .build()
        .unwrap();
    model.initialize();

    for admitted in 1..=10usize {
        let permutation = random_permutation(&mut rng, length);
        model.update([&permutation]);
        let resident = admitted.min(4) as u64;
        assert_eq!(model.edges().out_degree(None), resident);

        let total: u64 = (0..length).map(|p| model.edges().out_degree(Some(p))).sum();
        assert_eq!(total, resident * (length as u64 - 1));
    }
}

#[test]
fn test_oldest_permutation_is_evicted_first() {
    let mut model = PacoModel::builder(4)
        .population_size(2)
        .build()
        .unwrap();
    model.initialize();

    let first = vec![0, 1, 2, 3];
    let second = vec![3, 2, 1, 0];
    let third = vec![2, 0, 3, 1];
    model.update([&first]);
    model.update([&second]);
    assert_eq!(model.edges().count(None, 0), 1);

    model.update([&third]);
    assert_eq!(model.population_len(), 2);
    for (a, b) in [(None, 0), (Some(0), 1), (Some(1), 2), (Some(2), 3)] {
        assert_eq!(model.edges().count(a, b), 0, "edge ({a:?}, {b}) still counted");
    }
    assert_eq!(model.edges().count(None, 3), 1);
    assert_eq!(model.edges().count(None, 2), 1);
    assert_table_matches(&model, 4);

    // The next admission replaces `second`.
    model.update([&first]);
    assert_eq!(model.edges().count(None, 3), 0);
    assert_eq!(model.edges().count(None, 0), 1);
    assert_table_matches(&model, 4);
}

#[test]
fn test_batch_order_decides_age() {
    let mut model = PacoModel::builder(3)
        .population_size(2)
        .build()
        .unwrap();
    model.initialize();

    let a = vec![0, 1, 2];
    let b = vec![1, 2, 0];
    let c = vec![2, 0, 1];
    model.update([&a, &b]);
    model.update([&c]);

    let resident: Vec<Vec<usize>> = model.population().map(<[usize]>::to_vec).collect();
    assert!(resident.contains(&b));
    assert!(resident.contains(&c));
    assert!(!resident.contains(&a));
}

#[test]
fn test_empty_update_is_noop() {
    let mut model = PacoModel::builder(3).build().unwrap();
    model.initialize();
    model.update(core::iter::empty::<&Vec<usize>>());
    assert_eq!(model.population_len(), 0);
    assert!(model.edges().is_empty());
}

#[test]
fn test_initialize_resets_state() {
    let length = 4;
    let mut rng = fastrand::Rng::with_seed(3);
    let mut model = PacoModel::builder(length)
        .population_size(2)
        .q0(1.0)
        .beta(0.0)
        .build()
        .unwrap();
    model.initialize();
    for _ in 0..5 {
        let permutation = random_permutation(&mut rng, length);
        model.update([&permutation]);
    }

    model.initialize();
    assert_eq!(model.population_len(), 0);
    assert!(model.edges().is_empty());
    let tau0 = model.config().tau0();
    for successor in 0..length {
        assert!((model.pheromone(None, successor) - tau0).abs() < f64::EPSILON);
        for p in 0..length {
            assert!((model.pheromone(Some(p), successor) - tau0).abs() < f64::EPSILON);
        }
    }

    // Uniform pheromone: greedy ties fall back to the shuffled order.
    let mut firsts = [0u32; 4];
    let mut dest = model.new_candidate();
    for seed in 0..400 {
        model.sample(&mut dest, &mut fastrand::Rng::with_seed(seed));
        firsts[dest[0]] += 1;
    }
    for (value, &count) in firsts.iter().enumerate() {
        assert!(count > 50, "start {value} chosen only {count} times");
    }
}

#[test]
fn test_minimum_samples_needed_for_update() {
    let model = PacoModel::builder(5).build().unwrap();
    assert_eq!(model.minimum_samples_needed_for_update(), 2);
}

#[test]
fn test_scenario_single_resident_dominates_greedy_choice() {
    let mut model = PacoModel::builder(4)
        .population_size(2)
        .q0(1.0)
        .beta(0.0)
        .tau_max(1.0)
        .build()
        .unwrap();
    model.initialize();

    let tau0 = model.config().tau0();
    assert!((tau0 - 1.0 / 3.0).abs() < 1e-12);
    assert!((model.config().pheromone_multiplier() - 1.0 / 3.0).abs() < 1e-12);

    model.update([&vec![0, 1, 2, 3]]);
    assert_eq!(model.edges().count(None, 0), 1);
    assert!((model.pheromone(None, 0) - 2.0 / 3.0).abs() < 1e-12);

    let mut dest = model.new_candidate();
    for seed in 0..50 {
        model.sample(&mut dest, &mut fastrand::Rng::with_seed(seed));
        assert_eq!(dest, vec![0, 1, 2, 3]);
    }

    // A second resident starting elsewhere ties the start edge.
    model.update([&vec![3, 2, 1, 0]]);
    let mut starts = [0u32; 4];
    for seed in 0..200 {
        model.sample(&mut dest, &mut fastrand::Rng::with_seed(seed));
        starts[dest[0]] += 1;
    }
    assert_eq!(starts[1] + starts[2], 0);
    assert!(starts[0] > 0 && starts[3] > 0);
}
