use paco::model::Model;
use paco::model::paco::PacoModel;

use crate::common::random_permutation;

#[test]
fn test_pheromone_stays_within_bounds() {
    let length = 6;
    let mut rng = fastrand::Rng::with_seed(21);

    for population_size in 1..=5 {
        let mut model = PacoModel::builder(length)
            .population_size(population_size)
            .tau_max(0.8)
            .build()
            .unwrap();
        model.initialize();
        let tau0 = model.config().tau0();
        let tau_max = model.config().tau_max();

        for _ in 0..30 {
            let permutation = random_permutation(&mut rng, length);
            model.update([&permutation]);

            for successor in 0..length {
                let predecessors = core::iter::once(None).chain((0..length).map(Some));
                for predecessor in predecessors {
                    let tau = model.pheromone(predecessor, successor);
                    assert!(tau >= tau0, "K={population_size}: {tau} below {tau0}");
                    assert!(
                        tau <= tau_max + 1e-12,
                        "K={population_size}: {tau} above {tau_max}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_full_agreement_reaches_tau_max() {
    let length = 5;
    let permutation = vec![4, 2, 0, 3, 1];

    for population_size in 1..=5 {
        let mut model = PacoModel::builder(length)
            .population_size(population_size)
            .build()
            .unwrap();
        model.initialize();
        for _ in 0..population_size {
            model.update([&permutation]);
        }

        let tau_max = model.config().tau_max();
        assert!((model.pheromone(None, 4) - tau_max).abs() < 1e-12);
        assert!((model.pheromone(Some(2), 0) - tau_max).abs() < 1e-12);
        assert!((model.pheromone(Some(0), 2) - model.config().tau0()).abs() < 1e-12);
    }
}

#[test]
fn test_pheromone_grows_with_count() {
    let mut model = PacoModel::builder(4)
        .population_size(3)
        .build()
        .unwrap();
    model.initialize();

    let mut previous = model.pheromone(Some(1), 2);
    for permutation in [vec![1, 2, 0, 3], vec![0, 1, 2, 3], vec![3, 1, 2, 0]] {
        model.update([&permutation]);
        let tau = model.pheromone(Some(1), 2);
        assert!(tau > previous);
        previous = tau;
    }
    assert_eq!(model.edges().count(Some(1), 2), 3);
}
