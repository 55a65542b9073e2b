use paco::model::Model;
use paco::model::paco::PacoModel;
use paco::sequence::is_permutation;

use crate::common::{Partial, StepCost, random_permutation};

#[test]
fn test_samples_are_permutations() {
    let length = 12;
    let mut rng = fastrand::Rng::with_seed(1);
    let mut model = PacoModel::builder(length)
        .population_size(4)
        .q0(0.3)
        .beta(1.5)
        .build_with(StepCost)
        .unwrap();
    model.initialize();

    let mut dest = model.new_candidate();
    let mut selected = Vec::new();
    for i in 0..1000 {
        model.sample(&mut dest, &mut rng);
        assert!(is_permutation(&dest.order), "sample {i}: {:?}", dest.order);
        assert_eq!(dest.placed, length);

        selected.push(dest.clone());
        if selected.len() == 2 {
            model.update(&selected);
            selected.clear();
        }
    }
}

#[test]
fn test_minimum_length_samples() {
    let mut model = PacoModel::builder(2).build().unwrap();
    model.initialize();
    let mut dest = model.new_candidate();
    let mut rng = fastrand::Rng::with_seed(4);
    for _ in 0..20 {
        model.sample(&mut dest, &mut rng);
        assert!(dest == [0, 1] || dest == [1, 0]);
    }
}

#[test]
fn test_greedy_picks_maximum_desirability() {
    let length = 8;
    let mut rng = fastrand::Rng::with_seed(9);
    let mut model = PacoModel::builder(length)
        .population_size(3)
        .q0(1.0)
        .beta(2.0)
        .build_with(StepCost)
        .unwrap();
    model.initialize();
    for _ in 0..3 {
        let order = random_permutation(&mut rng, length);
        model.update([&Partial::from_order(&order)]);
    }

    let mut dest = model.new_candidate();
    for _ in 0..50 {
        model.sample(&mut dest, &mut rng);
        let order = dest.order.clone();

        let mut remaining: Vec<usize> = (0..length).collect();
        let mut last = None;
        for (step, &chosen) in order.iter().enumerate() {
            let partial = Partial {
                order: order.clone(),
                placed: step,
            };
            let best = remaining
                .iter()
                .map(|&node| model.desirability(last, node, &partial))
                .fold(f64::NEG_INFINITY, f64::max);
            let value = model.desirability(last, chosen, &partial);
            assert!(
                (value - best).abs() < 1e-12,
                "step {step}: chose {chosen} with {value}, best was {best}"
            );
            remaining.retain(|&node| node != chosen);
            last = Some(chosen);
        }
    }
}

#[test]
fn test_greedy_with_distinct_scores_is_deterministic() {
    let mut model = PacoModel::builder(5)
        .population_size(1)
        .q0(1.0)
        .beta(0.0)
        .build()
        .unwrap();
    model.initialize();
    model.update([&vec![2, 4, 1, 0, 3]]);

    let mut dest = model.new_candidate();
    for seed in 0..30 {
        model.sample(&mut dest, &mut fastrand::Rng::with_seed(seed));
        assert_eq!(dest, vec![2, 4, 1, 0, 3]);
    }
}

#[test]
fn test_roulette_follows_desirability() {
    let mut model = PacoModel::builder(3)
        .population_size(1)
        .q0(0.0)
        .beta(0.0)
        .build()
        .unwrap();
    model.initialize();
    model.update([&vec![0, 1, 2]]);

    // Start desirabilities are 1.0, 0.5 and 0.5.
    let mut rng = fastrand::Rng::with_seed(17);
    let mut dest = model.new_candidate();
    let mut starts = [0u32; 3];
    for _ in 0..4000 {
        model.sample(&mut dest, &mut rng);
        starts[dest[0]] += 1;
    }
    assert!((1800..2200).contains(&starts[0]), "start 0: {}", starts[0]);
    assert!((800..1200).contains(&starts[1]), "start 1: {}", starts[1]);
    assert!((800..1200).contains(&starts[2]), "start 2: {}", starts[2]);
}

#[test]
fn test_roulette_reaches_every_element() {
    let length = 6;
    let mut model = PacoModel::builder(length)
        .population_size(1)
        .q0(0.0)
        .beta(0.0)
        .tau_max(0.99)
        .build()
        .unwrap();
    model.initialize();
    model.update([&vec![0, 1, 2, 3, 4, 5]]);

    let mut rng = fastrand::Rng::with_seed(2);
    let mut dest = model.new_candidate();
    let mut seen = vec![[false; 6]; length];
    for _ in 0..2000 {
        model.sample(&mut dest, &mut rng);
        for (position, &value) in dest.iter().enumerate() {
            seen[position][value] = true;
        }
    }
    assert!(seen.iter().flatten().all(|&s| s));
}

#[test]
fn test_same_seed_same_samples() {
    let build = || {
        let mut model = PacoModel::builder(10)
            .population_size(2)
            .q0(0.4)
            .build_with(StepCost)
            .unwrap();
        model.initialize();
        model
    };
    let mut first = build();
    let mut second = build();
    let mut rng_a = fastrand::Rng::with_seed(99);
    let mut rng_b = fastrand::Rng::with_seed(99);

    let mut a = first.new_candidate();
    let mut b = second.new_candidate();
    for _ in 0..20 {
        first.sample(&mut a, &mut rng_a);
        second.sample(&mut b, &mut rng_b);
        assert_eq!(a, b);
        first.update([&a]);
        second.update([&b]);
    }
}
