//! Reproducibility across runs and execution modes.

use tanzo_core::{
    Archetype, Attribute, Distribution, Profile, SimulationConfig, TraitScore, run, simulate,
};

fn profile() -> Profile {
    Profile::new("Kai", "1.0.0")
        .with_archetype(
            Archetype::new("creator")
                .with_attribute(Attribute::distributed(
                    "power",
                    Distribution::normal(5.0, 1.0).unwrap(),
                ))
                .with_attribute(Attribute::distributed(
                    "mood",
                    Distribution::discrete(
                        vec!["low".into(), "medium".into(), "high".into()],
                        vec![0.2, 0.5, 0.3],
                    )
                    .unwrap(),
                )),
        )
        .with_archetype(
            Archetype::new("sage")
                .with_attribute(Attribute::scored("energy", TraitScore::new(6.0).with_variance(1.5)))
                .with_attribute(Attribute::distributed(
                    "drift",
                    Distribution::exponential(0.0, 9.0).unwrap(),
                )),
        )
}

#[test]
fn same_seed_same_snapshots() {
    let config = SimulationConfig::new(200).with_seed(1234);

    let first = run(&profile(), &config).unwrap();
    let second = run(&profile(), &config).unwrap();

    assert_eq!(first.snapshots, second.snapshots);
    assert_eq!(
        simulate(&profile(), &config).unwrap(),
        simulate(&profile(), &config).unwrap()
    );
}

#[test]
fn different_seeds_diverge() {
    let a = run(&profile(), &SimulationConfig::new(50).with_seed(1)).unwrap();
    let b = run(&profile(), &SimulationConfig::new(50).with_seed(2)).unwrap();
    assert_ne!(a.snapshots, b.snapshots);
}

#[test]
fn prefix_is_stable_when_iterations_grow() {
    let short = run(&profile(), &SimulationConfig::new(10).with_seed(77)).unwrap();
    let long = run(&profile(), &SimulationConfig::new(100).with_seed(77)).unwrap();
    assert_eq!(short.snapshots[..], long.snapshots[..10]);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_sequential() {
    let sequential = SimulationConfig::new(5_000).with_seed(99);
    let parallel = sequential.clone().with_parallel(true);

    let a = run(&profile(), &sequential).unwrap();
    let b = run(&profile(), &parallel).unwrap();

    assert_eq!(a.snapshots, b.snapshots);
    assert_eq!(
        simulate(&profile(), &sequential).unwrap(),
        simulate(&profile(), &parallel).unwrap()
    );
}
