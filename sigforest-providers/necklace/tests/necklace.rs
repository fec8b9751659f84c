#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Integration tests driving [`NecklaceWalk`] directly and through a
//! [`Connector`].
use std::io::Cursor;

use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use sigforest_core::{ConnectorBuilder, KeyCodec, KeyedDisjointSet, PhaseParams, RandomWalk};
use sigforest_providers_necklace::{Necklace, NecklaceCodec, NecklaceError, NecklaceWalkBuilder};

fn necklace(key: &str) -> Necklace {
    NecklaceCodec.from_key(key).expect("key is canonical")
}

#[rstest]
#[case::grows("1", 1, 3)]
#[case::shrinks("0000011", 2, 4)]
#[case::adds_ones("000", 2, 5)]
fn walk_reaches_target_shape(#[case] start: &str, #[case] ones: usize, #[case] len: usize) {
    let walk = NecklaceWalkBuilder::new(ones, len)
        .build()
        .expect("configuration is valid");
    let phase = PhaseParams::new(len, 1.0, 1_000_000);
    let mut rng = SmallRng::seed_from_u64(3);
    let mut item = necklace(start);

    walk.walk(&mut item, &phase, &mut rng)
        .expect("walk must reach the target");

    assert_eq!(item.ones(), ones);
    assert_eq!(item.len(), len);
    assert!(walk.is_target(&item));
}

#[test]
fn walk_without_moves_is_stuck() {
    let walk = NecklaceWalkBuilder::new(2, 2)
        .with_upper_bound(2)
        .build()
        .expect("configuration is valid");
    let phase = PhaseParams::new(2, 1.0, 100);
    let mut rng = SmallRng::seed_from_u64(1);
    let mut item = necklace("11");

    let err = walk
        .walk(&mut item, &phase, &mut rng)
        .expect_err("no edit applies to a full uniform necklace");
    assert!(matches!(err, NecklaceError::Stuck { ref necklace } if necklace == "11"));
}

#[test]
fn walk_gives_up_at_step_limit() {
    let walk = NecklaceWalkBuilder::new(2, 8)
        .build()
        .expect("configuration is valid");
    let phase = PhaseParams::new(8, 1.0, 1);
    let mut rng = SmallRng::seed_from_u64(1);
    let mut item = necklace("0001");

    let err = walk
        .walk(&mut item, &phase, &mut rng)
        .expect_err("one step cannot reach the target");
    assert!(matches!(err, NecklaceError::StepLimit { steps: 1, .. }));
    assert_eq!((item.ones(), item.len()), (2, 5));
}

#[test]
fn zero_step_limit_still_moves_once() {
    let walk = NecklaceWalkBuilder::new(2, 8)
        .build()
        .expect("configuration is valid");
    let phase = PhaseParams::new(8, 1.0, 0);
    let mut rng = SmallRng::seed_from_u64(1);
    let mut item = necklace("0001");

    let err = walk
        .walk(&mut item, &phase, &mut rng)
        .expect_err("one move cannot reach the target");
    assert!(matches!(err, NecklaceError::StepLimit { steps: 1, .. }));
    assert_eq!((item.ones(), item.len()), (2, 5));
}

#[test]
fn seeded_walks_are_reproducible() {
    let walk = NecklaceWalkBuilder::new(2, 6)
        .build()
        .expect("configuration is valid");

    let run = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut item = necklace("0000111");
        let mut trail = Vec::new();
        for _ in 0..20 {
            walk.perform(&mut item, 0.5, &mut rng);
            trail.push(item.to_string());
        }
        trail
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn connector_funnels_one_bead_necklaces_into_the_target() {
    let census = "1\n01\n0001 00001\n";
    let mut set = KeyedDisjointSet::from_reader(NecklaceCodec, "ones", Cursor::new(census))
        .expect("census must load");
    assert_eq!(set.component_count(), 4);

    let walk = NecklaceWalkBuilder::new(1, 3)
        .build()
        .expect("configuration is valid");
    let report = ConnectorBuilder::new()
        .with_target_size(3)
        .with_attempts(5)
        .with_seed(9)
        .build()
        .expect("configuration is valid")
        .run(&mut set, &walk)
        .expect("run must succeed");

    assert!(report.connected());
    assert_eq!(report.sweep_merges, 4);
    assert_eq!(report.stalled_walks, 0);
    assert_eq!(set.len(), 5);

    let only = set.components().expect("one component remains");
    assert_eq!(only.representative_key(&set), "001");
    assert_eq!(only.size(&set), 5);
}
