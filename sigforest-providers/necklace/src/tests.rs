//! Unit tests for necklace editing and key reconstruction.

use proptest::prelude::*;
use rstest::rstest;
use sigforest_core::KeyCodec;

use super::*;

fn parse(text: &str) -> Necklace {
    Necklace::new(text.chars().map(|bead| bead == '1')).expect("non-empty")
}

#[rstest]
#[case::already_least("0011", "0011")]
#[case::rotated("1100", "0011")]
#[case::periodic("1010", "0101")]
#[case::single("1", "1")]
#[case::interleaved("10100", "00101")]
fn construction_picks_least_rotation(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(parse(raw).to_string(), expected);
}

#[test]
fn empty_necklace_is_rejected() {
    let err = Necklace::new([]).expect_err("empty input must fail");
    assert!(matches!(err, NecklaceError::Empty));
}

#[rstest]
#[case::front(0, false, "00011")]
#[case::middle(2, true, "00111")]
#[case::append(4, false, "00011")]
#[case::wraps(5, true, "00111")]
fn insert_adds_a_bead(#[case] pos: usize, #[case] bead: bool, #[case] expected: &str) {
    let mut necklace = parse("0011");
    necklace.insert(pos, bead);
    assert_eq!(necklace.to_string(), expected);
}

#[test]
fn remove_keeps_a_bead() {
    let mut necklace = parse("01");
    assert_eq!(necklace.remove(0), Some(false));
    assert_eq!(necklace.to_string(), "1");
    assert_eq!(necklace.remove(0), None);
    assert_eq!(necklace.len(), 1);
}

#[rstest]
#[case::differing("0011", 1, true, "0101")]
#[case::equal_beads("0011", 0, false, "0011")]
#[case::across_the_seam("0011", 3, true, "0101")]
#[case::uniform("111", 1, false, "111")]
fn swap_transposes_differing_neighbours(
    #[case] raw: &str,
    #[case] pos: usize,
    #[case] applied: bool,
    #[case] expected: &str,
) {
    let mut necklace = parse(raw);
    assert_eq!(necklace.swap(pos), applied);
    assert_eq!(necklace.to_string(), expected);
}

#[rstest]
#[case::empty("", KeyFault::Empty)]
#[case::bad_bead("0120", KeyFault::InvalidBead { position: 2, found: '2' })]
#[case::not_least("0110", KeyFault::NotCanonical)]
#[case::whitespace("0 1", KeyFault::InvalidBead { position: 1, found: ' ' })]
fn codec_rejects_malformed_keys(#[case] key: &str, #[case] expected: KeyFault) {
    let err = NecklaceCodec
        .from_key(key)
        .expect_err("key must be rejected");
    match err {
        NecklaceError::InvalidKey { key: rejected, fault } => {
            assert_eq!(rejected, key);
            assert_eq!(fault, expected);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_key_message_names_key_and_fault() {
    let err = NecklaceCodec.from_key("10").expect_err("key is not least");
    assert_eq!(
        err.to_string(),
        "invalid necklace key `10`: key is not the least rotation of its necklace"
    );
}

proptest! {
    #[test]
    fn keys_round_trip_through_the_codec(beads in prop::collection::vec(any::<bool>(), 1..24)) {
        let necklace = Necklace::new(beads.clone()).expect("non-empty");
        let key = NecklaceCodec.key_of(&necklace);
        let rebuilt = NecklaceCodec.from_key(&key).expect("canonical keys reconstruct");
        prop_assert_eq!(NecklaceCodec.key_of(&rebuilt), key);
        prop_assert_eq!(necklace.len(), beads.len());
        prop_assert_eq!(necklace.ones(), beads.iter().filter(|bead| **bead).count());
    }

    #[test]
    fn rotations_share_one_key(
        beads in prop::collection::vec(any::<bool>(), 1..24),
        shift in 0usize..24,
    ) {
        let mut rotated = beads.clone();
        rotated.rotate_left(shift % beads.len());
        let left = Necklace::new(beads).expect("non-empty");
        let right = Necklace::new(rotated).expect("non-empty");
        prop_assert_eq!(left, right);
    }

    #[test]
    fn edits_change_counts_by_one(
        beads in prop::collection::vec(any::<bool>(), 2..24),
        pos in 0usize..32,
        bead in any::<bool>(),
    ) {
        let start = Necklace::new(beads).expect("non-empty");

        let mut grown = start.clone();
        grown.insert(pos, bead);
        prop_assert_eq!(grown.len(), start.len() + 1);
        prop_assert_eq!(grown.ones(), start.ones() + usize::from(bead));

        let mut shrunk = start.clone();
        let removed = shrunk.remove(pos).expect("at least two beads");
        prop_assert_eq!(shrunk.len(), start.len() - 1);
        prop_assert_eq!(shrunk.ones() + usize::from(removed), start.ones());

        let mut swapped = start.clone();
        swapped.swap(pos);
        prop_assert_eq!(swapped.len(), start.len());
        prop_assert_eq!(swapped.ones(), start.ones());
    }
}
