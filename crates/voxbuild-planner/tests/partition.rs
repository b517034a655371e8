use proptest::prelude::*;
use voxbuild_planner::{partition, partition_counts, PartitionError};

#[test]
fn test_even_profile() {
    let parts = partition(&[10.0, 10.0, 10.0, 10.0], 2).unwrap();
    assert_eq!(parts.boundaries(), &[0, 2, 4]);
    assert_eq!(parts.ranges().collect::<Vec<_>>(), vec![0..2, 2..4]);
}

#[test]
fn test_concentrated_mass_leaves_empty_tail() {
    let parts = partition(&[0.0, 0.0, 100.0, 0.0], 3).unwrap();
    assert_eq!(parts.boundaries(), &[0, 3, 4, 4]);
    assert_eq!(parts.range(2), Some(4..4));
}

#[test]
fn test_all_zero_profile() {
    let parts = partition(&[0.0, 0.0, 0.0], 3).unwrap();
    assert_eq!(parts.boundaries(), &[0, 1, 2, 3]);
}

#[test]
fn test_single_part_covers_everything() {
    let parts = partition_counts(&[3, 1, 4, 1, 5], 1).unwrap();
    assert_eq!(parts.boundaries(), &[0, 5]);
}

#[test]
fn test_uneven_counts() {
    // target 6, first reached at index 2
    let parts = partition_counts(&[1, 1, 6, 1, 3], 2).unwrap();
    assert_eq!(parts.boundaries(), &[0, 3, 5]);
}

#[test]
fn test_rejects_bad_input() {
    assert_eq!(partition(&[], 1).unwrap_err(), PartitionError::EmptyCosts);
    assert_eq!(partition(&[1.0], 0).unwrap_err(), PartitionError::ZeroParts);
    assert_eq!(
        partition(&[1.0, 2.0], 3).unwrap_err(),
        PartitionError::TooManyParts { parts: 3, len: 2 }
    );
    assert!(matches!(
        partition(&[1.0, -2.0], 1).unwrap_err(),
        PartitionError::InvalidCost { index: 1, .. }
    ));
    assert!(matches!(
        partition(&[f64::INFINITY], 1).unwrap_err(),
        PartitionError::InvalidCost { index: 0, .. }
    ));
}

fn profile_and_parts() -> impl Strategy<Value = (Vec<u64>, usize)> {
    prop::collection::vec(0u64..100, 1..40)
        .prop_flat_map(|counts| {
            let len = counts.len();
            (Just(counts), 1..=len)
        })
}

proptest! {
    #[test]
    fn prop_boundaries_are_well_formed((counts, parts) in profile_and_parts()) {
        let ranges = partition_counts(&counts, parts).unwrap();
        let b = ranges.boundaries();
        prop_assert_eq!(b.len(), parts + 1);
        prop_assert_eq!(b[0], 0);
        prop_assert_eq!(b[parts], counts.len());
        prop_assert!(b.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_ranges_tile_the_axis((counts, parts) in profile_and_parts()) {
        let ranges = partition_counts(&counts, parts).unwrap();
        let covered: usize = ranges.ranges().map(|r| r.len()).sum();
        prop_assert_eq!(covered, counts.len());
        prop_assert_eq!(ranges.axis_len(), counts.len());
    }

    #[test]
    fn prop_closed_ranges_reach_their_target((counts, parts) in profile_and_parts()) {
        let ranges = partition_counts(&counts, parts).unwrap();
        let target = counts.iter().sum::<u64>() as f64 / parts as f64;
        let b = ranges.boundaries();
        for k in 1..parts {
            if b[k] < counts.len() {
                let running: u64 = counts[..b[k]].iter().sum();
                prop_assert!(running as f64 >= target * k as f64);
            }
        }
    }
}
