use crate::config::{Direction, GroupIdMode, SortConfig};
use crate::error::SortError;
use crate::key::SortKey;
use crate::utils::test_utils::{gen_keys, sort_comparison_suite, validate_sort};
use crate::{OnesweepSort, SortBuilder};
use arbitrary_chunks::ArbitraryChunks;
use nanorand::{Rng, WyRand};

fn ascending() -> SortConfig {
    SortConfig::default()
}

fn descending() -> SortConfig {
    SortConfig {
        direction: Direction::Descending,
        ..SortConfig::default()
    }
}

#[test]
pub fn test_u8() {
    sort_comparison_suite::<u8>(&ascending());
    sort_comparison_suite::<u8>(&descending());
}

#[test]
pub fn test_u16() {
    sort_comparison_suite::<u16>(&ascending());
    sort_comparison_suite::<u16>(&descending());
}

#[test]
pub fn test_u32() {
    sort_comparison_suite::<u32>(&ascending());
    sort_comparison_suite::<u32>(&descending());
}

#[test]
pub fn test_u64() {
    sort_comparison_suite::<u64>(&ascending());
    sort_comparison_suite::<u64>(&descending());
}

#[test]
pub fn test_i8() {
    sort_comparison_suite::<i8>(&ascending());
    sort_comparison_suite::<i8>(&descending());
}

#[test]
pub fn test_i16() {
    sort_comparison_suite::<i16>(&ascending());
    sort_comparison_suite::<i16>(&descending());
}

#[test]
pub fn test_i32() {
    sort_comparison_suite::<i32>(&ascending());
    sort_comparison_suite::<i32>(&descending());
}

#[test]
pub fn test_i64() {
    sort_comparison_suite::<i64>(&ascending());
    sort_comparison_suite::<i64>(&descending());
}

#[test]
pub fn test_f32() {
    sort_comparison_suite::<f32>(&ascending());
    sort_comparison_suite::<f32>(&descending());
}

#[test]
pub fn test_f64() {
    sort_comparison_suite::<f64>(&ascending());
    sort_comparison_suite::<f64>(&descending());
}

#[test]
pub fn test_small_tiles_many_groups() {
    // 32-key tiles force hundreds of groups so the lookback protocol is
    // exercised hard, with contention on every digit slot.
    let cfg = SortConfig {
        group_threads: 32,
        items_per_lane: 1,
        ..SortConfig::default()
    };
    sort_comparison_suite::<u32>(&cfg);

    let mut rng = WyRand::new_seed(99);
    validate_sort(gen_keys::<u32>(&mut rng, 20_000), &cfg);
}

#[test]
pub fn test_four_bit_radix() {
    let cfg = SortConfig {
        radix_bits: 4,
        ..SortConfig::default()
    };
    sort_comparison_suite::<u32>(&cfg);
    sort_comparison_suite::<i64>(&cfg);
}

#[test]
pub fn test_twelve_bit_radix() {
    let cfg = SortConfig {
        radix_bits: 12,
        ..SortConfig::default()
    };
    sort_comparison_suite::<u32>(&cfg);
    sort_comparison_suite::<u16>(&cfg);
}

#[test]
pub fn test_hardware_group_ids() {
    let cfg = SortConfig {
        group_threads: 32,
        items_per_lane: 2,
        group_id_mode: GroupIdMode::HardwareIndex,
        ..SortConfig::default()
    };
    sort_comparison_suite::<u32>(&cfg);
}

#[test]
pub fn test_single_worker_cannot_deadlock() {
    // Lookback only ever waits on predecessors that have already published
    // a partial, so even one worker draining all groups must finish.
    let cfg = SortConfig {
        group_threads: 32,
        items_per_lane: 1,
        workers: Some(1),
        ..SortConfig::default()
    };
    let mut rng = WyRand::new_seed(100);
    validate_sort(gen_keys::<u32>(&mut rng, 5_000), &cfg);
}

#[test]
pub fn test_legitimate_max_keys_survive_partial_tail_tile() {
    // 37 keys with a 32-key tile leaves a 5-key tail tile. Keys equal to
    // the all-ones pattern sit at non-tail positions; an in-band padding
    // sentinel would silently drop them, the validity-flag design must not.
    let cfg = SortConfig {
        group_threads: 32,
        items_per_lane: 1,
        ..SortConfig::default()
    };
    let mut rng = WyRand::new_seed(37);
    let mut keys: Vec<u32> = (0..37).map(|_| rng.generate::<u64>() as u32).collect();
    keys[0] = u32::MAX;
    keys[10] = u32::MAX;
    keys[20] = u32::MAX;

    let before = keys.iter().filter(|&&k| k == u32::MAX).count();
    validate_sort(keys.clone(), &cfg);

    crate::sorter::sort_slice(&mut keys, &cfg).unwrap();
    let after = keys.iter().filter(|&&k| k == u32::MAX).count();
    assert_eq!(before, after);
}

#[test]
pub fn test_empty_input_is_a_no_op() {
    let mut keys: Vec<u32> = vec![];
    keys.onesweep_sort().unwrap();
    assert!(keys.is_empty());

    let mut one = vec![42u32];
    one.onesweep_sort().unwrap();
    assert_eq!(one, vec![42]);
}

#[test]
pub fn test_exactly_one_full_tile() {
    let cfg = SortConfig::default();
    let mut rng = WyRand::new_seed(55);
    validate_sort(gen_keys::<u32>(&mut rng, cfg.tile_len()), &cfg);
    validate_sort(gen_keys::<u64>(&mut rng, cfg.tile_len()), &cfg);
}

#[test]
pub fn test_homogenous_digit_positions_are_skipped_correctly() {
    // All keys share their upper three bytes, so only pass 0 moves data;
    // the result must still land back in the caller's slice.
    let mut rng = WyRand::new_seed(60);
    let keys: Vec<u32> = (0..5_000)
        .map(|_| 0xABCD_EF00 | (rng.generate::<u64>() as u32 & 0xFF))
        .collect();
    validate_sort(keys, &SortConfig::default());
}

#[test]
pub fn test_sort_pairs_reorders_values_with_keys() {
    let mut rng = WyRand::new_seed(70);
    let original: Vec<u32> = (0..10_000)
        .map(|_| rng.generate::<u64>() as u32 & 0xFFFF)
        .collect();
    let mut keys = original.clone();
    let mut values: Vec<u32> = (0..original.len() as u32).collect();

    keys.onesweep_sort_builder()
        .with_values(&mut values)
        .sort()
        .unwrap();

    let mut expected = original.clone();
    expected.sort_unstable();
    assert_eq!(keys, expected);
    for (key, &value) in keys.iter().zip(values.iter()) {
        assert_eq!(original[value as usize], *key);
    }
}

#[test]
pub fn test_sort_pairs_descending() {
    let mut rng = WyRand::new_seed(71);
    let original: Vec<i32> = (0..3_000).map(|_| rng.generate::<u64>() as i32).collect();
    let mut keys = original.clone();
    let mut values: Vec<u32> = (0..original.len() as u32).collect();

    keys.onesweep_sort_builder()
        .descending()
        .with_values(&mut values)
        .sort()
        .unwrap();

    for (key, &value) in keys.iter().zip(values.iter()) {
        assert_eq!(original[value as usize], *key);
    }
    for pair in keys.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[test]
pub fn test_sort_pairs_rejects_length_mismatch() {
    let mut keys = vec![3u32, 1, 2];
    let mut values = vec![0u32, 1];
    let result = SortBuilder::new(&mut keys).with_values(&mut values).sort();
    assert!(matches!(
        result,
        Err(SortError::LengthMismatch { keys: 3, values: 2 })
    ));
}

#[test]
pub fn test_builder_rejects_invalid_config() {
    let mut keys = vec![3u32, 1, 2];
    assert!(matches!(
        keys.onesweep_sort_builder().with_radix_bits(7).sort(),
        Err(SortError::InvalidRadixBits(7))
    ));
    assert!(matches!(
        keys.onesweep_sort_builder().with_group_threads(48).sort(),
        Err(SortError::InvalidGroupThreads(48))
    ));
    assert!(matches!(
        keys.onesweep_sort_builder().with_items_per_lane(0).sort(),
        Err(SortError::InvalidItemsPerLane(0))
    ));
}

#[test]
pub fn test_sorted_output_partitions_by_top_digit() {
    // Slice the sorted array by the top-digit counts; each chunk must be
    // uniform in its top digit and the chunks must appear in digit order.
    let mut rng = WyRand::new_seed(80);
    let mut keys: Vec<u32> = (0..8_192).map(|_| rng.generate::<u64>() as u32).collect();

    let mut counts = vec![0usize; 256];
    for &k in &keys {
        counts[(k >> 24) as usize] += 1;
    }

    keys.onesweep_sort().unwrap();

    let mut digit = 0;
    for chunk in keys.arbitrary_chunks(&counts) {
        for &k in chunk {
            assert_eq!((k >> 24) as usize, digit);
        }
        digit += 1;
    }
}

#[test]
pub fn test_descending_is_reverse_of_ascending() {
    let mut rng = WyRand::new_seed(90);
    let keys = gen_keys::<f64>(&mut rng, 4_000);

    let mut up = keys.clone();
    up.onesweep_sort().unwrap();
    let mut down = keys;
    down.onesweep_sort_builder().descending().sort().unwrap();

    up.reverse();
    assert_eq!(
        up.iter().map(|k| k.to_ordered_bits()).collect::<Vec<_>>(),
        down.iter().map(|k| k.to_ordered_bits()).collect::<Vec<_>>()
    );
}
