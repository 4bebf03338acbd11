use crate::config::{Direction, SortConfig};
use crate::key::SortKey;
use crate::sorter;
use nanorand::{Rng, WyRand};
use std::fmt::Debug;

/// Test-side view of a key type: deterministic generation from raw bits
/// and a reference ordering independent of the radix machinery.
pub trait TestKey: SortKey + PartialEq + Debug {
    fn from_raw(raw: u64) -> Self;
    fn reference_sort(data: &mut [Self], direction: Direction);
}

macro_rules! int_test_key {
    ($($t:ty),*) => {
        $(
            impl TestKey for $t {
                fn from_raw(raw: u64) -> Self {
                    raw as $t
                }

                fn reference_sort(data: &mut [Self], direction: Direction) {
                    data.sort_unstable();
                    if direction == Direction::Descending {
                        data.reverse();
                    }
                }
            }
        )*
    };
}

int_test_key!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! float_test_key {
    ($($t:ty),*) => {
        $(
            impl TestKey for $t {
                fn from_raw(raw: u64) -> Self {
                    // Finite, sign-varied, duplicate-rich; NaN ordering is
                    // out of contract so none are generated here.
                    (raw as i16) as $t * 0.125
                }

                fn reference_sort(data: &mut [Self], direction: Direction) {
                    data.sort_by(|a, b| a.total_cmp(b));
                    if direction == Direction::Descending {
                        data.reverse();
                    }
                }
            }
        )*
    };
}

float_test_key!(f32, f64);

pub fn gen_keys<K: TestKey>(rng: &mut WyRand, n: usize) -> Vec<K> {
    (0..n).map(|_| K::from_raw(rng.generate::<u64>())).collect()
}

pub fn validate_sort<K: TestKey>(mut input: Vec<K>, config: &SortConfig) {
    let mut expected = input.clone();
    K::reference_sort(&mut expected, config.direction);

    sorter::sort_slice(&mut input, config).unwrap();

    assert_eq!(input, expected, "n={} config={:?}", expected.len(), config);
}

/// Sort correctness over sizes spanning empty, tiny, sub-tile, exact-tile,
/// tile-plus-remainder and multi-tile inputs, plus adversarial patterns.
pub fn sort_comparison_suite<K: TestKey>(config: &SortConfig) {
    let mut rng = WyRand::new_seed(353);
    let tile = config.tile_len();

    for n in [0, 1, 5, 31, tile - 1, tile, tile + 1, 3 * tile, 5 * tile + 17] {
        validate_sort(gen_keys::<K>(&mut rng, n), config);
    }

    let n = 2 * tile + 9;
    let mut sorted = gen_keys::<K>(&mut rng, n);
    K::reference_sort(&mut sorted, Direction::Ascending);
    validate_sort(sorted.clone(), config);
    sorted.reverse();
    validate_sort(sorted, config);
    validate_sort(vec![K::from_raw(0x1234_5678_9ABC_DEF0); n], config);
}
