//! Global histogram pass.
//!
//! One full read of the input produces digit counts for every pass at
//! once: each group accumulates a `stages * digits` histogram of its tile
//! in group-local scratch, then folds it into the global table with
//! relaxed atomic adds. Races between groups on the global counters need
//! atomicity only, not ordering — nothing reads the table until the
//! dispatch has joined.

use crate::device::grid::dispatch_groups;
use crate::key::KeyBits;
use crate::utils::cdiv;
use std::sync::atomic::{AtomicU32, Ordering};

/// Count every (pass, digit) pair over `keys`.
///
/// Returns `stages` rows of `1 << radix_bits` counts, row `p` holding the
/// digit counts of pass `p`.
pub(crate) fn global_histogram<B: KeyBits>(
    keys: &[B],
    radix_bits: u32,
    stages: u32,
    tile_len: usize,
    workers: usize,
) -> Vec<u32> {
    let digits = 1usize << radix_bits;
    let mask = (digits - 1) as u64;
    let table_len = digits * stages as usize;
    let table: Vec<AtomicU32> = (0..table_len).map(|_| AtomicU32::new(0)).collect();

    let groups = cdiv(keys.len(), tile_len);
    dispatch_groups(
        groups,
        workers,
        || vec![0u32; table_len],
        |local, group| {
            local.fill(0);
            let start = group * tile_len;
            let tile = &keys[start..(start + tile_len).min(keys.len())];

            for &key in tile {
                for stage in 0..stages {
                    let digit = key.digit(stage * radix_bits, mask);
                    local[stage as usize * digits + digit] += 1;
                }
            }

            for (slot, &count) in table.iter().zip(local.iter()) {
                if count != 0 {
                    slot.fetch_add(count, Ordering::Relaxed);
                }
            }
        },
    );

    table.into_iter().map(AtomicU32::into_inner).collect()
}
