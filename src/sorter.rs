//! Pass orchestration.
//!
//! `sort_slice` runs the full pipeline: one order-preserving cast of the
//! input into its bits image, the global histogram read, one exclusive
//! scan per digit row, then one onesweep pass per digit position,
//! ping-ponging between two buffers. Digit rows where a single digit holds
//! every key move nothing and are skipped. Every allocation — both bits
//! buffers, the histogram table, all status arrays and tickets — happens
//! before the first kernel runs; once passes start the operation either
//! completes or hangs on a violated liveness precondition, never
//! partially.

use crate::config::{Direction, SortConfig};
use crate::error::SortError;
use crate::kernels::bin_scan::{exclusive_scan_row, is_homogenous_row};
use crate::kernels::histogram::global_histogram;
use crate::kernels::lookback::{StatusArray, MAX_OFFSET};
use crate::kernels::onesweep::{onesweep_pass, PassParams};
use crate::key::{KeyBits, SortKey};
use crate::utils::{cdiv, get_tmp_bucket};
use std::mem::swap;
use std::sync::atomic::AtomicU32;

pub(crate) fn sort_slice<K: SortKey>(keys: &mut [K], config: &SortConfig) -> Result<(), SortError> {
    sort_impl(keys, None, config)
}

pub(crate) fn sort_pairs_slice<K: SortKey>(
    keys: &mut [K],
    values: &mut [u32],
    config: &SortConfig,
) -> Result<(), SortError> {
    if keys.len() != values.len() {
        return Err(SortError::LengthMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }
    sort_impl(keys, Some(values), config)
}

fn sort_impl<K: SortKey>(
    keys: &mut [K],
    values: Option<&mut [u32]>,
    config: &SortConfig,
) -> Result<(), SortError> {
    config.validate()?;
    let n = keys.len();
    if n > MAX_OFFSET {
        return Err(SortError::InputTooLarge { len: n });
    }
    if n < 2 {
        return Ok(());
    }

    let descending = config.direction == Direction::Descending;
    let radix_bits = config.radix_bits;
    let digits = config.radix_digits();
    let stages = cdiv(K::Bits::BITS as usize, radix_bits as usize) as u32;
    let tile_len = config.tile_len();
    let groups = cdiv(n, tile_len);
    let workers = config.worker_count();

    // One order-preserving cast per key, hoisted out of the passes.
    let mut front: Vec<K::Bits> = keys
        .iter()
        .map(|&key| {
            let bits = key.to_ordered_bits();
            if descending {
                bits.flip()
            } else {
                bits
            }
        })
        .collect();
    let mut back: Vec<K::Bits> = get_tmp_bucket(n);

    let histogram = global_histogram(&front, radix_bits, stages, tile_len, workers);

    // Offsets per digit position; `None` marks a skipped homogenous row.
    let rows: Vec<Option<Vec<u32>>> = histogram
        .chunks_exact(digits)
        .map(|row| {
            if is_homogenous_row(row) {
                None
            } else {
                let mut offsets = row.to_vec();
                exclusive_scan_row(&mut offsets);
                Some(offsets)
            }
        })
        .collect();
    let live_passes = rows.iter().flatten().count();
    tracing::debug!(n, stages, groups, live_passes, "dispatching onesweep passes");

    // All pass resources exist before the first kernel runs.
    let statuses: Vec<StatusArray> = rows
        .iter()
        .flatten()
        .map(|offsets| {
            let status = StatusArray::new(groups + 1, digits);
            status.seed_base_row(offsets);
            status
        })
        .collect();
    let tickets: Vec<AtomicU32> = (0..live_passes).map(|_| AtomicU32::new(0)).collect();

    let mut value_storage = values.as_deref().map(|v| (v.to_vec(), get_tmp_bucket::<u32>(n)));

    let mut src_buf: &mut [K::Bits] = &mut front;
    let mut dst_buf: &mut [K::Bits] = &mut back;
    let mut value_bufs: Option<(&mut [u32], &mut [u32])> = value_storage
        .as_mut()
        .map(|(a, b)| (&mut a[..], &mut b[..]));

    let mut pass = 0;
    for (stage, offsets) in rows.iter().enumerate() {
        if offsets.is_none() {
            tracing::trace!(stage, "skipping homogenous digit position");
            continue;
        }
        let params = PassParams {
            shift: stage as u32 * radix_bits,
            radix_bits,
            group_threads: config.group_threads,
            items_per_lane: config.items_per_lane,
            group_id_mode: config.group_id_mode,
            workers,
        };
        let value_pair = value_bufs.as_mut().map(|(a, b)| (&a[..], &mut b[..]));
        onesweep_pass(
            &src_buf[..],
            dst_buf,
            value_pair,
            &statuses[pass],
            &tickets[pass],
            &params,
        );
        swap(&mut src_buf, &mut dst_buf);
        if let Some(pair) = &mut value_bufs {
            swap(&mut pair.0, &mut pair.1);
        }
        pass += 1;
    }

    // Undo the cast while copying out of whichever buffer holds the
    // result; an odd number of executed passes ends in the back buffer,
    // which the swaps above have already accounted for.
    for (key, &bits) in keys.iter_mut().zip(src_buf.iter()) {
        let bits = if descending { bits.flip() } else { bits };
        *key = K::from_ordered_bits(bits);
    }
    if let (Some(values), Some((sorted, _))) = (values, &value_bufs) {
        values.copy_from_slice(&sorted[..]);
    }
    Ok(())
}
