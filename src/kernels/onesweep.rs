//! Onesweep sort pass.
//!
//! One global sweep of work groups per digit position. Each group, in
//! strict phase order:
//!
//! 1. claims its tile (dispatch index or dynamic ticket),
//! 2. loads the tile; a short final tile is handled by its length and by
//!    validity masks in the ballot windows, never by a sentinel key value,
//! 3. ranks keys warp by warp with match-based digit voting,
//! 4. scans warp counters into group-wide digit offsets,
//! 5. publishes its per-digit counts as partials, then resolves its global
//!    digit bases by decoupled lookback,
//! 6. stages keys into group-sorted order in scratch,
//! 7. scatters staging directly to the key's final position for this pass.
//!
//! Staging index `i` of digit `d` lands at `global_base[d] + (i -
//! bin_excl[d])`, the original's "global fix" applied at scatter time.

use crate::config::GroupIdMode;
use crate::device::ballot::{lanes_below, match_lanes, WARP_LANES};
use crate::device::grid::dispatch_groups;
use crate::device::scratch::SweepScratch;
use crate::device::SharedOut;
use crate::kernels::lookback::StatusArray;
use crate::key::KeyBits;
use crate::utils::cdiv;
use std::sync::atomic::{AtomicU32, Ordering};

pub(crate) struct PassParams {
    pub shift: u32,
    pub radix_bits: u32,
    pub group_threads: usize,
    pub items_per_lane: usize,
    pub group_id_mode: GroupIdMode,
    pub workers: usize,
}

impl PassParams {
    #[inline]
    fn tile_len(&self) -> usize {
        self.group_threads * self.items_per_lane
    }

    #[inline]
    fn warps(&self) -> usize {
        self.group_threads / WARP_LANES
    }
}

/// Run one digit pass, scattering `src` into `dst`.
///
/// `status` must be freshly zeroed with its base row seeded from the
/// globally scanned digit offsets of this pass; `ticket` freshly zeroed.
/// When sorting pairs, `values` carries the payload buffers through the
/// same permutation.
pub(crate) fn onesweep_pass<B: KeyBits>(
    src: &[B],
    dst: &mut [B],
    values: Option<(&[u32], &mut [u32])>,
    status: &StatusArray,
    ticket: &AtomicU32,
    params: &PassParams,
) {
    let n = src.len();
    let tile_len = params.tile_len();
    let warps = params.warps();
    let warp_items = WARP_LANES * params.items_per_lane;
    let digits = 1usize << params.radix_bits;
    let mask = (digits - 1) as u64;
    let groups = cdiv(n, tile_len);

    let dst = SharedOut::new(dst);
    let (values_src, values_dst) = match values {
        Some((src, dst)) => (Some(src), Some(SharedOut::new(dst))),
        None => (None, None),
    };
    let with_values = values_src.is_some();

    dispatch_groups(
        groups,
        params.workers,
        || SweepScratch::<B>::new(tile_len, warps, digits, with_values),
        |scratch, index| {
            let group = match params.group_id_mode {
                GroupIdMode::HardwareIndex => index,
                GroupIdMode::DynamicCounter => ticket.fetch_add(1, Ordering::Relaxed) as usize,
            };

            let start = group * tile_len;
            let len = tile_len.min(n - start);

            // Load the tile and extract this pass's digits.
            scratch.keys[..len].copy_from_slice(&src[start..start + len]);
            if let Some(values_src) = values_src {
                scratch.values[..len].copy_from_slice(&values_src[start..start + len]);
            }
            for i in 0..len {
                scratch.digits_of[i] = scratch.keys[i].digit(params.shift, mask) as u16;
            }

            // Rank within each warp: one running counter per digit, ranks
            // assigned window by window via match voting.
            scratch.warp_hist.fill(0);
            for warp in 0..warps {
                let slab_start = warp * warp_items;
                if slab_start >= len {
                    break;
                }
                let slab_end = (slab_start + warp_items).min(len);
                let counters = &mut scratch.warp_hist[warp * digits..(warp + 1) * digits];

                let mut window_start = slab_start;
                while window_start < slab_end {
                    let window_end = (window_start + WARP_LANES).min(slab_end);
                    let window = &scratch.digits_of[window_start..window_end];
                    let matched = match_lanes(window, params.radix_bits);

                    for (lane, &digit) in window.iter().enumerate() {
                        let mates = matched[lane];
                        let prior = (mates & lanes_below(lane as u32)).count_ones();
                        scratch.ranks[window_start + lane] = counters[digit as usize] + prior;

                        let is_leader = 31 - mates.leading_zeros() as usize == lane;
                        if is_leader {
                            counters[digit as usize] += mates.count_ones();
                        }
                    }
                    window_start += WARP_LANES;
                }
            }

            // Two-level scan: warp counters become per-warp exclusive
            // offsets per digit, their totals become group digit counts.
            for digit in 0..digits {
                let mut running = 0;
                for warp in 0..warps {
                    let slot = &mut scratch.warp_hist[warp * digits + digit];
                    let count = *slot;
                    *slot = running;
                    running += count;
                }
                scratch.bin_count[digit] = running;
            }
            let mut running = 0;
            for digit in 0..digits {
                scratch.bin_excl[digit] = running;
                running += scratch.bin_count[digit];
            }
            debug_assert_eq!(running as usize, len);

            // Publish every digit's partial before the first spin, then
            // resolve global bases by lookback.
            let row = group + 1;
            for digit in 0..digits {
                status.publish_partial(row, digit, scratch.bin_count[digit]);
            }
            for digit in 0..digits {
                let resolved = status.resolve(row, digit);
                debug_assert!(resolved.steps <= row);
                scratch.global_base[digit] = resolved.prefix;
                status.publish_resolved(row, digit, resolved.prefix + scratch.bin_count[digit]);
            }

            // Stage into group-sorted order.
            for i in 0..len {
                let digit = scratch.digits_of[i] as usize;
                let warp = i / warp_items;
                let pos = (scratch.ranks[i]
                    + scratch.warp_hist[warp * digits + digit]
                    + scratch.bin_excl[digit]) as usize;
                scratch.staged[pos] = scratch.keys[i];
                if with_values {
                    scratch.staged_values[pos] = scratch.values[i];
                }
            }

            // Scatter staging to the globally resolved positions. Only the
            // `len` staged slots exist, so padding never reaches `dst`.
            for pos in 0..len {
                let key = scratch.staged[pos];
                let digit = key.digit(params.shift, mask);
                let out = scratch.global_base[digit] as usize
                    + (pos - scratch.bin_excl[digit] as usize);
                dst.write(out, key);
                if let Some(values_dst) = &values_dst {
                    values_dst.write(out, scratch.staged_values[pos]);
                }
            }
        },
    );
}
