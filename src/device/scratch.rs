//! Group-local scratch memory.
//!
//! The original kernels alias one shared-memory allocation across phases
//! (per-warp histograms, then offset lookup tables, then the staging
//! buffer). Here the arena is an explicitly-sized struct and each phase
//! borrows the views it writes, so a view cannot be read after a later
//! phase has started overwriting the same storage.
//!
//! Peak footprint per group: `2 * tile` keys, `tile` ranks and digits,
//! `warps * digits` warp counters and four `digits`-sized offset rows.

use crate::key::KeyBits;

pub(crate) struct SweepScratch<B> {
    /// Loaded tile keys, tile staging order after the rank phase.
    pub keys: Vec<B>,
    pub staged: Vec<B>,
    /// Digit of each loaded key for the current pass.
    pub digits_of: Vec<u16>,
    /// Warp-local exclusive rank of each key among equal digits.
    pub ranks: Vec<u32>,
    /// Per-warp digit counts; the column scan rewrites them in place into
    /// per-warp exclusive offsets.
    pub warp_hist: Vec<u32>,
    /// Per-digit totals for this group.
    pub bin_count: Vec<u32>,
    /// Exclusive scan of `bin_count` (the digit's start inside staging).
    pub bin_excl: Vec<u32>,
    /// Resolved global start of each digit for this group.
    pub global_base: Vec<u32>,
    /// Staged payload values when sorting pairs.
    pub staged_values: Vec<u32>,
    pub values: Vec<u32>,
}

impl<B: KeyBits> SweepScratch<B> {
    pub(crate) fn new(tile_len: usize, warps: usize, digits: usize, with_values: bool) -> Self {
        let value_len = if with_values { tile_len } else { 0 };
        Self {
            keys: vec![B::ZERO; tile_len],
            staged: vec![B::ZERO; tile_len],
            digits_of: vec![0; tile_len],
            ranks: vec![0; tile_len],
            warp_hist: vec![0; warps * digits],
            bin_count: vec![0; digits],
            bin_excl: vec![0; digits],
            global_base: vec![0; digits],
            staged_values: vec![0; value_len],
            values: vec![0; value_len],
        }
    }
}
