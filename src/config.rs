use crate::device::ballot::WARP_LANES;
use crate::error::SortError;

/// Sort order for the output array.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// How a work group obtains the id of the tile it consumes.
///
/// `HardwareIndex` trusts the index assigned at dispatch. `DynamicCounter`
/// has each group draw a ticket from an atomic counter instead, which
/// guarantees tiles are claimed in increasing order even when the underlying
/// scheduler starts groups out of order. The lookback protocol only needs
/// claim-order monotonicity, which the portable executor provides either
/// way; the two paths exist so a hardware backend can pick per device.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum GroupIdMode {
    HardwareIndex,
    #[default]
    DynamicCounter,
}

/// Configuration surface of the sort kernels.
///
/// Validated once at dispatch; per-element code never re-checks it.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Digit width in bits. One of 4, 8 or 12.
    pub radix_bits: u32,
    /// Lanes per work group. Must be a non-zero multiple of 32.
    pub group_threads: usize,
    /// Keys each lane loads per tile, 1..=64.
    pub items_per_lane: usize,
    pub group_id_mode: GroupIdMode,
    pub direction: Direction,
    /// Worker threads driving the group dispatch. Defaults to the rayon
    /// pool size.
    pub workers: Option<usize>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            radix_bits: 8,
            group_threads: 256,
            items_per_lane: 4,
            group_id_mode: GroupIdMode::default(),
            direction: Direction::default(),
            workers: None,
        }
    }
}

impl SortConfig {
    pub fn validate(&self) -> Result<(), SortError> {
        if !matches!(self.radix_bits, 4 | 8 | 12) {
            return Err(SortError::InvalidRadixBits(self.radix_bits));
        }
        if self.group_threads == 0 || self.group_threads % WARP_LANES != 0 {
            return Err(SortError::InvalidGroupThreads(self.group_threads));
        }
        if self.items_per_lane == 0 || self.items_per_lane > 64 {
            return Err(SortError::InvalidItemsPerLane(self.items_per_lane));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn radix_digits(&self) -> usize {
        1 << self.radix_bits
    }

    #[inline]
    pub(crate) fn tile_len(&self) -> usize {
        self.group_threads * self.items_per_lane
    }

    #[inline]
    pub(crate) fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(rayon::current_num_threads)
    }
}

/// Per-chunk element bound keeping 32-bit running sums clear of the two
/// status tag bits.
pub const DEFAULT_SCAN_CHUNK: usize = 1 << 30;

/// Configuration surface of the single-pass scan primitive.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Lanes per work group.
    pub group_threads: usize,
    /// Elements each lane processes per tile.
    pub items_per_lane: usize,
    pub workers: Option<usize>,
    /// Inputs longer than this are processed in sequential chunks, each
    /// chunk seeded with the previous chunk's total.
    pub max_chunk_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            group_threads: 256,
            items_per_lane: 8,
            workers: None,
            max_chunk_len: DEFAULT_SCAN_CHUNK,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), SortError> {
        if self.group_threads == 0 {
            return Err(SortError::InvalidGroupThreads(self.group_threads));
        }
        if self.items_per_lane == 0 || self.items_per_lane > 64 {
            return Err(SortError::InvalidItemsPerLane(self.items_per_lane));
        }
        if self.max_chunk_len == 0 {
            return Err(SortError::InvalidChunkLen);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn tile_len(&self) -> usize {
        self.group_threads * self.items_per_lane
    }

    #[inline]
    pub(crate) fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(rayon::current_num_threads)
    }
}
