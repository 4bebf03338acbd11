//! Single-pass inclusive scan with decoupled lookback.
//!
//! One global pass over tiles: each group claims a tile id from an atomic
//! ticket, reduces its tile locally, publishes the reduction as a partial,
//! walks lower tiles' status words until it meets a fully resolved one,
//! publishes its own full prefix, and finally writes the seeded inclusive
//! scan of its tile. The sort pass's global-offset resolution is this same
//! protocol specialized to per-digit counts.
//!
//! Status words are `AtomicU64` with the two top bits reserved for the
//! partial/full tags; 32-bit values are promoted to the 64-bit storage
//! word so the tag bits are always clear of the value range. Inputs longer
//! than [`ScanConfig::max_chunk_len`] run as sequential chunks, each chunk
//! seeding its lookback base row with the previous chunk's total.

use crate::config::ScanConfig;
use crate::device::grid::dispatch_groups;
use crate::device::SharedOut;
use crate::error::SortError;
use crate::utils::cdiv;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

const SCAN_PARTIAL: u64 = 1 << 63;
const SCAN_FULL: u64 = 1 << 62;
const SCAN_PAYLOAD_MASK: u64 = SCAN_FULL - 1;

/// An associative combiner with a known identity.
pub trait ScanOp<T>: Sync {
    fn identity(&self) -> T;
    fn apply(&self, a: T, b: T) -> T;
}

/// Wrapping addition.
pub struct Plus;

/// Maximum of the two operands.
pub struct Maximum;

impl ScanOp<u32> for Plus {
    #[inline]
    fn identity(&self) -> u32 {
        0
    }

    #[inline]
    fn apply(&self, a: u32, b: u32) -> u32 {
        a.wrapping_add(b)
    }
}

impl ScanOp<u64> for Plus {
    #[inline]
    fn identity(&self) -> u64 {
        0
    }

    #[inline]
    fn apply(&self, a: u64, b: u64) -> u64 {
        a.wrapping_add(b)
    }
}

impl ScanOp<u32> for Maximum {
    #[inline]
    fn identity(&self) -> u32 {
        0
    }

    #[inline]
    fn apply(&self, a: u32, b: u32) -> u32 {
        a.max(b)
    }
}

impl ScanOp<u64> for Maximum {
    #[inline]
    fn identity(&self) -> u64 {
        0
    }

    #[inline]
    fn apply(&self, a: u64, b: u64) -> u64 {
        a.max(b)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// A value the scan can carry through a tagged status word.
///
/// `u32` always fits the 62 payload bits; `u64` values (and any running
/// reduction of them) must stay below `2^62`, which is a documented
/// precondition rather than a runtime check on the hot path.
pub trait ScanElement:
    private::Sealed + Copy + Send + Sync + PartialEq + Debug + 'static
{
    fn to_payload(self) -> u64;
    fn from_payload(payload: u64) -> Self;
}

impl ScanElement for u32 {
    #[inline]
    fn to_payload(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn from_payload(payload: u64) -> Self {
        payload as u32
    }
}

impl ScanElement for u64 {
    #[inline]
    fn to_payload(self) -> u64 {
        debug_assert_eq!(self & !SCAN_PAYLOAD_MASK, 0);
        self
    }

    #[inline]
    fn from_payload(payload: u64) -> Self {
        payload
    }
}

/// Per-tile status words, same protocol as the sort's status array but
/// carrying operator values instead of digit counts. Row 0 is the seeded
/// base (identity, or the previous chunk's total).
struct ScanStatus {
    slots: Vec<AtomicU64>,
}

impl ScanStatus {
    fn new(rows: usize) -> Self {
        Self {
            slots: (0..rows).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    fn seed_base<T: ScanElement>(&self, base: T) {
        self.slots[0].store(
            base.to_payload() | SCAN_PARTIAL | SCAN_FULL,
            Ordering::Release,
        );
    }

    #[inline]
    fn publish_partial<T: ScanElement>(&self, row: usize, value: T) {
        self.slots[row].store(value.to_payload() | SCAN_PARTIAL, Ordering::Release);
    }

    #[inline]
    fn publish_full<T: ScanElement>(&self, row: usize, value: T) {
        self.slots[row].store(
            value.to_payload() | SCAN_PARTIAL | SCAN_FULL,
            Ordering::Release,
        );
    }

    #[inline]
    fn wait_tagged(&self, row: usize) -> u64 {
        loop {
            let word = self.slots[row].load(Ordering::Acquire);
            if word & (SCAN_PARTIAL | SCAN_FULL) != 0 {
                return word;
            }
            std::hint::spin_loop();
        }
    }

    /// Exclusive prefix for `row`: walk lower rows right-to-left,
    /// combining partials, stopping at the first full word. Row 0 is
    /// always full.
    fn resolve<T: ScanElement, Op: ScanOp<T>>(&self, row: usize, op: &Op) -> T {
        let mut suffix = op.identity();
        for prev in (0..row).rev() {
            let word = self.wait_tagged(prev);
            suffix = op.apply(T::from_payload(word & SCAN_PAYLOAD_MASK), suffix);
            if word & SCAN_FULL != 0 {
                break;
            }
        }
        suffix
    }
}

/// Inclusive scan of `input` into `output` under `op`.
///
/// `output[i] = op(input[0], ..., input[i])`. Empty inputs return without
/// allocating or dispatching anything.
pub fn inclusive_scan<T, Op>(
    input: &[T],
    output: &mut [T],
    op: &Op,
    config: &ScanConfig,
) -> Result<(), SortError>
where
    T: ScanElement,
    Op: ScanOp<T>,
{
    config.validate()?;
    if input.len() != output.len() {
        return Err(SortError::LengthMismatch {
            keys: input.len(),
            values: output.len(),
        });
    }
    if input.is_empty() {
        return Ok(());
    }

    let mut carry: Option<T> = None;
    let chunks = input
        .chunks(config.max_chunk_len)
        .zip(output.chunks_mut(config.max_chunk_len));
    for (chunk_in, chunk_out) in chunks {
        scan_chunk(chunk_in, chunk_out, op, config, carry);
        carry = Some(chunk_out[chunk_out.len() - 1]);
    }
    Ok(())
}

fn scan_chunk<T, Op>(input: &[T], output: &mut [T], op: &Op, config: &ScanConfig, carry: Option<T>)
where
    T: ScanElement,
    Op: ScanOp<T>,
{
    let n = input.len();
    let tile_len = config.tile_len();
    let tiles = cdiv(n, tile_len);

    let status = ScanStatus::new(tiles + 1);
    status.seed_base(carry.unwrap_or_else(|| op.identity()));
    let ticket = std::sync::atomic::AtomicU32::new(0);
    let out = SharedOut::new(output);

    dispatch_groups(tiles, config.worker_count(), || (), |_, _| {
        // Tiles are always claimed dynamically here: the lookback below is
        // only meaningful if tile consumption order matches id order.
        let tile = ticket.fetch_add(1, Ordering::Relaxed) as usize;
        let start = tile * tile_len;
        let end = (start + tile_len).min(n);

        let mut local = op.identity();
        for &value in &input[start..end] {
            local = op.apply(local, value);
        }

        let row = tile + 1;
        status.publish_partial(row, local);
        let prefix = status.resolve(row, op);
        status.publish_full(row, op.apply(prefix, local));

        let mut running = prefix;
        for (i, &value) in input[start..end].iter().enumerate() {
            running = op.apply(running, value);
            out.write(start + i, running);
        }
    });
}
