//! Decoupled-lookback status array.
//!
//! One tagged atomic word per (group, digit) slot. The top two bits encode
//! the slot state, the low 30 bits carry the count:
//!
//! * untagged zero — not yet computed
//! * `PARTIAL_BIT` — the owning group's tile count is published
//! * `RESOLVED_BIT` — the payload is the full inclusive prefix through the
//!   owning group; walkers stop here
//!
//! Row 0 is virtual: it is seeded with the globally scanned digit offsets,
//! already resolved, so group 0 runs the same walk as everyone else and
//! every walk is bounded by the row count. A slot's partial is published
//! exactly once, by its owner, before the owner's first spin; resolved is
//! published exactly once, after the walk. Consumers re-poll until a tag
//! appears — a stalled predecessor stalls its successors, which is the
//! documented liveness precondition of the protocol.

use std::sync::atomic::{AtomicU32, Ordering};

pub(crate) const PARTIAL_BIT: u32 = 1 << 31;
pub(crate) const RESOLVED_BIT: u32 = 1 << 30;
pub(crate) const OFFSET_MASK: u32 = RESOLVED_BIT - 1;

/// Largest key count addressable by a tagged offset.
pub(crate) const MAX_OFFSET: usize = OFFSET_MASK as usize;

pub(crate) struct StatusArray {
    slots: Vec<AtomicU32>,
    digits: usize,
}

/// Outcome of one lookback walk: the exclusive prefix for the caller's row
/// and the number of slots visited (at most the row index).
pub(crate) struct Resolution {
    pub prefix: u32,
    pub steps: usize,
}

impl StatusArray {
    pub(crate) fn new(rows: usize, digits: usize) -> Self {
        Self {
            slots: (0..rows * digits).map(|_| AtomicU32::new(0)).collect(),
            digits,
        }
    }

    #[inline]
    fn slot(&self, row: usize, digit: usize) -> &AtomicU32 {
        &self.slots[row * self.digits + digit]
    }

    /// Seed row 0 with already-resolved base offsets.
    pub(crate) fn seed_base_row(&self, offsets: &[u32]) {
        debug_assert_eq!(offsets.len(), self.digits);
        for (digit, &offset) in offsets.iter().enumerate() {
            debug_assert_eq!(offset & !OFFSET_MASK, 0);
            self.slot(0, digit)
                .store(offset | PARTIAL_BIT | RESOLVED_BIT, Ordering::Release);
        }
    }

    /// Publish this row's own tile count. Must happen for every digit
    /// before the owner starts its lookback walk.
    #[inline]
    pub(crate) fn publish_partial(&self, row: usize, digit: usize, count: u32) {
        debug_assert_eq!(count & !OFFSET_MASK, 0);
        debug_assert_eq!(self.slot(row, digit).load(Ordering::Relaxed), 0);
        self.slot(row, digit)
            .store(count | PARTIAL_BIT, Ordering::Release);
    }

    /// Publish this row's inclusive prefix, unblocking successors.
    #[inline]
    pub(crate) fn publish_resolved(&self, row: usize, digit: usize, inclusive_prefix: u32) {
        debug_assert_eq!(inclusive_prefix & !OFFSET_MASK, 0);
        debug_assert_eq!(
            self.slot(row, digit).load(Ordering::Relaxed) & RESOLVED_BIT,
            0
        );
        self.slot(row, digit)
            .store(inclusive_prefix | PARTIAL_BIT | RESOLVED_BIT, Ordering::Release);
    }

    /// Spin until `(row, digit)` carries a tag.
    #[inline]
    fn wait_tagged(&self, row: usize, digit: usize) -> u32 {
        let slot = self.slot(row, digit);
        loop {
            let word = slot.load(Ordering::Acquire);
            if word & (PARTIAL_BIT | RESOLVED_BIT) != 0 {
                return word;
            }
            std::hint::spin_loop();
        }
    }

    /// Walk lower rows until a resolved slot is found, accumulating
    /// partial counts on the way. Returns the exclusive prefix for `row`.
    ///
    /// Row 0 is always resolved, so the walk visits at most `row` slots.
    pub(crate) fn resolve(&self, row: usize, digit: usize) -> Resolution {
        let mut prefix = 0;
        let mut steps = 0;
        for prev in (0..row).rev() {
            let word = self.wait_tagged(prev, digit);
            steps += 1;
            prefix += word & OFFSET_MASK;
            if word & RESOLVED_BIT != 0 {
                break;
            }
        }
        Resolution { prefix, steps }
    }
}
