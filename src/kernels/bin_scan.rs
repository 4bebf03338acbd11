//! Per-pass digit-offset scan.
//!
//! Turns one histogram row into starting offsets. The row is a few hundred
//! counters at most, so a plain work-efficient in-place scan does it; the
//! cross-group lookback machinery is reserved for the sort pass itself.

/// Overwrite `row` with its exclusive prefix sums.
pub(crate) fn exclusive_scan_row(row: &mut [u32]) {
    let mut running = 0;
    for slot in row.iter_mut() {
        let count = *slot;
        *slot = running;
        running += count;
    }
}

/// True when a single digit holds every key, in which case the pass would
/// move nothing and can be skipped.
pub(crate) fn is_homogenous_row(row: &[u32]) -> bool {
    let mut seen = false;
    for &count in row {
        if count > 0 {
            if seen {
                return false;
            }
            seen = true;
        }
    }
    true
}
