//! Subgroup voting capability.
//!
//! The ranking kernel counts, within each 32-lane warp window, how many
//! lanes share a digit. On hardware this is a ballot/match intrinsic; here
//! it is the same bitmask algebra computed over a `u32` per lane. The
//! interface is the capability surface a hardware backend would implement:
//! `ballot` turns a per-lane predicate into a mask, `lanes_below` isolates
//! the lanes ahead of the caller, and population counts come from
//! `u32::count_ones`.

pub(crate) type LaneMask = u32;

/// Lanes per warp window. Warp-level masks are `u32`, so this is fixed.
pub(crate) const WARP_LANES: usize = 32;

/// Mask of all lanes strictly below `lane`.
#[inline]
pub(crate) fn lanes_below(lane: u32) -> LaneMask {
    (1u32 << lane) - 1
}

/// Ballot of a per-lane predicate over a (possibly partial) window.
#[inline]
pub(crate) fn ballot<F>(lanes: usize, pred: F) -> LaneMask
where
    F: Fn(usize) -> bool,
{
    debug_assert!(lanes <= WARP_LANES);
    let mut mask = 0;
    for lane in 0..lanes {
        if pred(lane) {
            mask |= 1 << lane;
        }
    }
    mask
}

/// Per-lane mask of lanes holding the same digit, over one warp window.
///
/// One ballot per radix bit: lanes agreeing on every bit of the digit stay
/// in each other's mask. Lanes past `window.len()` (the tail of a partial
/// tile) are excluded from every mask, which is what keeps padding out of
/// the ranking without reserving a sentinel key value.
pub(crate) fn match_lanes(window: &[u16], radix_bits: u32) -> [LaneMask; WARP_LANES] {
    debug_assert!(window.len() <= WARP_LANES);
    let valid = if window.len() == WARP_LANES {
        !0
    } else {
        (1u32 << window.len()) - 1
    };

    let mut matched = [0; WARP_LANES];
    for lane in 0..window.len() {
        matched[lane] = valid;
    }

    for bit in 0..radix_bits {
        let ones = ballot(window.len(), |lane| (window[lane] >> bit) & 1 == 1);
        for (lane, &digit) in window.iter().enumerate() {
            let agreeing = if (digit >> bit) & 1 == 1 { ones } else { !ones };
            matched[lane] &= agreeing;
        }
    }

    matched
}
