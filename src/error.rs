use crate::kernels::lookback::MAX_OFFSET;

/// Errors surfaced at dispatch time, before any kernel work begins.
///
/// A pass that has started either completes or hangs on a violated
/// liveness precondition; there are no partial results and no retries.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    #[error("unsupported radix width {0} (expected 4, 8 or 12 bits)")]
    InvalidRadixBits(u32),
    #[error("group_threads {0} must be a non-zero multiple of 32")]
    InvalidGroupThreads(usize),
    #[error("items_per_lane {0} out of range 1..=64")]
    InvalidItemsPerLane(usize),
    #[error("max_chunk_len must be non-zero")]
    InvalidChunkLen,
    #[error("input of {len} keys exceeds the tagged-offset capacity of {MAX_OFFSET}")]
    InputTooLarge { len: usize },
    #[error("length mismatch: keys={keys}, values={values}")]
    LengthMismatch { keys: usize, values: usize },
}
