use crate::config::{Direction, GroupIdMode, SortConfig};
use crate::error::SortError;
use crate::key::SortKey;
use crate::sorter;

/// Configures and runs a sort over a borrowed slice.
///
/// Created via [`OnesweepSort::onesweep_sort_builder`]
/// (crate::OnesweepSort::onesweep_sort_builder). Configuration is checked
/// once when [`sort`](Self::sort) runs; nothing is validated per element.
pub struct SortBuilder<'a, K: SortKey> {
    keys: &'a mut [K],
    values: Option<&'a mut [u32]>,
    config: SortConfig,
}

impl<'a, K: SortKey> SortBuilder<'a, K> {
    pub(crate) fn new(keys: &'a mut [K]) -> Self {
        Self {
            keys,
            values: None,
            config: SortConfig::default(),
        }
    }

    pub fn ascending(mut self) -> Self {
        self.config.direction = Direction::Ascending;

        self
    }

    pub fn descending(mut self) -> Self {
        self.config.direction = Direction::Descending;

        self
    }

    /// Digit width per pass: 4, 8 or 12 bits.
    pub fn with_radix_bits(mut self, radix_bits: u32) -> Self {
        self.config.radix_bits = radix_bits;

        self
    }

    pub fn with_group_threads(mut self, group_threads: usize) -> Self {
        self.config.group_threads = group_threads;

        self
    }

    pub fn with_items_per_lane(mut self, items_per_lane: usize) -> Self {
        self.config.items_per_lane = items_per_lane;

        self
    }

    pub fn with_group_id_mode(mut self, mode: GroupIdMode) -> Self {
        self.config.group_id_mode = mode;

        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = Some(workers);

        self
    }

    pub fn with_config(mut self, config: SortConfig) -> Self {
        self.config = config;

        self
    }

    /// Reorder `values` through the same permutation as the keys.
    ///
    /// Must be the same length as the key slice; checked at dispatch.
    pub fn with_values(mut self, values: &'a mut [u32]) -> Self {
        self.values = Some(values);

        self
    }

    pub fn sort(self) -> Result<(), SortError> {
        match self.values {
            Some(values) => sorter::sort_pairs_slice(self.keys, values, &self.config),
            None => sorter::sort_slice(self.keys, &self.config),
        }
    }
}
