//! # onesweep
//!
//! A counting-based radix sort that makes exactly one global sweep of work
//! groups per digit position, plus the decoupled-lookback single-pass
//! prefix scan the sweep's offset resolution is built from. The kernels
//! are written against a small device model — flat group/lane dispatch,
//! subgroup ballots, group-local scratch, tagged atomic status words — and
//! run here on a portable executor that keeps all cross-group
//! synchronization (monotonic tile claiming, atomic publish, spin-wait
//! lookback) real.
//!
//! ## Usage
//!
//! ```ignore
//! use onesweep::OnesweepSort;
//!
//! let mut keys: Vec<u32> = vec![5, 3, 8, 1];
//! keys.onesweep_sort()?;
//! ```
//!
//! Descending order, other digit widths, group geometry and a paired
//! payload go through the builder:
//!
//! ```ignore
//! let mut values: Vec<u32> = (0..keys.len() as u32).collect();
//! keys.onesweep_sort_builder()
//!     .descending()
//!     .with_radix_bits(4)
//!     .with_values(&mut values)
//!     .sort()?;
//! ```
//!
//! Keys are the fixed-width scalars: `u8`–`u64`, `i8`–`i64`, `f32`, `f64`.
//! Floats sort in IEEE order including signed zeros; NaN ordering is
//! undefined. The sort is not guaranteed stable.
//!
//! The scan primitive is exposed as [`inclusive_scan`] with the [`Plus`]
//! and [`Maximum`] operators, or any [`ScanOp`] with a known identity.
//!
//! ## License
//!
//! Licensed under either of
//!
//! * Apache License, Version 2.0, ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

mod builder;
mod config;
mod device;
mod error;
mod kernels;
mod key;
mod scan;
mod sorter;
mod utils;

#[cfg(test)]
mod tests;

pub use builder::SortBuilder;
pub use config::{Direction, GroupIdMode, ScanConfig, SortConfig, DEFAULT_SCAN_CHUNK};
pub use error::SortError;
pub use key::{KeyBits, SortKey};
pub use scan::{inclusive_scan, Maximum, Plus, ScanElement, ScanOp};

pub trait OnesweepSort<K: SortKey> {
    /// Sort ascending with the default configuration.
    fn onesweep_sort(&mut self) -> Result<(), SortError>;

    /// Configure direction, radix width, group geometry or a paired
    /// payload before sorting.
    fn onesweep_sort_builder(&mut self) -> SortBuilder<'_, K>;
}

impl<K: SortKey> OnesweepSort<K> for [K] {
    fn onesweep_sort(&mut self) -> Result<(), SortError> {
        SortBuilder::new(self).sort()
    }

    fn onesweep_sort_builder(&mut self) -> SortBuilder<'_, K> {
        SortBuilder::new(self)
    }
}

impl<K: SortKey> OnesweepSort<K> for Vec<K> {
    fn onesweep_sort(&mut self) -> Result<(), SortError> {
        SortBuilder::new(self).sort()
    }

    fn onesweep_sort_builder(&mut self) -> SortBuilder<'_, K> {
        SortBuilder::new(self)
    }
}
