pub(crate) mod bin_scan;
pub(crate) mod histogram;
pub(crate) mod lookback;
pub(crate) mod onesweep;
