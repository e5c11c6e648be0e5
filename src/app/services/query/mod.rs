//! Snapshot and range queries
//!
//! Both queries take an explicit [`Session`](crate::app::storage::Session),
//! load the station registry, read normalized readings and hand them to a
//! pure function that does the actual work. The pure halves are public so
//! they can be exercised without a store.

pub mod params;
pub mod range;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

pub use params::{RangeRequest, ResolvedRange, default_start, parse_iso_time};
pub use range::{RangeSeries, range_series, range_series_from};
pub use snapshot::{snapshot, snapshot_from};
