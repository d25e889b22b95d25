//! Static GTFS feed ingestion.
//!
//! The feed is a zip archive of comma-separated tables. Only the four
//! tables needed to derive rail travel times are read: stops, routes,
//! trips and stop times.

mod archive;
mod error;
mod records;
mod table;

pub use archive::{FeedSource, FeedTables};
pub use error::FeedError;
pub use records::{RouteRecord, StopRecord, StopTimeRecord, TripRecord};
pub use table::{Row, Table, parse_table, split_line};

#[cfg(test)]
pub(crate) use archive::zip_bytes;
