//! GTFS archive retrieval and table extraction.

use std::io::{Cursor, Read};
use std::path::PathBuf;

use tracing::{debug, info, warn};
use zip::ZipArchive;

use super::error::FeedError;
use super::records::{RouteRecord, StopRecord, StopTimeRecord, TripRecord};
use super::table::{Table, parse_table};

/// User agent sent with feed downloads.
const USER_AGENT: &str = "hk-transit-optimizer/0.1 (contact: local)";

/// Where to read the feed archive from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    Path(PathBuf),
}

impl FeedSource {
    /// `http(s)://` locations are downloaded; anything else is a file path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            FeedSource::Url(s.to_string())
        } else {
            FeedSource::Path(PathBuf::from(s))
        }
    }

    /// Read the raw archive bytes.
    pub async fn fetch(&self, timeout_secs: u64) -> Result<Vec<u8>, FeedError> {
        match self {
            FeedSource::Url(url) => {
                let http = reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .timeout(std::time::Duration::from_secs(timeout_secs))
                    .build()?;

                let response = http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FeedError::Status {
                        status: status.as_u16(),
                    });
                }
                Ok(response.bytes().await?.to_vec())
            }
            FeedSource::Path(path) => Ok(tokio::fs::read(path).await?),
        }
    }
}

/// The four tables the rail graph is built from.
#[derive(Debug, Clone, Default)]
pub struct FeedTables {
    pub stops: Vec<StopRecord>,
    pub routes: Vec<RouteRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
}

impl FeedTables {
    /// Fetch and decode a feed. Decoding runs on the blocking pool.
    pub async fn load(source: &FeedSource, timeout_secs: u64) -> Result<Self, FeedError> {
        let bytes = source.fetch(timeout_secs).await?;
        info!(bytes = bytes.len(), "downloaded rail feed");

        tokio::task::spawn_blocking(move || Self::from_zip(&bytes))
            .await
            .map_err(|e| FeedError::Io(std::io::Error::other(e)))?
    }

    /// Decode the required tables from zip bytes.
    pub fn from_zip(bytes: &[u8]) -> Result<Self, FeedError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let routes = read_table(&mut archive, "routes.txt")?;
        let trips = read_table(&mut archive, "trips.txt")?;
        let stop_times = read_table(&mut archive, "stop_times.txt")?;
        let stops = read_table(&mut archive, "stops.txt")?;

        warn_missing_columns("routes.txt", &routes, &["route_id", "route_type"]);
        warn_missing_columns("trips.txt", &trips, &["route_id", "trip_id"]);
        warn_missing_columns(
            "stop_times.txt",
            &stop_times,
            &["trip_id", "stop_id", "arrival_time", "departure_time"],
        );
        warn_missing_columns("stops.txt", &stops, &["stop_id", "stop_lat", "stop_lon"]);

        Ok(Self::from_tables(&stops, &routes, &trips, &stop_times))
    }

    /// Convert parsed tables into records, dropping malformed rows.
    pub fn from_tables(stops: &Table, routes: &Table, trips: &Table, stop_times: &Table) -> Self {
        let tables = Self {
            stops: stops.rows().filter_map(|r| StopRecord::from_row(&r)).collect(),
            routes: routes.rows().filter_map(|r| RouteRecord::from_row(&r)).collect(),
            trips: trips.rows().filter_map(|r| TripRecord::from_row(&r)).collect(),
            stop_times: stop_times
                .rows()
                .filter_map(|r| StopTimeRecord::from_row(&r))
                .collect(),
        };

        debug!(
            stops = tables.stops.len(),
            stops_dropped = stops.len() - tables.stops.len(),
            routes = tables.routes.len(),
            trips = tables.trips.len(),
            stop_times = tables.stop_times.len(),
            stop_times_dropped = stop_times.len() - tables.stop_times.len(),
            "decoded feed tables"
        );

        tables
    }
}

/// Read one table, accepting it at the archive root or inside a folder.
fn read_table<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &'static str,
) -> Result<Table, FeedError> {
    let suffix = format!("/{name}");
    let entry = archive
        .file_names()
        .find(|n| *n == name || n.ends_with(&suffix))
        .map(str::to_string)
        .ok_or(FeedError::MissingTable(name))?;

    let mut bytes = Vec::new();
    archive.by_name(&entry)?.read_to_end(&mut bytes)?;
    Ok(parse_table(&String::from_utf8_lossy(&bytes)))
}

/// Every row of a table without a required column is dropped.
fn warn_missing_columns(name: &str, table: &Table, required: &[&str]) {
    for column in required.iter().filter(|c| !table.has_column(c)) {
        warn!(
            table = name,
            column,
            headers = ?table.headers(),
            "feed table lacks a required column"
        );
    }
}

/// Build an in-memory zip from `(name, contents)` pairs.
#[cfg(test)]
pub(crate) fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let raw: Vec<(&str, &[u8])> = files.iter().map(|(n, c)| (*n, c.as_bytes())).collect();
    zip_raw(&raw)
}

/// Like [`zip_bytes`], with contents that need not be UTF-8.
#[cfg(test)]
pub(crate) fn zip_raw(files: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::{SimpleFileOptions, ZipWriter};

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
