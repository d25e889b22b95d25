//! Known place labels.
//!
//! Users type short local names that the geocoder resolves poorly. Known
//! labels are rewritten to a query the geocoder handles, and carry the
//! code of the rail station serving them.

use std::collections::HashMap;

use crate::domain::StationCode;

/// What a known label resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub query: String,
    pub station: Option<StationCode>,
}

/// Label → alias lookup.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, Alias>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: impl Into<String>, alias: Alias) {
        self.entries.insert(label.into(), alias);
    }

    pub fn get(&self, label: &str) -> Option<&Alias> {
        self.entries.get(label)
    }

    /// Query text and station code for `label`.
    ///
    /// Unknown labels are geocoded verbatim and have no station.
    pub fn resolve(&self, label: &str) -> (String, Option<StationCode>) {
        match self.get(label) {
            Some(alias) => (alias.query.clone(), alias.station.clone()),
            None => (label.to_string(), None),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fluent construction of an [`AliasTable`].
#[derive(Debug, Default)]
pub struct AliasTableBuilder {
    inner: AliasTable,
}

impl AliasTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label. The station code is trimmed and uppercased; an invalid
    /// one is dropped and the query kept.
    pub fn add(mut self, label: &str, query: &str, station: Option<&str>) -> Self {
        let station = station.and_then(|s| StationCode::parse_normalized(s).ok());
        self.inner.add(
            label,
            Alias {
                query: query.to_string(),
                station,
            },
        );
        self
    }

    pub fn build(self) -> AliasTable {
        self.inner
    }
}

/// Default Hong Kong labels and the MTR stations serving them.
pub fn hong_kong_aliases() -> AliasTable {
    AliasTableBuilder::new()
        .add("黃大仙站A2", "Wong Tai Sin Station, Hong Kong", Some("WTS"))
        .add("黃大仙站", "Wong Tai Sin Station, Hong Kong", Some("WTS"))
        .add("大埔中心", "Tai Po Centre, Hong Kong", Some("TAP"))
        .add("沙田好運中心", "Lucky Plaza, Sha Tin, Hong Kong", Some("SHT"))
        .add("尖沙咀碼頭", "Tsim Sha Tsui Ferry Pier, Hong Kong", Some("TST"))
        .add("觀塘 apm", "apm Kwun Tong, Hong Kong", Some("KWT"))
        .add("觀塘APM", "apm Kwun Tong, Hong Kong", Some("KWT"))
        .add("藍田匯景", "Laguna City, Hong Kong", Some("LAT"))
        .build()
}
