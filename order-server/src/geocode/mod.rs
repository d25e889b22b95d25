//! Address geocoding.
//!
//! Labels are first expanded through the alias table, then resolved to
//! coordinates by a [`Geocoder`]. The production geocoder is Nominatim,
//! wrapped in a cache (see [`crate::cache`]).

mod aliases;
mod client;
mod error;

pub use aliases::{Alias, AliasTable, AliasTableBuilder, hong_kong_aliases};
pub use client::{GeocodeConfig, NominatimClient, SearchHit};
pub use error::GeocodeError;

use crate::domain::Coord;

/// A resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub coord: Coord,
    pub display: String,
}

/// Resolves free text to a location.
///
/// This abstraction allows the request pipeline to be tested with mock data.
pub trait Geocoder {
    async fn geocode(&self, query: &str) -> Result<Place, GeocodeError>;
}
