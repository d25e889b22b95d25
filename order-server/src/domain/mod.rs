//! Domain types for the visiting-order optimizer.
//!
//! These types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod leg;
mod point;
mod station;
mod time;

pub use leg::{CandidateKind, Leg, LegMode, Plan};
pub use point::{Coord, EARTH_RADIUS_M, Point, walk_seconds};
pub use station::{InvalidStationCode, StationCode};
pub use time::{ScheduleTime, TimeError};
