//! OpenTripPlanner client.
//!
//! The planner is an external service loaded with local bus, ferry and
//! rail data. It answers "fastest walk + transit itinerary between two
//! coordinates at this time"; any failure just means no transit candidate
//! for that pair.

mod client;
mod error;
mod types;

pub use client::{OtpClient, OtpConfig};
pub use error::TransitError;
pub use types::{Itinerary, OtpLeg, OtpPlace, PlanResponse, TripPlan};
