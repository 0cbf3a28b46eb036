//! Core domain types for the station finder.

mod coordinate;
mod station;
mod view;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use station::{Station, StationId};
pub use view::{RankedView, ResolvedCandidate, ResolvedDistance};
