//! Mock distance matrix for development without an API key.
//!
//! Derives each travel distance from the great-circle distance between
//! origin and destination, so the application runs end to end with
//! plausible (if optimistic) numbers.

use futures::future::BoxFuture;

use crate::domain::{Coordinate, ResolvedDistance};

use super::DistanceMatrix;
use super::error::MatrixError;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

const METERS_PER_MILE: f64 = 1_609.344;

/// Mock client deriving distances locally instead of calling out.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockMatrixClient;

impl MockMatrixClient {
    pub fn new() -> Self {
        Self
    }
}

/// Great-circle distance in meters (haversine).
fn great_circle_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlng = (b.lng() - a.lng()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

impl DistanceMatrix for MockMatrixClient {
    fn distances<'a>(
        &'a self,
        origin: Coordinate,
        destinations: &'a [Coordinate],
    ) -> BoxFuture<'a, Result<Vec<ResolvedDistance>, MatrixError>> {
        Box::pin(async move {
            Ok(destinations
                .iter()
                .map(|dest| {
                    let meters = great_circle_meters(origin, *dest);
                    ResolvedDistance {
                        text: format!("{:.1} mi", meters / METERS_PER_MILE),
                        value: meters.round() as u32,
                    }
                })
                .collect())
        })
    }
}
