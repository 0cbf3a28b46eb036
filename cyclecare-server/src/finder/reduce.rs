//! Planar pre-filter.
//!
//! Narrows the full station set to a bounded candidate set using a
//! straight-line heuristic, so the external distance request stays
//! small and cheap.

use std::sync::Arc;

use crate::domain::{Coordinate, Station};

/// Select the `limit` stations nearest to `origin` by planar distance.
///
/// The heuristic is the Euclidean norm of the coordinate delta in raw
/// degrees. It is not a metric distance: it is only meaningful for
/// ordering stations relative to a single origin, and it is discarded
/// after selection.
///
/// Returns `min(limit, stations.len())` elements ascending by the
/// heuristic. The sort is stable, so stations at identical planar
/// distance keep their input order. An empty input yields an empty
/// candidate set.
///
/// Because the heuristic is planar and `limit` is fixed, the station
/// nearest by real travel distance can be excluded when more than
/// `limit` stations are closer in degree space. That is the accepted
/// cost of bounding the external request size.
pub fn reduce(origin: Coordinate, stations: &[Arc<Station>], limit: usize) -> Vec<Arc<Station>> {
    let mut scored: Vec<(f64, &Arc<Station>)> = stations
        .iter()
        .map(|station| (planar_distance(origin, station.coordinate), station))
        .collect();

    // Coordinates are finite by construction, so no NaN reaches the
    // comparator and total_cmp agrees with the usual order.
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, station)| Arc::clone(station))
        .collect()
}

/// Straight-line delta in degree space.
fn planar_distance(origin: Coordinate, station: Coordinate) -> f64 {
    let dlat = origin.lat() - station.lat();
    let dlng = origin.lng() - station.lng();
    (dlat * dlat + dlng * dlng).sqrt()
}
