//! Distance resolution for a candidate set.

use std::sync::Arc;

use crate::domain::{Coordinate, ResolvedCandidate, Station};
use crate::matrix::{DistanceMatrix, MatrixError};

/// Resolve travel distances for the candidate set, in candidate order.
///
/// Issues exactly one batched request. The service's response carries no
/// station identifiers; element `i` belongs to candidate `i` purely by
/// position. The length check runs before anything is merged, so a
/// reordered or truncated response fails fast instead of silently
/// misattributing distances to the wrong stations.
///
/// Any failure fails the whole batch; there are no partial results and
/// no retries at this layer.
pub async fn resolve_candidates(
    matrix: &dyn DistanceMatrix,
    origin: Coordinate,
    candidates: Vec<Arc<Station>>,
) -> Result<Vec<ResolvedCandidate>, MatrixError> {
    let destinations: Vec<Coordinate> = candidates.iter().map(|s| s.coordinate).collect();

    let distances = matrix.distances(origin, &destinations).await?;

    if distances.len() != candidates.len() {
        return Err(MatrixError::LengthMismatch {
            requested: candidates.len(),
            returned: distances.len(),
        });
    }

    Ok(candidates
        .into_iter()
        .zip(distances)
        .map(|(station, distance)| ResolvedCandidate { station, distance })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResolvedDistance, StationId};
    use futures::future::BoxFuture;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn station(id: u64) -> Arc<Station> {
        Arc::new(Station {
            id: StationId(id),
            coordinate: coord(43.07 + id as f64 * 0.001, -89.4),
            description: String::new(),
            owner: String::new(),
            image_path: String::new(),
        })
    }

    /// Returns a per-index distinguishable distance so misalignment
    /// would be visible: element i carries value `base - i * 10`.
    struct DescendingMatrix {
        base: u32,
        truncate_to: Option<usize>,
    }

    impl DistanceMatrix for DescendingMatrix {
        fn distances<'a>(
            &'a self,
            _origin: Coordinate,
            destinations: &'a [Coordinate],
        ) -> BoxFuture<'a, Result<Vec<ResolvedDistance>, MatrixError>> {
            Box::pin(async move {
                let count = self.truncate_to.unwrap_or(destinations.len());
                Ok((0..count)
                    .map(|i| ResolvedDistance {
                        text: format!("element {i}"),
                        value: self.base - i as u32 * 10,
                    })
                    .collect())
            })
        }
    }

    struct FailingMatrix;

    impl DistanceMatrix for FailingMatrix {
        fn distances<'a>(
            &'a self,
            _origin: Coordinate,
            _destinations: &'a [Coordinate],
        ) -> BoxFuture<'a, Result<Vec<ResolvedDistance>, MatrixError>> {
            Box::pin(async move { Err(MatrixError::RateLimited) })
        }
    }

    #[tokio::test]
    async fn merges_positionally() {
        let matrix = DescendingMatrix {
            base: 100,
            truncate_to: None,
        };
        let candidates = vec![station(7), station(3), station(9)];

        let resolved = resolve_candidates(&matrix, coord(43.07, -89.4), candidates)
            .await
            .unwrap();

        // Candidate order is preserved and element i landed on candidate i.
        assert_eq!(resolved[0].station.id, StationId(7));
        assert_eq!(resolved[0].distance.value, 100);
        assert_eq!(resolved[1].station.id, StationId(3));
        assert_eq!(resolved[1].distance.value, 90);
        assert_eq!(resolved[2].station.id, StationId(9));
        assert_eq!(resolved[2].distance.value, 80);
    }

    #[tokio::test]
    async fn short_response_fails_fast() {
        let matrix = DescendingMatrix {
            base: 100,
            truncate_to: Some(2),
        };
        let candidates = vec![station(1), station(2), station(3)];

        let err = resolve_candidates(&matrix, coord(43.07, -89.4), candidates)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MatrixError::LengthMismatch {
                requested: 3,
                returned: 2
            }
        ));
    }

    #[tokio::test]
    async fn service_failure_propagates() {
        let candidates = vec![station(1)];

        let err = resolve_candidates(&FailingMatrix, coord(43.07, -89.4), candidates)
            .await
            .unwrap_err();

        assert!(matches!(err, MatrixError::RateLimited));
    }
}
