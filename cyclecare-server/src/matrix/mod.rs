//! Travel-distance service boundary.
//!
//! The resolver submits one batched request per resolution cycle: one
//! origin, the candidate destinations in order, a travel mode and a unit
//! system. The service returns elements positionally aligned with the
//! destinations submitted; there is no identifier-based reconciliation,
//! so clients here length-check the response before anything is merged.

mod client;
mod error;
mod mock;
mod types;

use futures::future::BoxFuture;

use crate::domain::{Coordinate, ResolvedDistance};

pub use client::{MatrixClient, MatrixConfig};
pub use error::MatrixError;
pub use mock::MockMatrixClient;
pub use types::{DistanceDto, MatrixElement, MatrixResponse, MatrixRow, TravelMode, UnitSystem};

/// A travel-distance provider.
///
/// `distances` returns exactly one resolved distance per destination, in
/// destination order. Implementations must either uphold that alignment
/// or fail the whole batch; partial results are not modeled.
pub trait DistanceMatrix: Send + Sync {
    fn distances<'a>(
        &'a self,
        origin: Coordinate,
        destinations: &'a [Coordinate],
    ) -> BoxFuture<'a, Result<Vec<ResolvedDistance>, MatrixError>>;
}
