//! Proximity-reduction and distance-resolution pipeline.
//!
//! Given an origin and the full station set: pre-filter to a bounded
//! candidate set with a cheap planar heuristic, resolve true travel
//! distances for those candidates through the external service in one
//! batched call, and publish a distance-ordered view. The coordinator
//! sequences cycles across origin changes so that a superseded origin
//! can never overwrite a fresher one.

mod config;
mod coordinator;
mod rank;
mod reduce;
mod resolve;

pub use config::FinderConfig;
pub use coordinator::{Coordinator, CycleOutcome, ViewState};
pub use rank::rank;
pub use reduce::reduce;
pub use resolve::resolve_candidates;
