//! Finder configuration.

/// Default candidate set size.
///
/// The planar pre-filter keeps the 25 stations nearest in degree space,
/// so the batched distance request stays small no matter how many
/// stations the source returns.
const DEFAULT_CANDIDATE_LIMIT: usize = 25;

/// Configuration for the proximity pipeline.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Maximum candidate set size per resolution cycle.
    pub candidate_limit: usize,
}

impl FinderConfig {
    /// Create a configuration with a custom candidate limit.
    pub fn new(candidate_limit: usize) -> Self {
        Self { candidate_limit }
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}
