//! Ranked view ordering.

use crate::domain::ResolvedCandidate;

/// Sort resolved candidates ascending by numeric travel distance.
///
/// The sort is stable, so ties keep the resolver's output order. The
/// output is a permutation of the input, and ranking an already-ranked
/// sequence is a no-op. Every input element already carries a resolved
/// distance by type, so this function cannot fail.
pub fn rank(mut resolved: Vec<ResolvedCandidate>) -> Vec<ResolvedCandidate> {
    resolved.sort_by(|a, b| a.distance.value.cmp(&b.distance.value));
    resolved
}
