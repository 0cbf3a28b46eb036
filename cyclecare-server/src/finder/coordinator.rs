//! Location change coordination.
//!
//! Sequences reduce → resolve → rank whenever the origin changes, and
//! guarantees that at most one cycle's results are ever current. Each
//! cycle takes a monotonically increasing number; a completion only
//! publishes if its number is still the latest issued, so a slow,
//! superseded request can never overwrite fresher results. The
//! in-flight call itself is never cancelled - it is idempotent and
//! side-effect free upstream - its result is simply dropped on arrival.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{Coordinate, RankedView, Station};
use crate::matrix::{DistanceMatrix, MatrixError};

use super::config::FinderConfig;
use super::rank::rank;
use super::reduce::reduce;
use super::resolve::resolve_candidates;

/// What the map and panel renderers currently see.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// No origin selected yet.
    #[default]
    Idle,
    /// A cycle is in flight; any prior view has been discarded.
    Resolving { cycle: u64 },
    /// The latest completed cycle's ranked view.
    Ready(Arc<RankedView>),
    /// The latest cycle failed; no view is available.
    Failed { message: String },
}

/// Outcome of one [`Coordinator::relocate`] call.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// This cycle's view was published.
    Published(Arc<RankedView>),
    /// A newer origin arrived while this cycle was in flight; its
    /// result was discarded. Not an error.
    Superseded,
}

/// Sequences resolution cycles across origin changes.
///
/// The published state is the only shared mutable piece: written solely
/// here at cycle transitions, read by the web layer. All per-cycle
/// scratch state (candidate set, resolved distances) is freshly
/// allocated inside `relocate` and dropped with it.
pub struct Coordinator {
    matrix: Arc<dyn DistanceMatrix>,
    config: FinderConfig,
    /// Number of the most recently issued cycle.
    cycle: AtomicU64,
    /// Published state, written only at cycle transitions.
    state: RwLock<ViewState>,
}

impl Coordinator {
    /// Create a new coordinator over the given distance provider.
    pub fn new(matrix: Arc<dyn DistanceMatrix>, config: FinderConfig) -> Self {
        Self {
            matrix,
            config,
            cycle: AtomicU64::new(0),
            state: RwLock::new(ViewState::Idle),
        }
    }

    /// The currently published state.
    pub async fn current(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Run one resolution cycle for a new origin.
    ///
    /// Discards all state derived from the previous origin, pre-filters
    /// the station set synchronously, resolves travel distances through
    /// the external service and publishes the ranked view - unless a
    /// newer origin arrives first, in which case this cycle's result is
    /// dropped and `Superseded` is returned.
    ///
    /// An empty station set publishes an empty view without issuing any
    /// external call. A resolution failure publishes `Failed` (clearing
    /// any prior view) and surfaces the service error verbatim, but only
    /// if this cycle is still the latest; superseded failures are
    /// swallowed like superseded successes.
    pub async fn relocate(
        &self,
        origin: Coordinate,
        stations: &[Arc<Station>],
    ) -> Result<CycleOutcome, MatrixError> {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;

        {
            // A newer cycle may already have announced itself; never
            // roll the visible state backwards.
            let mut state = self.state.write().await;
            if self.is_latest(cycle) {
                *state = ViewState::Resolving { cycle };
            }
        }

        let candidates = reduce(origin, stations, self.config.candidate_limit);
        debug!(cycle, candidates = candidates.len(), "starting resolution cycle");

        if candidates.is_empty() {
            return Ok(self.publish(cycle, RankedView::empty(origin)).await);
        }

        match resolve_candidates(self.matrix.as_ref(), origin, candidates).await {
            Ok(resolved) => {
                let view = RankedView {
                    origin,
                    stations: rank(resolved),
                    resolved_at: Utc::now(),
                };
                Ok(self.publish(cycle, view).await)
            }
            Err(err) => {
                let mut state = self.state.write().await;
                if !self.is_latest(cycle) {
                    debug!(cycle, error = %err, "discarding superseded failure");
                    return Ok(CycleOutcome::Superseded);
                }
                *state = ViewState::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Publish a completed view if this cycle is still the latest issued.
    async fn publish(&self, cycle: u64, view: RankedView) -> CycleOutcome {
        let mut state = self.state.write().await;

        if !self.is_latest(cycle) {
            debug!(cycle, "discarding superseded view");
            return CycleOutcome::Superseded;
        }

        let view = Arc::new(view);
        *state = ViewState::Ready(Arc::clone(&view));
        debug!(cycle, stations = view.stations.len(), "published ranked view");
        CycleOutcome::Published(view)
    }

    fn is_latest(&self, cycle: u64) -> bool {
        self.cycle.load(Ordering::SeqCst) == cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use futures::future::BoxFuture;
    use tokio::sync::Mutex;

    use crate::domain::{ResolvedDistance, StationId};

    /// One scripted reply from the fake distance service.
    enum Reply {
        /// Element i carries `distanceValue = i * step`.
        Steps { step: u32 },
        /// Fail the batch with this service status.
        Fail { status: String },
        /// Return this many elements regardless of the request size.
        Truncated { len: usize },
    }

    /// Fake distance service replaying scripted replies in call order.
    /// Calls beyond the script answer `Steps { step: 10 }` immediately.
    struct ScriptedMatrix {
        script: Mutex<VecDeque<(Duration, Reply)>>,
        calls: AtomicUsize,
    }

    impl ScriptedMatrix {
        fn new() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn then(self, delay_ms: u64, reply: Reply) -> Self {
            self.script
                .try_lock()
                .unwrap()
                .push_back((Duration::from_millis(delay_ms), reply));
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DistanceMatrix for ScriptedMatrix {
        fn distances<'a>(
            &'a self,
            _origin: Coordinate,
            destinations: &'a [Coordinate],
        ) -> BoxFuture<'a, Result<Vec<ResolvedDistance>, MatrixError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);

                let scripted = self.script.lock().await.pop_front();
                let (delay, reply) =
                    scripted.unwrap_or((Duration::ZERO, Reply::Steps { step: 10 }));

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                match reply {
                    Reply::Steps { step } => Ok((0..destinations.len())
                        .map(|i| ResolvedDistance {
                            text: format!("{} mi", i),
                            value: i as u32 * step,
                        })
                        .collect()),
                    Reply::Fail { status } => Err(MatrixError::Api {
                        status,
                        message: None,
                    }),
                    Reply::Truncated { len } => Ok((0..len)
                        .map(|i| ResolvedDistance {
                            text: format!("{} mi", i),
                            value: i as u32 * 10,
                        })
                        .collect()),
                }
            })
        }
    }

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn station(id: u64, lat: f64, lng: f64) -> Arc<Station> {
        Arc::new(Station {
            id: StationId(id),
            coordinate: coord(lat, lng),
            description: format!("station {id}"),
            owner: "City".to_string(),
            image_path: String::new(),
        })
    }

    /// 30 synthetic stations spread over a 0.1 degree box around Madison.
    fn synthetic_stations() -> Vec<Arc<Station>> {
        (0..30)
            .map(|i| {
                let step = i as f64 * (0.1 / 30.0);
                station(i, 43.02 + step, -89.45 + step)
            })
            .collect()
    }

    fn coordinator(matrix: ScriptedMatrix) -> (Arc<Coordinator>, Arc<ScriptedMatrix>) {
        let matrix = Arc::new(matrix);
        let coordinator = Arc::new(Coordinator::new(
            matrix.clone() as Arc<dyn DistanceMatrix>,
            FinderConfig::default(),
        ));
        (coordinator, matrix)
    }

    #[tokio::test]
    async fn thirty_stations_yield_twenty_five_ranked() {
        let (coordinator, matrix) = coordinator(ScriptedMatrix::new());
        let origin = coord(43.07, -89.40);

        let outcome = coordinator
            .relocate(origin, &synthetic_stations())
            .await
            .unwrap();

        let CycleOutcome::Published(view) = outcome else {
            panic!("expected a published view");
        };
        assert_eq!(view.stations.len(), 25);
        assert_eq!(matrix.call_count(), 1);

        // Stub distances are index*10, so the ranked values are exactly
        // 0, 10, ..., 240.
        let values: Vec<u32> = view.stations.iter().map(|c| c.distance.value).collect();
        let expected: Vec<u32> = (0..25).map(|i| i * 10).collect();
        assert_eq!(values, expected);
    }

    #[tokio::test]
    async fn empty_station_set_publishes_empty_view_without_calls() {
        let (coordinator, matrix) = coordinator(ScriptedMatrix::new());
        let origin = coord(43.07, -89.40);

        let outcome = coordinator.relocate(origin, &[]).await.unwrap();

        let CycleOutcome::Published(view) = outcome else {
            panic!("expected a published view");
        };
        assert!(view.stations.is_empty());
        assert_eq!(matrix.call_count(), 0);

        match coordinator.current().await {
            ViewState::Ready(view) => assert!(view.stations.is_empty()),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn newer_origin_supersedes_inflight_cycle() {
        // First call answers slowly, second immediately; the slow
        // first-issued cycle completes last.
        let matrix = ScriptedMatrix::new()
            .then(200, Reply::Steps { step: 10 })
            .then(0, Reply::Steps { step: 10 });
        let (coordinator, _matrix) = coordinator(matrix);

        let origin_a = coord(43.02, -89.45);
        let origin_b = coord(43.12, -89.35);
        let stations = synthetic_stations();

        let first = {
            let coordinator = coordinator.clone();
            let stations = stations.clone();
            tokio::spawn(async move { coordinator.relocate(origin_a, &stations).await })
        };
        // Let the first cycle reach the distance service before the
        // second origin arrives.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = coordinator.relocate(origin_b, &stations).await.unwrap();
        let CycleOutcome::Published(view) = second else {
            panic!("expected the fresh cycle to publish");
        };
        assert_eq!(view.origin, origin_b);

        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, CycleOutcome::Superseded));

        // The published state still reflects the latest origin.
        match coordinator.current().await {
            ViewState::Ready(view) => assert_eq!(view.origin, origin_b),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_publishes_failed_and_clears_prior_view() {
        let matrix = ScriptedMatrix::new()
            .then(0, Reply::Steps { step: 10 })
            .then(
                0,
                Reply::Fail {
                    status: "UNKNOWN_ERROR".to_string(),
                },
            );
        let (coordinator, _matrix) = coordinator(matrix);
        let stations = synthetic_stations();

        let first = coordinator
            .relocate(coord(43.07, -89.40), &stations)
            .await
            .unwrap();
        assert!(matches!(first, CycleOutcome::Published(_)));

        let err = coordinator
            .relocate(coord(43.08, -89.41), &stations)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("UNKNOWN_ERROR"));

        // The stale Ready view is gone, not left hanging.
        match coordinator.current().await {
            ViewState::Failed { message } => assert!(message.contains("UNKNOWN_ERROR")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn superseded_failure_does_not_clobber_fresh_view() {
        // The first-issued cycle fails slowly; the second succeeds
        // immediately and must stay published.
        let matrix = ScriptedMatrix::new()
            .then(
                200,
                Reply::Fail {
                    status: "UNKNOWN_ERROR".to_string(),
                },
            )
            .then(0, Reply::Steps { step: 10 });
        let (coordinator, _matrix) = coordinator(matrix);

        let origin_a = coord(43.02, -89.45);
        let origin_b = coord(43.12, -89.35);
        let stations = synthetic_stations();

        let first = {
            let coordinator = coordinator.clone();
            let stations = stations.clone();
            tokio::spawn(async move { coordinator.relocate(origin_a, &stations).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = coordinator.relocate(origin_b, &stations).await.unwrap();
        assert!(matches!(second, CycleOutcome::Published(_)));

        // The superseded failure is swallowed, not surfaced.
        let first = first.await.unwrap();
        assert!(matches!(first, Ok(CycleOutcome::Superseded)));

        match coordinator.current().await {
            ViewState::Ready(view) => assert_eq!(view.origin, origin_b),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn truncated_response_fails_the_cycle() {
        let matrix = ScriptedMatrix::new().then(0, Reply::Truncated { len: 3 });
        let (coordinator, _matrix) = coordinator(matrix);

        let err = coordinator
            .relocate(coord(43.07, -89.40), &synthetic_stations())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MatrixError::LengthMismatch {
                requested: 25,
                returned: 3
            }
        ));
    }

    #[tokio::test]
    async fn starts_idle() {
        let (coordinator, _matrix) = coordinator(ScriptedMatrix::new());
        assert!(matches!(coordinator.current().await, ViewState::Idle));
    }
}
