//! Nutrition risk workflow.
//!
//! ```text
//! idle ──start──▶ loading ──▶ ready
//!                    │    └──▶ failed
//! ready | failed ──refresh──▶ loading
//! loading ──refresh──▶ loading   (earlier request superseded)
//! ```
//!
//! One run fetches the latest record, flattens it, and requests predictions.
//! The controller stays `loading` for the whole fetch and predict sequence.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lens_core::collaborators::{NutritionStore, PredictionService};
use lens_core::entities::{
    DiseaseRiskPrediction, FlatNutritionPayload, FoodSourceMap, NutritionRecord,
    PredictionResponse, ProfileEntry, Recommendations,
};
use lens_core::enums::NutritionPhase;
use lens_core::errors::ServiceError;
use lens_core::flatten::flatten_checked;
use lens_core::presentation::recommendations_report;
use lens_core::ranking::{Ranking, rank};
use lens_core::risk::{DiseaseRisk, assess};
use lens_core::warnings::DataWarning;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::NutritionError;
use crate::sequence::RequestSequence;

// ── Types ──────────────────────────────────────────────────────────

/// Result of one successful run. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionAssessment {
    pub record: NutritionRecord,
    pub payload: FlatNutritionPayload,
    pub predictions: Vec<DiseaseRiskPrediction>,
    pub recommendations: Recommendations,
    pub food_sources: FoodSourceMap,
    /// Data-quality findings from flattening, classification, and ranking.
    pub warnings: Vec<DataWarning>,
    pub assessed_at: DateTime<Utc>,
}

impl NutritionAssessment {
    fn new(
        record: NutritionRecord,
        payload: FlatNutritionPayload,
        response: PredictionResponse,
        mut warnings: Vec<DataWarning>,
    ) -> Self {
        let (_, risk_warnings) = assess(&response.predictions);
        warnings.extend(risk_warnings);
        warnings.extend(rank(&response.recommendations).warnings);
        for warning in &warnings {
            warning.log();
        }

        Self {
            record,
            payload,
            predictions: response.predictions,
            recommendations: response.recommendations,
            food_sources: response.food_sources,
            warnings,
            assessed_at: Utc::now(),
        }
    }

    /// Classified risks, in service order.
    #[must_use]
    pub fn risks(&self) -> Vec<DiseaseRisk> {
        assess(&self.predictions).0
    }

    /// Recommendations by importance, with progress metrics.
    #[must_use]
    pub fn ranking(&self) -> Ranking {
        rank(&self.recommendations)
    }

    /// Profile overview of the assessed record.
    #[must_use]
    pub fn profile(&self) -> Vec<ProfileEntry> {
        self.record.profile_entries()
    }

    /// Plain-text recommendation report.
    #[must_use]
    pub fn report(&self) -> String {
        recommendations_report(&self.ranking(), &self.food_sources)
    }
}

/// Observable state of the nutrition workflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NutritionState {
    #[default]
    Idle,
    Loading {
        /// Request whose outcome this state is waiting for.
        request: u64,
    },
    Ready(Box<NutritionAssessment>),
    Failed(NutritionError),
}

impl NutritionState {
    #[must_use]
    pub const fn phase(&self) -> NutritionPhase {
        match self {
            Self::Idle => NutritionPhase::Idle,
            Self::Loading { .. } => NutritionPhase::Loading,
            Self::Ready(_) => NutritionPhase::Ready,
            Self::Failed(_) => NutritionPhase::Failed,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    #[must_use]
    pub fn assessment(&self) -> Option<&NutritionAssessment> {
        match self {
            Self::Ready(assessment) => Some(assessment),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&NutritionError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

// ── Controller ─────────────────────────────────────────────────────

/// Drives fetch, flatten, and predict, and publishes the state.
///
/// Cloning yields another handle to the same controller. Spawning methods
/// must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct NutritionWorkflowController {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn NutritionStore>,
    predictor: Arc<dyn PredictionService>,
    timeout: Duration,
    sequence: RequestSequence,
    state: watch::Sender<NutritionState>,
}

impl NutritionWorkflowController {
    /// Create an idle controller. Each remote call is bounded by `timeout`.
    #[must_use]
    pub fn new(
        store: Arc<dyn NutritionStore>,
        predictor: Arc<dyn PredictionService>,
        timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                predictor,
                timeout,
                sequence: RequestSequence::new(),
                state: watch::Sender::new(NutritionState::Idle),
            }),
        }
    }

    /// Create a controller and begin its first run right away.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn launch(
        store: Arc<dyn NutritionStore>,
        predictor: Arc<dyn PredictionService>,
        timeout: Duration,
    ) -> Self {
        let controller = Self::new(store, predictor, timeout);
        // A fresh controller is idle, so this always spawns; the task runs detached.
        let _ = controller.start();
        controller
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> NutritionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<NutritionState> {
        self.inner.state.subscribe()
    }

    /// Begin the first run. Only acts from `idle`; returns `None` otherwise.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        let mut issued = None;
        self.inner.state.send_if_modified(|state| {
            if !matches!(state, NutritionState::Idle) {
                return false;
            }
            let request = self.inner.sequence.issue();
            tracing::debug!(request, from = %state.phase(), "nutrition workflow started");
            transition(state, NutritionState::Loading { request });
            issued = Some(request);
            true
        });
        issued.map(|request| self.spawn(request))
    }

    /// Restart the full fetch and predict sequence from any state.
    ///
    /// Previous results are cleared. A run still in flight is superseded and
    /// its outcome discarded.
    pub fn refresh(&self) -> JoinHandle<()> {
        let request = self.begin();
        self.spawn(request)
    }

    /// Run one full sequence on the current task and return the settled state.
    ///
    /// The returned state belongs to a newer request if this one was
    /// superseded while in flight.
    pub async fn run(&self) -> NutritionState {
        let request = self.begin();
        self.inner.execute(request).await;
        self.settled().await
    }

    /// Wait until the controller is not `loading` and return that state.
    pub async fn settled(&self) -> NutritionState {
        let mut rx = self.subscribe();
        // The sender lives in `inner`, so the channel cannot close here.
        let settled = rx.wait_for(|state| !state.is_loading()).await;
        settled.map_or_else(|_| self.state(), |state| state.clone())
    }

    fn begin(&self) -> u64 {
        let mut request = 0;
        self.inner.state.send_modify(|state| {
            request = self.inner.sequence.issue();
            if state.is_loading() {
                tracing::debug!(request, "superseding in-flight nutrition request");
            }
            tracing::debug!(request, from = %state.phase(), "nutrition workflow loading");
            transition(state, NutritionState::Loading { request });
        });
        request
    }

    fn spawn(&self, request: u64) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.execute(request).await })
    }
}

impl Inner {
    async fn execute(&self, request: u64) {
        let records = match self.bounded(self.store.fetch_latest()).await {
            Ok(records) => records,
            Err(source) => {
                let error = NutritionError::FetchFailed { source };
                self.commit(request, NutritionState::Failed(error));
                return;
            }
        };
        let Some(record) = records.into_iter().next() else {
            self.commit(request, NutritionState::Failed(NutritionError::NoDataAvailable));
            return;
        };

        if !self.sequence.is_latest(request) {
            tracing::warn!(request, "discarding superseded nutrition fetch");
            return;
        }

        let (payload, warnings) = flatten_checked(&record);
        tracing::debug!(request, fields = payload.len(), "record flattened");

        let next = match self.bounded(self.predictor.predict(&payload)).await {
            Ok(response) => NutritionState::Ready(Box::new(NutritionAssessment::new(
                record, payload, response, warnings,
            ))),
            Err(source) => NutritionState::Failed(NutritionError::PredictionFailed { source }),
        };
        self.commit(request, next);
    }

    /// Await `call`, failing with [`ServiceError::Timeout`] past the deadline.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or_else(|_| Err(ServiceError::timeout(self.timeout)))
    }

    /// Publish `next` if `request` is still the one being waited for.
    fn commit(&self, request: u64, next: NutritionState) {
        let committed = self.state.send_if_modified(|state| match state {
            NutritionState::Loading { request: current } if *current == request => {
                match &next {
                    NutritionState::Ready(assessment) => tracing::info!(
                        request,
                        predictions = assessment.predictions.len(),
                        recommendations = assessment.recommendations.len(),
                        warnings = assessment.warnings.len(),
                        "nutrition assessment ready"
                    ),
                    NutritionState::Failed(error) => tracing::debug!(
                        request,
                        kind = %error.kind(),
                        %error,
                        "nutrition workflow failed"
                    ),
                    NutritionState::Idle | NutritionState::Loading { .. } => {}
                }
                transition(state, next);
                true
            }
            _ => false,
        });
        if !committed {
            tracing::warn!(request, "discarding superseded nutrition response");
        }
    }
}

/// Replace `state` with `next`, checking the move against the phase table.
fn transition(state: &mut NutritionState, next: NutritionState) {
    debug_assert!(
        state.phase().can_transition_to(next.phase()),
        "invalid nutrition transition {} -> {}",
        state.phase(),
        next.phase()
    );
    *state = next;
}
