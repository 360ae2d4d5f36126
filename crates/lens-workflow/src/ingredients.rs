//! Ingredient analysis workflow.
//!
//! ```text
//! empty ──select──▶ selected ──analyze──▶ analyzing ──▶ succeeded
//!                                                   └──▶ failed
//! any state ──select──▶ selected           (in-flight result discarded)
//! succeeded | failed ──analyze──▶ analyzing
//! analyzing ──analyze──▶ analyzing          (earlier request superseded)
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lens_core::collaborators::{ImageUpload, IngredientAnalysisService};
use lens_core::entities::IngredientAnalysisResult;
use lens_core::enums::AnalysisPhase;
use lens_core::errors::ServiceError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::{AnalysisError, AnalysisFailure};
use crate::sequence::RequestSequence;

// ── Types ──────────────────────────────────────────────────────────

/// Renderable preview of the selected image: a `data:` URL.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    fn for_upload(upload: &ImageUpload) -> Self {
        Self(format!(
            "data:{};base64,{}",
            upload.content_type,
            STANDARD.encode(&upload.bytes)
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreviewHandle({} chars)", self.0.len())
    }
}

/// The image currently held by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub upload: ImageUpload,
    pub preview: PreviewHandle,
}

/// Observable state of the ingredient analysis workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisState {
    #[default]
    Empty,
    Selected {
        image: Arc<SelectedImage>,
    },
    Analyzing {
        image: Arc<SelectedImage>,
        request: u64,
    },
    Succeeded {
        image: Arc<SelectedImage>,
        result: Arc<IngredientAnalysisResult>,
    },
    Failed {
        image: Arc<SelectedImage>,
        error: AnalysisError,
    },
}

impl AnalysisState {
    #[must_use]
    pub const fn phase(&self) -> AnalysisPhase {
        match self {
            Self::Empty => AnalysisPhase::Empty,
            Self::Selected { .. } => AnalysisPhase::Selected,
            Self::Analyzing { .. } => AnalysisPhase::Analyzing,
            Self::Succeeded { .. } => AnalysisPhase::Succeeded,
            Self::Failed { .. } => AnalysisPhase::Failed,
        }
    }

    #[must_use]
    pub const fn image(&self) -> Option<&Arc<SelectedImage>> {
        match self {
            Self::Empty => None,
            Self::Selected { image }
            | Self::Analyzing { image, .. }
            | Self::Succeeded { image, .. }
            | Self::Failed { image, .. } => Some(image),
        }
    }

    #[must_use]
    pub const fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing { .. })
    }

    #[must_use]
    pub fn result(&self) -> Option<&IngredientAnalysisResult> {
        match self {
            Self::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&AnalysisError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ── Controller ─────────────────────────────────────────────────────

/// Holds the selected image, uploads it on request, and publishes the state.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct IngredientAnalysisController {
    inner: Arc<Inner>,
}

struct Inner {
    service: Arc<dyn IngredientAnalysisService>,
    timeout: Duration,
    sequence: RequestSequence,
    state: watch::Sender<AnalysisState>,
}

impl IngredientAnalysisController {
    /// Create an empty controller. Each upload is bounded by `timeout`.
    #[must_use]
    pub fn new(service: Arc<dyn IngredientAnalysisService>, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                service,
                timeout,
                sequence: RequestSequence::new(),
                state: watch::Sender::new(AnalysisState::Empty),
            }),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> AnalysisState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.inner.state.subscribe()
    }

    /// Hold `upload` as the current image, from any state.
    ///
    /// Any previous result or error is cleared and an analysis in flight is
    /// discarded when it completes.
    pub fn select_image(&self, upload: ImageUpload) -> Arc<SelectedImage> {
        let preview = PreviewHandle::for_upload(&upload);
        let image = Arc::new(SelectedImage { upload, preview });
        self.inner.state.send_modify(|state| {
            tracing::debug!(
                from = %state.phase(),
                file = %image.upload.file_name,
                bytes = image.upload.len(),
                "image selected"
            );
            transition(
                state,
                AnalysisState::Selected {
                    image: Arc::clone(&image),
                },
            );
        });
        image
    }

    /// Start analyzing the selected image in the background.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoImageSelected`] without any transition or
    /// remote call when no image is held.
    pub fn analyze(&self) -> Result<JoinHandle<()>, AnalysisError> {
        let (request, image) = self.begin()?;
        let inner = Arc::clone(&self.inner);
        Ok(tokio::spawn(async move {
            inner.execute(request, image).await;
        }))
    }

    /// Analyze the selected image on the current task and return the
    /// settled state.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NoImageSelected`] when no image is held.
    pub async fn run_analysis(&self) -> Result<AnalysisState, AnalysisError> {
        let (request, image) = self.begin()?;
        self.inner.execute(request, image).await;
        Ok(self.settled().await)
    }

    /// Wait until the controller is not `analyzing` and return that state.
    pub async fn settled(&self) -> AnalysisState {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|state| !state.is_analyzing()).await;
        settled.map_or_else(|_| self.state(), |state| state.clone())
    }

    fn begin(&self) -> Result<(u64, Arc<SelectedImage>), AnalysisError> {
        let mut issued = None;
        self.inner.state.send_if_modified(|state| {
            let Some(image) = state.image().cloned() else {
                return false;
            };
            let request = self.inner.sequence.issue();
            if state.is_analyzing() {
                tracing::debug!(request, "superseding in-flight analysis");
            }
            tracing::debug!(request, from = %state.phase(), "analyzing image");
            transition(
                state,
                AnalysisState::Analyzing {
                    image: Arc::clone(&image),
                    request,
                },
            );
            issued = Some((request, image));
            true
        });
        issued.ok_or_else(|| {
            tracing::debug!("analyze requested with no image selected");
            AnalysisError::NoImageSelected
        })
    }
}

impl Inner {
    async fn execute(&self, request: u64, image: Arc<SelectedImage>) {
        let outcome = tokio::time::timeout(self.timeout, self.service.analyze(&image.upload))
            .await
            .unwrap_or_else(|_| Err(ServiceError::timeout(self.timeout)));

        let next = match outcome {
            Ok(result) => AnalysisState::Succeeded {
                image,
                result: Arc::new(result),
            },
            Err(err) => AnalysisState::Failed {
                image,
                error: AnalysisError::AnalysisFailed(AnalysisFailure::from(err)),
            },
        };
        self.commit(request, next);
    }

    /// Publish `next` if `request` is still the one being waited for.
    fn commit(&self, request: u64, next: AnalysisState) {
        let committed = self.state.send_if_modified(|state| match state {
            AnalysisState::Analyzing { request: current, .. } if *current == request => {
                match &next {
                    AnalysisState::Succeeded { result, .. } => tracing::info!(
                        request,
                        harmful = result.harmful_ingredients.len(),
                        preservatives = result.preservatives.len(),
                        "ingredient analysis succeeded"
                    ),
                    AnalysisState::Failed { error, .. } => tracing::debug!(
                        request,
                        reported = error.is_reported(),
                        %error,
                        "ingredient analysis failed"
                    ),
                    _ => {}
                }
                transition(state, next);
                true
            }
            _ => false,
        });
        if !committed {
            tracing::warn!(request, "discarding superseded analysis response");
        }
    }
}

/// Replace `state` with `next`, checking the move against the phase table.
fn transition(state: &mut AnalysisState, next: AnalysisState) {
    debug_assert!(
        state.phase().can_transition_to(next.phase()),
        "invalid analysis transition {} -> {}",
        state.phase(),
        next.phase()
    );
    *state = next;
}
