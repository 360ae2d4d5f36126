//! # lens-workflow
//!
//! The two Nutrilens workflow controllers:
//! - [`NutritionWorkflowController`]: fetch the latest record, flatten it,
//!   request disease risk predictions
//! - [`IngredientAnalysisController`]: hold a selected label image and
//!   request its ingredient analysis
//!
//! Both publish their state through a `tokio::sync::watch` channel. Each
//! request carries a number from a [`RequestSequence`]; a response whose
//! number is no longer current is discarded, so a stale result never
//! overwrites the state set by a newer request.

pub mod error;
pub mod ingredients;
pub mod nutrition;
pub mod sequence;

pub use error::{AnalysisError, AnalysisFailure, ErrorKind, NutritionError};
pub use ingredients::{
    AnalysisState, IngredientAnalysisController, PreviewHandle, SelectedImage,
};
pub use nutrition::{NutritionAssessment, NutritionState, NutritionWorkflowController};
pub use sequence::RequestSequence;
