use anyhow::anyhow;
use lens_core::entities::ProfileEntry;
use lens_workflow::{NutritionAssessment, NutritionState, NutritionWorkflowController};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::rows::{RecommendationRow, RiskRow, recommendation_rows};
use crate::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct AssessReport {
    assessed_at: String,
    profile: Vec<ProfileEntry>,
    risks: Vec<RiskRow>,
    recommendations: Vec<RecommendationRow>,
    warnings: Vec<String>,
}

impl From<&NutritionAssessment> for AssessReport {
    fn from(assessment: &NutritionAssessment) -> Self {
        Self {
            assessed_at: assessment.assessed_at.to_rfc3339(),
            profile: assessment.profile(),
            risks: assessment.risks().iter().map(RiskRow::from).collect(),
            recommendations: recommendation_rows(&assessment.ranking(), &assessment.food_sources),
            warnings: assessment
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Handle `nlens assess`.
pub async fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config(flags)?;
    let client = bootstrap::service_client(&config)?;
    let spinner = Progress::spinner("Assessing latest nutrition record...");
    let controller =
        NutritionWorkflowController::launch(client.clone(), client, config.workflow.timeout());
    let state = controller.settled().await;

    match state {
        NutritionState::Ready(assessment) => {
            spinner.finish_clear();
            print_report(&AssessReport::from(assessment.as_ref()), flags.format)
        }
        NutritionState::Failed(error) => {
            spinner.finish_err(error.kind().as_str());
            Err(anyhow!(error))
        }
        other => Err(anyhow!(
            "nutrition workflow ended in unexpected state: {}",
            other.phase()
        )),
    }
}

fn print_report(report: &AssessReport, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output::output(report, format);
    }

    output::print_section("Nutrition Profile", &report.profile)?;
    output::print_section("Disease Risk", &report.risks)?;
    output::print_section("Recommendations", &report.recommendations)?;
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    Ok(())
}
