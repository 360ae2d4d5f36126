use std::path::Path;

use anyhow::{Context, anyhow, bail};
use lens_config::GeneralConfig;
use lens_core::collaborators::ImageUpload;
use lens_core::entities::IngredientAnalysisResult;
use lens_core::presentation::{AssessmentView, IngredientSection, finding_details};
use lens_workflow::{AnalysisState, IngredientAnalysisController};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::root_commands::AnalyzeArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    file: String,
    sections: Vec<IngredientSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assessment: Option<AssessmentView>,
}

impl AnalyzeReport {
    fn new(file: String, result: &IngredientAnalysisResult) -> Self {
        Self {
            file,
            sections: result.sections(),
            assessment: result.assessment_view(),
        }
    }
}

/// Handle `nlens analyze`.
pub async fn handle(args: &AnalyzeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config(flags)?;
    let upload = load_image(&args.image, &config.general)?;
    let file = upload.file_name.clone();

    let client = bootstrap::service_client(&config)?;
    let controller = IngredientAnalysisController::new(client, config.workflow.timeout());
    let selected = controller.select_image(upload);
    tracing::debug!(preview = ?selected.preview, "image selected");

    let spinner = Progress::spinner("Analyzing ingredients...");
    match controller.run_analysis().await? {
        AnalysisState::Succeeded { result, .. } => {
            spinner.finish_clear();
            print_report(&AnalyzeReport::new(file, &result), flags.format)
        }
        AnalysisState::Failed { error, .. } => {
            spinner.finish_err(error.kind().as_str());
            Err(anyhow!(error))
        }
        other => Err(anyhow!(
            "ingredient analysis ended in unexpected state: {}",
            other.phase()
        )),
    }
}

/// Read an image file, rejecting unsupported types and oversized files
/// before anything is uploaded.
fn load_image(path: &Path, general: &GeneralConfig) -> anyhow::Result<ImageUpload> {
    let content_type = content_type_for(path)
        .filter(|content_type| general.accepts(content_type))
        .with_context(|| {
            format!(
                "{} is not an accepted image type ({})",
                path.display(),
                general.accepted_image_types.join(", ")
            )
        })?;

    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }
    if bytes.len() as u64 > general.max_image_bytes {
        bail!(
            "{} is {} bytes, larger than the {} byte limit",
            path.display(),
            bytes.len(),
            general.max_image_bytes
        );
    }

    let file_name = path
        .file_name()
        .map_or_else(|| String::from("image"), |name| name.to_string_lossy().into_owned());
    Ok(ImageUpload::new(file_name, content_type, bytes))
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn print_report(report: &AnalyzeReport, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output::output(report, format);
    }

    println!("Ingredient analysis: {}\n", report.file);
    for section in &report.sections {
        println!("{}", section.title);
        if section.is_empty() {
            println!("  {}", section.empty_message);
        }
        for finding in &section.findings {
            println!("  • {}", finding.name);
            for line in finding_details(finding) {
                println!("      {line}");
            }
        }
        println!();
    }

    if let Some(assessment) = &report.assessment {
        println!("Overall Assessment: {} ({})", assessment.risk_level, assessment.tone.as_str());
        if !assessment.summary.is_empty() {
            println!("  {}", assessment.summary);
        }
        for recommendation in &assessment.recommendations {
            println!("  - {recommendation}");
        }
    }
    Ok(())
}
