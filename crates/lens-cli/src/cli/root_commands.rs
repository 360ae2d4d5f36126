use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch the latest nutrition record and assess disease risk.
    Assess,
    /// Analyze the ingredients on a food-label image.
    Analyze(AnalyzeArgs),
    /// Flatten a nutrition record into a prediction payload.
    Flatten(FlattenArgs),
    /// Classify risk percentages into bands.
    Classify(ClassifyArgs),
    /// Rank nutrient recommendations by importance.
    Rank(RecommendationsArgs),
    /// Print the text report for nutrient recommendations.
    Report(RecommendationsArgs),
    /// Inspect and validate against the wire schemas.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Label image (png or jpeg).
    pub image: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct FlattenArgs {
    /// JSON nutrition record, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: String,
}

#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// Risk percentages.
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Args)]
pub struct RecommendationsArgs {
    /// JSON recommendations mapping or full prediction response, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: String,
}

#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// List registered schema names.
    List,
    /// Print one schema.
    Show { name: String },
    /// Validate a JSON document against a schema.
    Validate {
        name: String,
        /// JSON document, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,
    },
}
