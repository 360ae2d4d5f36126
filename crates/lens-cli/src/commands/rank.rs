use lens_core::ranking::rank;

use crate::cli::root_commands::RecommendationsArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::rows::recommendation_rows;
use crate::input;
use crate::output;

/// Handle `nlens rank`.
///
/// Table output shows display rows; json and raw emit the full ranking
/// with progress metrics and warnings.
pub fn handle(args: &RecommendationsArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (recommendations, food_sources) =
        input::recommendations_from(input::read_json(&args.input)?)?;
    let ranking = rank(&recommendations);
    for warning in &ranking.warnings {
        warning.log();
    }

    if flags.format != OutputFormat::Table {
        return output::output(&ranking, flags.format);
    }

    output::output(&recommendation_rows(&ranking, &food_sources), flags.format)?;
    for warning in &ranking.warnings {
        println!("warning: {warning}");
    }
    Ok(())
}
