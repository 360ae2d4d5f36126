use lens_core::presentation::recommendations_report;
use lens_core::ranking::rank;

use crate::cli::root_commands::RecommendationsArgs;
use crate::input;

/// Handle `nlens report`. Always plain text.
pub fn handle(args: &RecommendationsArgs) -> anyhow::Result<()> {
    let (recommendations, food_sources) =
        input::recommendations_from(input::read_json(&args.input)?)?;
    let report = recommendations_report(&rank(&recommendations), &food_sources);
    println!("{}", report.trim_end());
    Ok(())
}
