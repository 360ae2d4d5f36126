use anyhow::Context;
use lens_core::entities::NutritionRecord;
use lens_core::flatten::flatten_checked;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FlattenArgs;
use crate::input;
use crate::output;

/// Handle `nlens flatten`.
pub fn handle(args: &FlattenArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = NutritionRecord::from_value(input::read_json(&args.input)?)
        .with_context(|| format!("{} is not a nutrition record", args.input))?;

    let (payload, warnings) = flatten_checked(&record);
    for warning in &warnings {
        warning.log();
    }
    output::output(&payload, flags.format)
}
