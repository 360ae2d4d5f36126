use lens_core::risk::{DiseaseRisk, MAX_RISK};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::output;

#[derive(Debug, Serialize)]
struct BandRow {
    value: f64,
    band: String,
    color: String,
    width: f64,
}

fn band_rows(values: &[f64]) -> Vec<BandRow> {
    values
        .iter()
        .map(|value| {
            if *value > MAX_RISK {
                tracing::warn!(value, "risk above 100; classified as-is, clamped for display");
            }
            let risk = DiseaseRisk::new("value", *value);
            BandRow {
                value: *value,
                band: risk.band_text(),
                color: risk.color,
                width: risk.display_width,
            }
        })
        .collect()
}

/// Handle `nlens classify`.
pub fn handle(args: &ClassifyArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&band_rows(&args.values), flags.format)
}
