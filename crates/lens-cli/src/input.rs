//! JSON document input from a file or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use lens_core::entities::{FoodSourceMap, Recommendations};
use serde::Deserialize;
use serde_json::Value;

/// Read and parse a JSON document. `-` reads stdin.
pub fn read_json(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("failed to read {source}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("{source} is not valid JSON"))
}

#[derive(Deserialize)]
struct WithFoodSources {
    recommendations: Recommendations,
    #[serde(default)]
    food_sources: FoodSourceMap,
}

/// Recommendations from either a bare `nutrient -> recommendation` mapping
/// or an object carrying `recommendations` and `food_sources`, such as a
/// full prediction response.
pub fn recommendations_from(value: Value) -> anyhow::Result<(Recommendations, FoodSourceMap)> {
    if value.get("recommendations").is_some_and(Value::is_object) {
        let parsed: WithFoodSources =
            serde_json::from_value(value).context("invalid recommendations document")?;
        return Ok((parsed.recommendations, parsed.food_sources));
    }
    let recommendations: Recommendations =
        serde_json::from_value(value).context("invalid recommendations mapping")?;
    Ok((recommendations, FoodSourceMap::default()))
}
