use anyhow::{Context, bail};
use lens_schema::{SchemaError, SchemaRegistry};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaCommands;
use crate::input;
use crate::output;

#[derive(Debug, Serialize)]
struct Validation<'a> {
    schema: &'a str,
    valid: bool,
}

/// Handle `nlens schema`.
pub fn handle(action: &SchemaCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    match action {
        SchemaCommands::List => output::output(&registry.list(), flags.format),
        SchemaCommands::Show { name } => {
            let schema = registry
                .get(name)
                .with_context(|| format!("unknown schema '{name}'"))?;
            println!("{}", serde_json::to_string_pretty(schema)?);
            Ok(())
        }
        SchemaCommands::Validate { name, input } => {
            let document = input::read_json(input)?;
            match registry.validate(name, &document) {
                Ok(()) => output::output(
                    &Validation {
                        schema: name,
                        valid: true,
                    },
                    flags.format,
                ),
                Err(SchemaError::ValidationFailed { errors }) => {
                    for error in &errors {
                        eprintln!("  {error}");
                    }
                    bail!("{input} does not match schema '{name}' ({} errors)", errors.len())
                }
                Err(other) => Err(other.into()),
            }
        }
    }
}
