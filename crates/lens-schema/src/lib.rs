//! # lens-schema
//!
//! JSON Schema generation, validation, and registry for Nutrilens.
//!
//! Wire types are defined in `lens-core` with `#[derive(JsonSchema)]`. This
//! crate collects their schemas so service payloads can be checked before
//! they reach a workflow, and so `nlens schema` can export them.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
