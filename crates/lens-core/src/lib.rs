//! # lens-core
//!
//! Core types and pure transforms for Nutrilens.
//!
//! This crate provides everything the workflows need that does not touch the
//! network:
//! - Value objects for nutrition records, predictions, and ingredient results
//! - Nutrient flattening, risk band classification, and recommendation ranking
//! - Workflow phase enums with transition rules
//! - Collaborator traits implemented by `lens-client`
//! - Data-quality warnings and presentation helpers

pub mod collaborators;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod flatten;
pub mod named;
pub mod presentation;
pub mod ranking;
pub mod risk;
pub mod warnings;
