//! Core contracts for dalgen.
//!
//! This crate defines the entity description model, the output target
//! identifiers, and the input validation rules shared by the backends and
//! the CLI.

pub mod entity;
pub mod error;
pub mod target;
pub mod types;
pub mod validation;

pub use entity::{Attribute, AttributeReference, Entity};
pub use error::{Error, Result};
pub use target::{Target, UnknownTarget};
pub use types::LogicalType;
pub use validation::{ValidationFailure, validate};

/// Static banner placed at the top of every generated artifact.
pub const GENERATOR_COMMENT: &str = "generated by dalgen";
