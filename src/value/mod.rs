//! Value module - Generic representation of parsed documents.
//!
//! This module normalizes parsed YAML or JSON trees into a single value
//! model so the differ can compare documents structurally.

mod convert;
mod value;

pub use convert::*;
pub use value::*;
