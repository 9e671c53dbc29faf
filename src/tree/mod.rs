//! Tree module - The mutable parsed document.
//!
//! The applier works directly on parsed trees so untouched nodes keep
//! their document order across a patch.

mod node;

pub use node::*;
