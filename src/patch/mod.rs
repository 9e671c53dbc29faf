//! Patch module - Operation lists and in-place application.
//!
//! A patch is an ordered list of operations addressed by pointer or path
//! expression. Application mutates a parsed tree directly so untouched
//! nodes keep their document order.

mod apply;
mod error;
mod op;
mod resolve;


pub use apply::*;
pub use error::*;
pub use op::*;
pub use resolve::*;
