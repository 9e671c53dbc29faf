//! Diff module - Structural comparison of documents.
//!
//! Comparing two documents yields the ordered operation list that turns
//! the first into the second.

mod differ;


pub use differ::*;
