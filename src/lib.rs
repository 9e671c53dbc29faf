//! # YAML Patch
//!
//! A Rust implementation of structural diff and patch for YAML documents.
//!
//! Comparing two parsed documents yields an ordered list of operations,
//! each addressed by an RFC 6901 style pointer. Applying a list mutates a
//! document tree in place, so everything the patch does not touch keeps
//! its original key order.
//!
//! ## Modules
//!
//! - [`value`] - Generic representation of parsed documents
//! - [`pointer`] - Slash separated addresses into document trees
//! - [`yamlpath`] - Query expressions over document trees
//! - [`tree`] - The mutable parsed document
//! - [`diff`] - Structural comparison of documents
//! - [`patch`] - Operation lists and in-place application

pub mod diff;
pub mod patch;
pub mod pointer;
pub mod tree;
pub mod value;
pub mod yamlpath;

pub use diff::{
    compare, compare_at, compare_documents, compare_with_options, DiffOptions, SequenceMode,
};
pub use patch::{
    apply, apply_document, apply_document_with_options, apply_with_options, patch_document,
    ApplyOptions, OpKind, PatchError, PatchOperation,
};
pub use tree::Node;
pub use value::Value;
