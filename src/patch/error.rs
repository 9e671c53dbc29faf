//! Error types for diffing and patching documents.

use thiserror::Error;

use crate::yamlpath::ParseError;

use super::OpKind;

/// Errors surfaced while comparing documents or applying a patch.
///
/// Application errors name the index of the failing operation; earlier
/// operations stay applied.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("invalid yaml document: {0}")]
    InvalidDocument(#[from] serde_yaml::Error),

    #[error("operation {index}: pointer {pointer:?} must be empty or start with '/'")]
    InvalidPointer { index: usize, pointer: String },

    #[error("operation {index}: invalid path expression {expr:?}: {source}")]
    InvalidExpression {
        index: usize,
        expr: String,
        source: ParseError,
    },

    #[error("operation {index}: {op} has no pointer or path expression")]
    MissingAddress { index: usize, op: OpKind },

    #[error("operation {index}: both pointer and path expression are set")]
    ConflictingAddress { index: usize },

    #[error("operation {index}: missing value for {op}")]
    MissingValue { index: usize, op: OpKind },

    #[error("operation {index}: no node matched {path:?} for {op}")]
    Unmatched {
        index: usize,
        op: OpKind,
        path: String,
    },

    #[error("operation {index}: {path:?} matched {count} nodes, expected exactly one")]
    AmbiguousTarget {
        index: usize,
        path: String,
        count: usize,
    },

    #[error("operation {index}: invalid target {path:?}: {detail}")]
    InvalidTarget {
        index: usize,
        path: String,
        detail: String,
    },
}

impl PatchError {
    pub fn unmatched(index: usize, op: OpKind, path: impl Into<String>) -> Self {
        PatchError::Unmatched {
            index,
            op,
            path: path.into(),
        }
    }

    pub fn invalid_expression(index: usize, expr: impl Into<String>, source: ParseError) -> Self {
        PatchError::InvalidExpression {
            index,
            expr: expr.into(),
            source,
        }
    }

    pub fn invalid_target(index: usize, path: impl Into<String>, detail: impl Into<String>) -> Self {
        PatchError::InvalidTarget {
            index,
            path: path.into(),
            detail: detail.into(),
        }
    }
}
