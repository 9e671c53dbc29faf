//! YamlPath module - Query expressions over document trees.
//!
//! Supported syntax:
//!
//! - `$` - the document root
//! - `.name` - named child of a mapping
//! - `['name']`, `["name"]` - bracket notation for names
//! - `[i]` - sequence index, negative counts from the end
//! - `.*`, `[*]` - every child
//! - `['a','b']`, `[0,2]` - selector unions
//! - `..name`, `..[0]`, `..*` - recursive descent
//!
//! Slices and filter expressions are not part of this subset.

use crate::tree::Node;

mod eval;
mod parser;

pub use eval::*;
pub use parser::*;

/// One selector within a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A named child: `.name` or `['name']`.
    Name(String),
    /// A sequence index: `[0]`, `[-1]`.
    Index(isize),
    /// Every child: `.*` or `[*]`.
    Wildcard,
}

/// A path segment holding one or more selectors, applied at one level or
/// recursively over a whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub selectors: Vec<Selector>,
    pub recursive: bool,
}

impl Segment {
    pub fn new(selectors: Vec<Selector>, recursive: bool) -> Self {
        Segment {
            selectors,
            recursive,
        }
    }
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub segments: Vec<Segment>,
}

impl PathExpr {
    pub fn new(segments: Vec<Segment>) -> Self {
        PathExpr { segments }
    }
}

/// One navigation step in a resolved location.
///
/// Key steps carry the document's key value itself, so keys that share a
/// string form (an integer `2` next to a string `"2"`) stay distinct
/// targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The mapping key matched at this hop.
    Key(Node),
    /// A sequence index.
    Index(usize),
}

/// A matched node's position, as steps from the document root. Locations
/// let callers re-navigate to each match one at a time, which keeps
/// evaluation free of held references during mutation.
pub type Location = Vec<Step>;
