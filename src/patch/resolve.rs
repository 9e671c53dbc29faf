//! Translation of pointer addresses into path expressions.
//!
//! The applier has one resolution engine: pointers are rewritten into
//! equivalent expressions and handed to the same evaluator that serves
//! `pathExpr` addresses.

use crate::pointer;
use crate::tree::Node;
use crate::yamlpath::{self, Location, ParseError, Parser};

/// Converts a pointer into the equivalent path expression. Canonical
/// decimal segments become index selectors so sequence positions resolve
/// by position; everything else becomes a quoted name selector.
pub fn pointer_to_expr(pointer: &str) -> String {
    let mut expr = String::from("$");
    for segment in pointer::segments(pointer) {
        if pointer::is_valid_index(&segment) {
            expr.push('[');
            expr.push_str(&segment);
            expr.push(']');
        } else {
            expr.push_str("['");
            expr.push_str(&escape_name(&segment));
            expr.push_str("']");
        }
    }
    expr
}

fn escape_name(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Resolves an expression against a tree, returning every matched
/// location. Zero matches is not an error here; callers decide whether
/// that is fatal.
pub fn resolve(root: &Node, expr: &str) -> Result<Vec<Location>, ParseError> {
    let parsed = Parser::parse(expr)?;
    Ok(yamlpath::eval(&parsed, root))
}
