//! In-place application of patch operations.

use crate::diff;
use crate::pointer;
use crate::tree::{self, Node};
use crate::value::key_string;
use crate::yamlpath::{Location, Step};

use super::resolve::{pointer_to_expr, resolve};
use super::{OpKind, PatchError, PatchOperation};

/// Options controlling patch application.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Applies `remove` operations instead of accepting them as no-ops.
    pub apply_remove: bool,
}

/// Applies operations to a tree in list order under default options.
pub fn apply(root: &mut Node, ops: &[PatchOperation]) -> Result<(), PatchError> {
    apply_with_options(root, ops, &ApplyOptions::default())
}

/// Applies operations to a tree in list order.
///
/// `remove` operations are accepted but left unapplied unless
/// [`ApplyOptions::apply_remove`] is set, and unrecognized kinds are
/// skipped without validation. On error the tree keeps the effects of the
/// operations already applied.
pub fn apply_with_options(
    root: &mut Node,
    ops: &[PatchOperation],
    options: &ApplyOptions,
) -> Result<(), PatchError> {
    for (index, op) in ops.iter().enumerate() {
        match &op.op {
            OpKind::Add => apply_add(root, index, op)?,
            OpKind::Replace => apply_replace(root, index, op)?,
            OpKind::Remove => {
                if options.apply_remove {
                    apply_remove(root, index, op)?;
                }
            }
            OpKind::Other(_) => {}
        }
    }
    Ok(())
}

/// Parses a document, applies operations, and re-serializes the result.
pub fn apply_document(doc: &str, ops: &[PatchOperation]) -> Result<String, PatchError> {
    apply_document_with_options(doc, ops, &ApplyOptions::default())
}

/// [`apply_document`] under explicit options.
pub fn apply_document_with_options(
    doc: &str,
    ops: &[PatchOperation],
    options: &ApplyOptions,
) -> Result<String, PatchError> {
    let mut root = tree::parse(doc)?;
    apply_with_options(&mut root, ops, options)?;
    Ok(tree::serialize(&root)?)
}

/// Diffs two documents and applies the result to the first, returning the
/// patched text.
pub fn patch_document(a: &str, b: &str) -> Result<String, PatchError> {
    let mut root = tree::parse(a)?;
    let ops = diff::compare_documents(a, b)?;
    apply(&mut root, &ops)?;
    Ok(tree::serialize(&root)?)
}

enum Address<'a> {
    Pointer(&'a str),
    Expr(&'a str),
}

fn address_of(index: usize, op: &PatchOperation) -> Result<Address<'_>, PatchError> {
    match (&op.pointer, &op.path_expr) {
        (Some(_), Some(_)) => Err(PatchError::ConflictingAddress { index }),
        (Some(ptr), None) => {
            if !pointer::is_valid(ptr) {
                return Err(PatchError::InvalidPointer {
                    index,
                    pointer: ptr.clone(),
                });
            }
            Ok(Address::Pointer(ptr.as_str()))
        }
        (None, Some(expr)) => Ok(Address::Expr(expr.as_str())),
        (None, None) => Err(PatchError::MissingAddress {
            index,
            op: op.op.clone(),
        }),
    }
}

fn pointer_of<'a>(index: usize, op: &'a PatchOperation) -> Result<&'a str, PatchError> {
    match address_of(index, op)? {
        Address::Pointer(ptr) => Ok(ptr),
        Address::Expr(expr) => Err(PatchError::invalid_target(
            index,
            expr,
            format!("{} requires a pointer address", op.op),
        )),
    }
}

fn required_value(index: usize, op: &PatchOperation) -> Result<Node, PatchError> {
    match &op.value {
        Some(value) => Ok(Node::from(value.clone())),
        None => Err(PatchError::MissingValue {
            index,
            op: op.op.clone(),
        }),
    }
}

/// Resolves the parent of a pointer's target, requiring exactly one match.
fn resolve_parent(
    root: &Node,
    index: usize,
    op: &PatchOperation,
    ptr: &str,
) -> Result<Location, PatchError> {
    let expr = pointer_to_expr(pointer::parent(ptr));
    let locations = resolve(root, &expr)
        .map_err(|source| PatchError::invalid_expression(index, expr.as_str(), source))?;

    let count = locations.len();
    let mut found = locations.into_iter();
    match (found.next(), found.next()) {
        (Some(location), None) => Ok(location),
        (None, _) => Err(PatchError::unmatched(index, op.op.clone(), ptr)),
        _ => Err(PatchError::AmbiguousTarget {
            index,
            path: ptr.to_string(),
            count,
        }),
    }
}

fn apply_add(root: &mut Node, index: usize, op: &PatchOperation) -> Result<(), PatchError> {
    let value = required_value(index, op)?;
    let ptr = pointer_of(index, op)?;
    if ptr.is_empty() {
        return Err(PatchError::invalid_target(
            index,
            ptr,
            "the document root has no parent",
        ));
    }

    let location = resolve_parent(root, index, op, ptr)?;
    let parent = match tree::lookup_mut(root, &location) {
        Some(node) => node,
        None => return Err(PatchError::unmatched(index, op.op.clone(), ptr)),
    };

    let key = pointer::unescape(pointer::last(ptr));
    insert_child(parent, index, ptr, &key, value)
}

fn insert_child(
    parent: &mut Node,
    index: usize,
    ptr: &str,
    key: &str,
    value: Node,
) -> Result<(), PatchError> {
    match parent {
        Node::Mapping(map) => {
            // adding over a key that already has this string form
            // overwrites it in place
            if let Some((_, slot)) = map.iter_mut().find(|(k, _)| key_string(k) == key) {
                *slot = value;
                return Ok(());
            }
            map.insert(Node::String(key.to_string()), value);
            Ok(())
        }
        Node::Sequence(seq) => {
            if key == "-" {
                seq.push(value);
                return Ok(());
            }
            if !pointer::is_valid_index(key) {
                return Err(PatchError::invalid_target(
                    index,
                    ptr,
                    format!("{:?} is not a sequence index", key),
                ));
            }
            let position: usize = key.parse().map_err(|_| {
                PatchError::invalid_target(index, ptr, format!("{:?} is not a sequence index", key))
            })?;
            if position > seq.len() {
                return Err(PatchError::invalid_target(
                    index,
                    ptr,
                    format!(
                        "index {} is out of range for a sequence of {}",
                        position,
                        seq.len()
                    ),
                ));
            }
            seq.insert(position, value);
            Ok(())
        }
        _ => Err(PatchError::invalid_target(
            index,
            ptr,
            "cannot add a child to a scalar node",
        )),
    }
}

fn apply_replace(root: &mut Node, index: usize, op: &PatchOperation) -> Result<(), PatchError> {
    let value = required_value(index, op)?;
    let (expr, shown_path) = match address_of(index, op)? {
        Address::Pointer(ptr) => (pointer_to_expr(ptr), ptr.to_string()),
        Address::Expr(expr) => (expr.to_string(), expr.to_string()),
    };

    let locations = resolve(root, &expr)
        .map_err(|source| PatchError::invalid_expression(index, expr.as_str(), source))?;
    if locations.is_empty() {
        return Err(PatchError::unmatched(index, OpKind::Replace, shown_path));
    }

    let mut replaced: Vec<&[Step]> = Vec::new();
    for location in &locations {
        // a match under an already replaced location addressed the old
        // subtree, not the value just installed there
        if replaced.iter().any(|done| location.starts_with(done)) {
            continue;
        }
        if let Some(node) = tree::lookup_mut(root, location) {
            tree::replace_subtree(node, value.clone());
            replaced.push(location);
        }
    }
    Ok(())
}

fn apply_remove(root: &mut Node, index: usize, op: &PatchOperation) -> Result<(), PatchError> {
    let ptr = pointer_of(index, op)?;
    if ptr.is_empty() {
        return Err(PatchError::invalid_target(
            index,
            ptr,
            "the document root has no parent",
        ));
    }

    let location = resolve_parent(root, index, op, ptr)?;
    let parent = match tree::lookup_mut(root, &location) {
        Some(node) => node,
        None => return Err(PatchError::unmatched(index, op.op.clone(), ptr)),
    };

    let key = pointer::unescape(pointer::last(ptr));
    remove_child(parent, index, ptr, &key)
}

fn remove_child(parent: &mut Node, index: usize, ptr: &str, key: &str) -> Result<(), PatchError> {
    match parent {
        Node::Mapping(map) => {
            let found = map
                .iter()
                .find(|(k, _)| key_string(k) == key)
                .map(|(k, _)| k.clone());
            match found {
                Some(entry_key) => {
                    map.remove(&entry_key);
                    Ok(())
                }
                None => Err(PatchError::unmatched(index, OpKind::Remove, ptr)),
            }
        }
        Node::Sequence(seq) => {
            if !pointer::is_valid_index(key) {
                return Err(PatchError::invalid_target(
                    index,
                    ptr,
                    format!("{:?} is not a sequence index", key),
                ));
            }
            let position: usize = key.parse().map_err(|_| {
                PatchError::invalid_target(index, ptr, format!("{:?} is not a sequence index", key))
            })?;
            if position >= seq.len() {
                return Err(PatchError::unmatched(index, OpKind::Remove, ptr));
            }
            seq.remove(position);
            Ok(())
        }
        _ => Err(PatchError::invalid_target(
            index,
            ptr,
            "cannot remove a child from a scalar node",
        )),
    }
}
