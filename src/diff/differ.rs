//! Structural comparison of two values into an ordered operation list.

use crate::patch::{PatchError, PatchOperation};
use crate::pointer;
use crate::value::{self, Mapping, Value};

/// How sequence pairs of the same kind are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SequenceMode {
    /// Compare index by index; sequences of different lengths are replaced
    /// wholesale.
    #[default]
    Positional,
    /// Match elements by deep equality and emit remove/add pairs for the
    /// unmatched ones. The result describes the change but is not meant to
    /// be applied back.
    ContentBased,
}

/// Options controlling a comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffOptions {
    pub sequence_mode: SequenceMode,
}

/// Compares two values and returns the operations that turn `a` into `b`.
pub fn compare(a: &Value, b: &Value) -> Vec<PatchOperation> {
    compare_at(a, b, "")
}

/// Compares two values with every emitted pointer rooted at `base_path`.
pub fn compare_at(a: &Value, b: &Value, base_path: &str) -> Vec<PatchOperation> {
    compare_with_options(a, b, base_path, &DiffOptions::default())
}

/// Compares two values under explicit options.
pub fn compare_with_options(
    a: &Value,
    b: &Value,
    base_path: &str,
    options: &DiffOptions,
) -> Vec<PatchOperation> {
    let mut ops = Vec::new();
    diff_values(a, b, base_path, options, &mut ops);
    ops
}

/// Parses two YAML texts and compares them under default options.
pub fn compare_documents(a: &str, b: &str) -> Result<Vec<PatchOperation>, PatchError> {
    let a_value = value::from_yaml(a)?;
    let b_value = value::from_yaml(b)?;
    Ok(compare(&a_value, &b_value))
}

fn diff_values(
    a: &Value,
    b: &Value,
    path: &str,
    options: &DiffOptions,
    ops: &mut Vec<PatchOperation>,
) {
    match (a, b) {
        (Value::Mapping(a_map), Value::Mapping(b_map)) => {
            diff_mappings(a_map, b_map, path, options, ops)
        }
        (Value::Sequence(a_seq), Value::Sequence(b_seq)) => {
            diff_sequences(a_seq, b_seq, path, options, ops)
        }
        (Value::Null, Value::Null) => {}
        (Value::Null, _) => ops.push(PatchOperation::add(path, b.clone())),
        (Value::Bool(x), Value::Bool(y)) => {
            if x != y {
                ops.push(PatchOperation::replace(path, b.clone()));
            }
        }
        (Value::Int(x), Value::Int(y)) => {
            if x != y {
                ops.push(PatchOperation::replace(path, b.clone()));
            }
        }
        (Value::Float(x), Value::Float(y)) => {
            if x != y {
                ops.push(PatchOperation::replace(path, b.clone()));
            }
        }
        (Value::String(x), Value::String(y)) => {
            if x != y {
                ops.push(PatchOperation::replace(path, b.clone()));
            }
        }
        // different kinds replace wholesale, with no descent
        _ => ops.push(PatchOperation::replace(path, b.clone())),
    }
}

fn diff_mappings(
    a: &Mapping,
    b: &Mapping,
    path: &str,
    options: &DiffOptions,
    ops: &mut Vec<PatchOperation>,
) {
    for (key, b_value) in b.iter() {
        let child_path = pointer::append(path, key);
        match a.get(key) {
            None => ops.push(PatchOperation::add(child_path, b_value.clone())),
            Some(a_value) => diff_values(a_value, b_value, &child_path, options, ops),
        }
    }
    for (key, _) in a.iter() {
        if !b.has(key) {
            ops.push(PatchOperation::remove(pointer::append(path, key)));
        }
    }
}

fn diff_sequences(
    a: &[Value],
    b: &[Value],
    path: &str,
    options: &DiffOptions,
    ops: &mut Vec<PatchOperation>,
) {
    match options.sequence_mode {
        SequenceMode::Positional => {
            if a.len() != b.len() {
                ops.push(PatchOperation::replace(path, Value::Sequence(b.to_vec())));
                return;
            }
            for (index, (a_value, b_value)) in a.iter().zip(b).enumerate() {
                let child_path = pointer::append(path, &index.to_string());
                diff_values(a_value, b_value, &child_path, options, ops);
            }
        }
        SequenceMode::ContentBased => reconcile_sequences(a, b, path, ops),
    }
}

/// Emits removes for elements of `a` without a match in `b`, then adds for
/// elements of `b` without a match in `a`. Matching is greedy: each element
/// pairs with the first equal, still unclaimed element on the other side.
fn reconcile_sequences(a: &[Value], b: &[Value], path: &str, ops: &mut Vec<PatchOperation>) {
    process_unmatched(a, b, |index, _| {
        ops.push(PatchOperation::remove(pointer::append(
            path,
            &index.to_string(),
        )));
    });
    process_unmatched(b, a, |index, element| {
        ops.push(PatchOperation::add(
            pointer::append(path, &index.to_string()),
            element.clone(),
        ));
    });
}

fn process_unmatched(from: &[Value], into: &[Value], mut emit: impl FnMut(usize, &Value)) {
    let mut used = vec![false; into.len()];
    for (index, element) in from.iter().enumerate() {
        let mut found = false;
        for (candidate, flag) in into.iter().zip(used.iter_mut()) {
            if *flag {
                continue;
            }
            if element == candidate {
                *flag = true;
                found = true;
                break;
            }
        }
        if !found {
            emit(index, element);
        }
    }
}
