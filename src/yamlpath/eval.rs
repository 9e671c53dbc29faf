//! Evaluator for parsed path expressions.

use crate::tree::Node;
use crate::value::key_string;

use super::{Location, PathExpr, Segment, Selector, Step};

/// Evaluates an expression against a tree and returns the locations of
/// every matched node, in document order per segment pass.
pub fn eval(expr: &PathExpr, root: &Node) -> Vec<Location> {
    let mut nodes: Vec<&Node> = vec![root];
    let mut locations: Vec<Location> = vec![Vec::new()];

    for segment in &expr.segments {
        let mut next_nodes = Vec::new();
        let mut next_locations = Vec::new();
        for (node, location) in nodes.iter().copied().zip(&locations) {
            if segment.recursive {
                eval_recursive(node, segment, location, &mut next_nodes, &mut next_locations);
            } else {
                eval_segment(node, segment, location, &mut next_nodes, &mut next_locations);
            }
        }
        nodes = next_nodes;
        locations = next_locations;
    }

    locations
}

fn eval_segment<'a>(
    node: &'a Node,
    segment: &Segment,
    location: &[Step],
    nodes: &mut Vec<&'a Node>,
    locations: &mut Vec<Location>,
) {
    for selector in &segment.selectors {
        eval_selector(node, selector, location, nodes, locations);
    }
}

/// Matches the segment at this node, then descends into every child. A
/// node is visited before its children.
fn eval_recursive<'a>(
    node: &'a Node,
    segment: &Segment,
    location: &[Step],
    nodes: &mut Vec<&'a Node>,
    locations: &mut Vec<Location>,
) {
    eval_segment(node, segment, location, nodes, locations);

    match node {
        Node::Mapping(map) => {
            for (key, child) in map {
                let mut child_location = location.to_vec();
                child_location.push(Step::Key(key.clone()));
                eval_recursive(child, segment, &child_location, nodes, locations);
            }
        }
        Node::Sequence(seq) => {
            for (index, child) in seq.iter().enumerate() {
                let mut child_location = location.to_vec();
                child_location.push(Step::Index(index));
                eval_recursive(child, segment, &child_location, nodes, locations);
            }
        }
        _ => {}
    }
}

fn eval_selector<'a>(
    node: &'a Node,
    selector: &Selector,
    location: &[Step],
    nodes: &mut Vec<&'a Node>,
    locations: &mut Vec<Location>,
) {
    match selector {
        Selector::Name(name) => {
            if let Node::Mapping(map) = node {
                for (key, child) in map {
                    if key_string(key) == *name {
                        push_match(child, location, Step::Key(key.clone()), nodes, locations);
                    }
                }
            }
        }
        Selector::Index(index) => match node {
            Node::Sequence(seq) => {
                if let Some(idx) = normalize_index(*index, seq.len()) {
                    if let Some(child) = seq.get(idx) {
                        push_match(child, location, Step::Index(idx), nodes, locations);
                    }
                }
            }
            // a non-negative index can still name a stringified mapping key
            Node::Mapping(map) => {
                if *index >= 0 {
                    let name = index.to_string();
                    for (key, child) in map {
                        if key_string(key) == name {
                            push_match(child, location, Step::Key(key.clone()), nodes, locations);
                        }
                    }
                }
            }
            _ => {}
        },
        Selector::Wildcard => match node {
            Node::Mapping(map) => {
                for (key, child) in map {
                    push_match(child, location, Step::Key(key.clone()), nodes, locations);
                }
            }
            Node::Sequence(seq) => {
                for (index, child) in seq.iter().enumerate() {
                    push_match(child, location, Step::Index(index), nodes, locations);
                }
            }
            _ => {}
        },
    }
}

fn push_match<'a>(
    child: &'a Node,
    location: &[Step],
    step: Step,
    nodes: &mut Vec<&'a Node>,
    locations: &mut Vec<Location>,
) {
    let mut matched = location.to_vec();
    matched.push(step);
    nodes.push(child);
    locations.push(matched);
}

fn normalize_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        return Some(index as usize);
    }
    let from_end = len as isize + index;
    if from_end < 0 {
        return None;
    }
    Some(from_end as usize)
}
