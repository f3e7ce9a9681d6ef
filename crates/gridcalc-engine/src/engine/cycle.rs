//! Circular reference detection and recalculation order.
//!
//! When a cell changes, every cell that transitively depends on it must be
//! re-evaluated, dependencies first. A depth-first search over the
//! "dependents" relation yields that order (reverse postorder) and finds any
//! circular reference on the way: reaching a cell that is still on the
//! current DFS path means the edit closed a loop.
//!
//! The search keeps its own frame stack instead of recursing, so long
//! dependency chains cannot overflow the call stack.

use std::collections::HashSet;

use super::error::CycleError;
use super::graph::DependencyGraph;

struct Frame<'a> {
    name: &'a str,
    dependents: Vec<&'a str>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(graph: &'a DependencyGraph, name: &'a str) -> Self {
        Frame {
            name,
            dependents: graph.dependents(name).collect(),
            next: 0,
        }
    }
}

/// Cells to re-evaluate after `start` changes, in evaluation order.
///
/// `start` comes first and every cell appears after all of its dependees
/// within the result. Fails with the offending path if `start` is part of a
/// circular reference (including a cell referencing itself).
pub fn cells_to_recalculate(graph: &DependencyGraph, start: &str) -> Result<Vec<String>, CycleError> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    let mut postorder: Vec<&str> = Vec::new();
    let mut stack = vec![Frame::new(graph, start)];

    visited.insert(start);
    on_path.insert(start);

    while let Some(frame) = stack.last_mut() {
        if let Some(&next) = frame.dependents.get(frame.next) {
            frame.next += 1;
            if on_path.contains(next) {
                let mut path: Vec<String> = stack.iter().map(|f| f.name.to_string()).collect();
                path.push(next.to_string());
                return Err(CycleError { path });
            }
            if visited.insert(next) {
                on_path.insert(next);
                stack.push(Frame::new(graph, next));
            }
        } else {
            let name = frame.name;
            stack.pop();
            on_path.remove(name);
            postorder.push(name);
        }
    }

    Ok(postorder.into_iter().rev().map(str::to_string).collect())
}
