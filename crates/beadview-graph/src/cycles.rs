//! Dependency cycle detection over `blocks` edges.
//!
//! # Edge Direction
//!
//! Edges read `blocker → blocked`, so a cycle here is a set of issues that
//! each wait, transitively, on themselves. Other edge types (`parent`,
//! `relates_to`, ...) never participate.
//!
//! # Traversal
//!
//! Depth-first with an explicit frame stack, so arbitrarily deep chains
//! cannot overflow the call stack. Roots are tried in sorted id order and
//! each node's successors in sorted id order. A successor that is still on
//! the stack closes a cycle: the path slice from it to the top.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap, HashSet};

use beadview_core::EdgeType;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::model::{GraphModel, edge_key};

/// Cycles found among `blocks` edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleAnomaly {
    /// One entry per distinct node set, in the order the walk traversed it.
    /// The outer list is sorted.
    pub cycles: Vec<Vec<String>>,
    /// Sorted union of every cycle member.
    pub cycle_node_ids: Vec<String>,
    /// Sorted keys of the `blocks` edges that close each cycle.
    pub cycle_edge_ids: Vec<String>,
}

impl CycleAnomaly {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

struct Frame<'a> {
    node: &'a str,
    next: usize,
}

/// Find cycles among `blocks` edges.
///
/// Distinct cycles are keyed by their sorted member set; the first path that
/// produces a given set is kept. A self-referential `blocks` edge is a
/// one-node cycle. Nodes that are merely reachable from a cycle are never
/// reported.
#[must_use]
#[instrument(skip(model), fields(nodes = model.node_count()))]
pub fn detect_dependency_cycles(model: &GraphModel) -> CycleAnomaly {
    let successors = blocking_successors(model);
    let no_successors: Vec<&str> = Vec::new();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashMap<&str, usize> = HashMap::new();
    let mut path: Vec<&str> = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut node_ids: BTreeSet<String> = BTreeSet::new();
    let mut edge_ids: BTreeSet<String> = BTreeSet::new();

    for root in model.nodes().iter().map(|node| node.id.as_str()) {
        if !visited.insert(root) {
            continue;
        }
        on_stack.insert(root, path.len());
        path.push(root);
        stack.push(Frame { node: root, next: 0 });

        while let Some(frame) = stack.last_mut() {
            let neighbors = successors.get(frame.node).unwrap_or(&no_successors);
            let Some(&neighbor) = neighbors.get(frame.next) else {
                stack.pop();
                if let Some(done) = path.pop() {
                    on_stack.remove(done);
                }
                continue;
            };
            frame.next += 1;

            if let Some(&start) = on_stack.get(neighbor) {
                let members = &path[start..];
                let mut canonical: Vec<&str> = members.to_vec();
                canonical.sort_unstable();
                if !seen_keys.insert(canonical.join("\u{0}")) {
                    continue;
                }

                node_ids.extend(canonical.iter().map(|id| (*id).to_string()));
                for (idx, &source) in members.iter().enumerate() {
                    let target = members[(idx + 1) % members.len()];
                    edge_ids.insert(edge_key(source, EdgeType::Blocks, target));
                }
                cycles.push(members.iter().map(|id| (*id).to_string()).collect());
            } else if visited.insert(neighbor) {
                on_stack.insert(neighbor, path.len());
                path.push(neighbor);
                stack.push(Frame {
                    node: neighbor,
                    next: 0,
                });
            }
        }
    }

    cycles.sort();
    let anomaly = CycleAnomaly {
        cycles,
        cycle_node_ids: node_ids.into_iter().collect(),
        cycle_edge_ids: edge_ids.into_iter().collect(),
    };
    debug!(
        cycles = anomaly.cycles.len(),
        members = anomaly.cycle_node_ids.len(),
        "cycle detection finished"
    );
    anomaly
}

/// `blocks` successors per node, sorted by id.
fn blocking_successors(model: &GraphModel) -> HashMap<&str, Vec<&str>> {
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in model
        .edges()
        .iter()
        .filter(|edge| edge.edge_type == EdgeType::Blocks)
    {
        successors
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }
    for targets in successors.values_mut() {
        targets.sort_unstable();
        targets.dedup();
    }
    successors
}
