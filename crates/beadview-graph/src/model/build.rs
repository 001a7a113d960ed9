//! Graph construction from an issue snapshot.
//!
//! # Overview
//!
//! [`build_graph_model`] projects every issue to a [`GraphNode`] and every
//! usable dependency record to a [`GraphEdge`], then derives adjacency. It
//! never fails: records that cannot become edges are counted in
//! [`GraphDiagnostics`] and skipped.
//!
//! ## Record filtering
//!
//! Checks run in this order, and a record is counted under the first check
//! it fails:
//!
//! 1. `unsupported_types`: the kind is not one of the five [`EdgeType`]s.
//! 2. `missing_targets`: the target id is not a node in the snapshot.
//! 3. `dropped_duplicates`: the normalized `source::type::target` key was
//!    already accepted.
//!
//! ## Self references
//!
//! A dependency naming its own issue is kept as a self-loop edge. Cycle
//! detection reports it as a one-node cycle.

use std::collections::{BTreeMap, HashMap, HashSet};

use beadview_core::{EdgeType, Issue};
use tracing::{debug, instrument, trace, warn};

use super::{AdjacencyEntry, GraphDiagnostics, GraphEdge, GraphModel, GraphNode};

/// Options for [`build_graph_model`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Opaque key echoed on the model (e.g. the tracker prefix).
    pub project_key: Option<String>,
}

/// Build a [`GraphModel`] from issues in any order.
///
/// # Complexity
///
/// O((N + D) log (N + D)) where N is the number of issues and D the number
/// of dependency records; the log factor comes from the two sorts.
#[must_use]
#[instrument(skip(issues, options), fields(issues = issues.len()))]
pub fn build_graph_model(issues: &[Issue], options: &BuildOptions) -> GraphModel {
    // Step 1: project and sort nodes.
    let mut nodes: Vec<GraphNode> = issues.iter().map(GraphNode::from).collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    // Step 2: id set for existence checks.
    let known: HashSet<&str> = issues.iter().map(|issue| issue.id.as_str()).collect();

    // Steps 3-4: normalize, filter, and deduplicate dependency records.
    let mut diagnostics = GraphDiagnostics::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut edges: Vec<GraphEdge> = Vec::new();

    for issue in issues {
        for dependency in &issue.dependencies {
            let Some(edge_type) = dependency.kind.edge_type() else {
                trace!(issue = %issue.id, kind = %dependency.kind, "unsupported dependency kind");
                diagnostics.unsupported_types += 1;
                continue;
            };

            if !known.contains(dependency.target.as_str()) {
                trace!(issue = %issue.id, target = %dependency.target, "dependency target not in snapshot");
                diagnostics.missing_targets += 1;
                continue;
            }

            let (source, target) = normalize_direction(&issue.id, edge_type, &dependency.target);

            if !seen.insert(dedup_key(source, edge_type, target)) {
                diagnostics.dropped_duplicates += 1;
                continue;
            }

            edges.push(GraphEdge::new(source, edge_type, target));
        }
    }

    // Step 5: deterministic edge order.
    edges.sort();

    // Step 6: adjacency from the sorted edge list.
    let adjacency = derive_adjacency(&nodes, &edges);

    let mut node_index: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
    for (idx, node) in nodes.iter().enumerate() {
        node_index.entry(node.id.clone()).or_insert(idx);
    }

    if diagnostics.total() > 0 {
        warn!(
            missing_targets = diagnostics.missing_targets,
            dropped_duplicates = diagnostics.dropped_duplicates,
            unsupported_types = diagnostics.unsupported_types,
            "discarded dependency records while building graph"
        );
    }
    debug!(nodes = nodes.len(), edges = edges.len(), "built graph model");

    GraphModel {
        nodes,
        edges,
        adjacency,
        diagnostics,
        project_key: options.project_key.clone(),
        node_index,
    }
}

/// Map a dependency owned by `owner` onto a stored `(source, target)` pair.
///
/// `owner blocks-on target` means the target is the blocker, so the stored
/// edge runs `target → owner`.
fn normalize_direction<'a>(
    owner: &'a str,
    edge_type: EdgeType,
    target: &'a str,
) -> (&'a str, &'a str) {
    match edge_type {
        EdgeType::Blocks => (target, owner),
        EdgeType::Parent | EdgeType::RelatesTo | EdgeType::Duplicates | EdgeType::Supersedes => {
            (owner, target)
        }
    }
}

fn dedup_key(source: &str, edge_type: EdgeType, target: &str) -> String {
    format!("{source}::{edge_type}::{target}")
}

fn derive_adjacency(nodes: &[GraphNode], edges: &[GraphEdge]) -> BTreeMap<String, AdjacencyEntry> {
    let mut adjacency: BTreeMap<String, AdjacencyEntry> = nodes
        .iter()
        .map(|node| (node.id.clone(), AdjacencyEntry::default()))
        .collect();

    for edge in edges {
        if let Some(entry) = adjacency.get_mut(&edge.source) {
            entry.outgoing.push(edge.clone());
        }
        if let Some(entry) = adjacency.get_mut(&edge.target) {
            entry.incoming.push(edge.clone());
        }
    }

    adjacency
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
