//! Canonical graph model built from an issue snapshot.
//!
//! # Edge Direction
//!
//! Every stored edge reads `source → target`. For `blocks` edges that means
//! "blocker → blocked": a `blocks` dependency recorded on issue X with target
//! Y (X is blocked by Y) is stored as `Y → X`. All other edge types keep the
//! owning issue as the source and the declared target as the target.
//!
//! # Determinism
//!
//! Nodes are sorted by id, edges by `(source, type, target)`, and the
//! adjacency map is ordered. Adjacency lists are filled from the sorted edge
//! list, so they inherit its order. Nothing downstream relies on hash-map
//! iteration order.

#![allow(clippy::module_name_repetitions)]

pub mod build;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use beadview_core::{EdgeType, Issue, Status};
use petgraph::Direction;
use serde::Serialize;

pub use build::{BuildOptions, build_graph_model};

// ---------------------------------------------------------------------------
// Nodes and edges
// ---------------------------------------------------------------------------

/// One issue projected onto the fields the graph engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub priority: i64,
    pub issue_type: String,
    pub assignee: Option<String>,
    pub updated_at: String,
}

impl From<&Issue> for GraphNode {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id.clone(),
            title: issue.title.clone(),
            status: issue.status,
            priority: issue.priority,
            issue_type: issue.issue_type.clone(),
            assignee: issue.assignee.clone(),
            updated_at: issue.updated_at.clone(),
        }
    }
}

/// A normalized, typed edge between two known nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, edge_type: EdgeType, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type,
        }
    }

    /// Stable edge id: `"source:type:target"`.
    #[must_use]
    pub fn key(&self) -> String {
        edge_key(&self.source, self.edge_type, &self.target)
    }

    /// The endpoint on the far side when walking in `direction`.
    ///
    /// Walking `Outgoing` lands on the target, `Incoming` on the source.
    #[must_use]
    pub fn endpoint(&self, direction: Direction) -> &str {
        match direction {
            Direction::Outgoing => &self.target,
            Direction::Incoming => &self.source,
        }
    }
}

/// Format an edge id without building a [`GraphEdge`].
#[must_use]
pub fn edge_key(source: &str, edge_type: EdgeType, target: &str) -> String {
    format!("{source}:{edge_type}:{target}")
}

// Edges order by (source, type, target).
impl Ord for GraphEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source
            .cmp(&other.source)
            .then_with(|| self.edge_type.cmp(&other.edge_type))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for GraphEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Incoming and outgoing edges of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdjacencyEntry {
    pub incoming: Vec<GraphEdge>,
    pub outgoing: Vec<GraphEdge>,
}

impl AdjacencyEntry {
    #[must_use]
    pub fn edges(&self, direction: Direction) -> &[GraphEdge] {
        match direction {
            Direction::Incoming => &self.incoming,
            Direction::Outgoing => &self.outgoing,
        }
    }
}

/// Counts of dependency records the builder refused to turn into edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDiagnostics {
    /// Dependencies whose target id is not a node in the snapshot.
    pub missing_targets: usize,
    /// Dependencies that normalized to an edge already accepted.
    pub dropped_duplicates: usize,
    /// Dependencies whose kind is not one of the modeled edge types.
    pub unsupported_types: usize,
}

impl GraphDiagnostics {
    /// Total number of dependency records that were discarded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.missing_targets + self.dropped_duplicates + self.unsupported_types
    }
}

// ---------------------------------------------------------------------------
// GraphModel
// ---------------------------------------------------------------------------

/// Immutable, deduplicated, direction-normalized dependency graph.
///
/// Built once per issue snapshot by [`build_graph_model`] and never mutated.
/// Rebuild it when the snapshot changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphModel {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    adjacency: BTreeMap<String, AdjacencyEntry>,
    diagnostics: GraphDiagnostics,
    project_key: Option<String>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
}

static EMPTY_ADJACENCY: AdjacencyEntry = AdjacencyEntry {
    incoming: Vec::new(),
    outgoing: Vec::new(),
};

impl GraphModel {
    /// All nodes, sorted by id.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges, sorted by `(source, type, target)`.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    #[must_use]
    pub const fn adjacency(&self) -> &BTreeMap<String, AdjacencyEntry> {
        &self.adjacency
    }

    #[must_use]
    pub const fn diagnostics(&self) -> GraphDiagnostics {
        self.diagnostics
    }

    #[must_use]
    pub fn project_key(&self) -> Option<&str> {
        self.project_key.as_deref()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).and_then(|&idx| self.nodes.get(idx))
    }

    /// Adjacency entry for `id`; empty for unknown ids.
    #[must_use]
    pub fn adjacency_of(&self, id: &str) -> &AdjacencyEntry {
        self.adjacency.get(id).unwrap_or(&EMPTY_ADJACENCY)
    }

    /// Edges touching `id` in one direction, in sorted edge order.
    #[must_use]
    pub fn edges_directed(&self, id: &str, direction: Direction) -> &[GraphEdge] {
        self.adjacency_of(id).edges(direction)
    }

    /// Ids one hop away from `id` in `direction`, in sorted edge order.
    ///
    /// May yield the same id twice when parallel edges of different types
    /// connect the same pair.
    pub fn neighbors_directed<'a>(
        &'a self,
        id: &str,
        direction: Direction,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        self.edges_directed(id, direction)
            .iter()
            .map(move |edge| edge.endpoint(direction))
    }

    /// BLAKE3 digest of every node field and the sorted edge set.
    ///
    /// Two models with the same hash answer every query identically, so the
    /// hash is usable as a memoization key alongside the query parameters.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        if let Some(key) = &self.project_key {
            hasher.update(key.as_bytes());
        }
        hasher.update(b"\x01");
        for node in &self.nodes {
            for field in [
                node.id.as_str(),
                node.title.as_str(),
                node.status.as_str(),
                node.issue_type.as_str(),
                node.assignee.as_deref().unwrap_or(""),
                node.updated_at.as_str(),
            ] {
                hasher.update(field.as_bytes());
                hasher.update(b"\x00");
            }
            hasher.update(&node.priority.to_le_bytes());
        }
        hasher.update(b"\x01");
        for edge in &self.edges {
            hasher.update(edge.key().as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }
}
