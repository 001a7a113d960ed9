//! Bounded-hop visible subgraph around an optional focus node.
//!
//! Hop counting here is undirected: a blocker and a dependent of the focus
//! are both one hop away. [`crate::workspace`] keeps the two directions
//! apart instead.

use std::collections::HashSet;

use beadview_core::HopDepth;
use beadview_core::config::LayoutConfig;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::layout::{PositionedGraphNode, assign_layout};
use crate::model::{GraphEdge, GraphModel, GraphNode};
use crate::traverse::{Frontier, UNDIRECTED};

/// Parameters for [`build_graph_view_model`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
    pub focus_id: Option<String>,
    pub depth: HopDepth,
    pub hide_closed: bool,
    pub layout: LayoutConfig,
}

/// Visible nodes with positions, plus the edges between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphViewModel {
    pub nodes: Vec<PositionedGraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphViewModel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.node.id.as_str()).collect()
    }
}

/// Extract the visible subgraph and lay it out.
///
/// - No focus, or [`HopDepth::Full`]: every node starts visible.
/// - Otherwise: nodes within `depth` undirected hops of the focus. An unknown
///   focus gives an empty view.
/// - `hide_closed` removes closed nodes except the focus.
/// - Edges survive when both endpoints are visible.
///
/// The focus-relative column layout is used whenever the focus is visible;
/// otherwise the layered (or grid) layout.
#[must_use]
#[instrument(skip(model, options), fields(focus = options.focus_id.as_deref(), depth = %options.depth))]
pub fn build_graph_view_model(model: &GraphModel, options: &ViewOptions) -> GraphViewModel {
    let focus = options.focus_id.as_deref();

    let visible: HashSet<&str> = match (focus, options.depth.limit()) {
        (Some(focus_id), Some(limit)) => {
            if !model.contains(focus_id) {
                debug!("focus not in model, returning empty view");
                return GraphViewModel::default();
            }
            within_hops(model, focus_id, limit)
        }
        _ => model.nodes().iter().map(|n| n.id.as_str()).collect(),
    };

    let nodes: Vec<GraphNode> = model
        .nodes()
        .iter()
        .filter(|node| visible.contains(node.id.as_str()))
        .filter(|node| {
            !options.hide_closed || Some(node.id.as_str()) == focus || !node.status.is_closed()
        })
        .cloned()
        .collect();

    let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    // Model edges are already sorted by (source, type, target).
    let edges: Vec<GraphEdge> = model
        .edges()
        .iter()
        .filter(|edge| kept.contains(edge.source.as_str()) && kept.contains(edge.target.as_str()))
        .cloned()
        .collect();

    debug!(nodes = nodes.len(), edges = edges.len(), "view extracted");

    // Model nodes are sorted by id, so `nodes` is too.
    let positioned = assign_layout(nodes, &edges, focus, &options.layout);
    GraphViewModel {
        nodes: positioned,
        edges,
    }
}

fn within_hops<'a>(model: &'a GraphModel, focus: &'a str, limit: u32) -> HashSet<&'a str> {
    let mut frontier = Frontier::new(model, focus, UNDIRECTED);
    for _ in 0..limit {
        if frontier.is_exhausted() {
            break;
        }
        frontier.advance();
    }
    frontier.into_visited()
}
