//! Position assignment for visible subgraphs.
//!
//! Three modes, picked by [`assign_layout`]:
//!
//! | Mode | When | Module |
//! |------|------|--------|
//! | Focus-relative columns | a visible focus node is given | [`focus`] |
//! | Layered, left to right | no focus, at least one edge | [`layered`] |
//! | Square-ish grid | no focus, no edges | [`grid`] |
//!
//! Positions are the top-left corner of a fixed-size node box taken from
//! [`LayoutConfig`]. Every mode is a pure function of the sorted node and
//! edge lists, so identical input always yields identical coordinates.

#![allow(clippy::module_name_repetitions)]

pub mod focus;
pub mod grid;
pub mod layered;

use beadview_core::config::LayoutConfig;
use serde::Serialize;

use crate::model::{GraphEdge, GraphNode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A [`GraphNode`] with its assigned position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedGraphNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub position: Position,
}

/// Which layout mode [`assign_layout`] will use for the given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    FocusColumns,
    Layered,
    Grid,
}

impl LayoutMode {
    #[must_use]
    pub fn select(nodes: &[GraphNode], edges: &[GraphEdge], focus: Option<&str>) -> Self {
        match focus {
            Some(id) if nodes.iter().any(|node| node.id == id) => Self::FocusColumns,
            _ if edges.is_empty() => Self::Grid,
            _ => Self::Layered,
        }
    }
}

/// Position every node. Output order matches `nodes`.
///
/// `nodes` and `edges` are expected to be pre-sorted (by id and by
/// `(source, type, target)` respectively); every edge endpoint should be in
/// `nodes`. Edges with an endpoint outside `nodes` are ignored.
#[must_use]
pub fn assign_layout(
    nodes: Vec<GraphNode>,
    edges: &[GraphEdge],
    focus: Option<&str>,
    config: &LayoutConfig,
) -> Vec<PositionedGraphNode> {
    let mode = LayoutMode::select(&nodes, edges, focus);
    tracing::trace!(?mode, nodes = nodes.len(), edges = edges.len(), "assigning layout");

    let positions = match (mode, focus) {
        (LayoutMode::FocusColumns, Some(focus_id)) => {
            focus::column_positions(&nodes, edges, focus_id, config)
        }
        (LayoutMode::Layered, _) => layered::layered_positions(&nodes, edges, config),
        _ => grid::grid_positions(nodes.len(), config),
    };

    nodes
        .into_iter()
        .zip(positions)
        .map(|(node, position)| PositionedGraphNode { node, position })
        .collect()
}
