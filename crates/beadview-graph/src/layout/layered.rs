//! Left-to-right layered layout for the unfocused full graph.
//!
//! Ranks come from the longest path over the SCC condensation, so nodes in a
//! dependency cycle share a rank instead of stretching the layout. Within a
//! rank, nodes start in id order and are reordered by alternating barycenter
//! sweeps. Ties keep id order, so the result is a pure function of the input.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;

use beadview_core::config::LayoutConfig;
use petgraph::{
    Direction,
    algo::{condensation, toposort},
    graph::{DiGraph, NodeIndex},
};

use super::Position;
use crate::model::{GraphEdge, GraphNode};

const SWEEPS: usize = 4;

/// Compute positions for `nodes` (sorted by id) using layered placement.
#[must_use]
pub fn layered_positions(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    config: &LayoutConfig,
) -> Vec<Position> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.as_str(), idx))
        .collect();

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(nodes.len(), edges.len());
    let handles: Vec<NodeIndex> = (0..nodes.len()).map(|idx| graph.add_node(idx)).collect();

    for edge in edges {
        let (Some(&source), Some(&target)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            continue;
        };
        graph.add_edge(handles[source], handles[target], ());
        if source != target {
            successors[source].push(target);
            predecessors[target].push(source);
        }
    }

    let ranks = longest_path_ranks(graph, nodes.len());
    let mut layers = initial_layers(nodes, &ranks);
    order_layers(nodes, &ranks, &mut layers, &predecessors, &successors);

    let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let column_step = config.node_width + config.rank_sep;
    let row_step = config.node_height + config.node_sep;

    let mut positions = vec![Position::new(0.0, 0.0); nodes.len()];
    for (rank, layer) in layers.iter().enumerate() {
        let x = rank as f64 * column_step;
        let centering = (widest - layer.len()) as f64 * row_step / 2.0;
        for (row, &idx) in layer.iter().enumerate() {
            positions[idx] = Position::new(x, (row as f64).mul_add(row_step, centering));
        }
    }
    positions
}

/// Rank per node: 0 for sources, else one more than the highest-ranked
/// predecessor component.
fn longest_path_ranks(graph: DiGraph<usize, ()>, count: usize) -> Vec<usize> {
    let condensed: DiGraph<Vec<usize>, ()> = condensation(graph, true);
    let order = toposort(&condensed, None)
        .unwrap_or_else(|_| condensed.node_indices().collect::<Vec<_>>());

    let mut component_rank: HashMap<NodeIndex, usize> = HashMap::with_capacity(order.len());
    for &component in &order {
        let rank = condensed
            .neighbors_directed(component, Direction::Incoming)
            .filter_map(|pred| component_rank.get(&pred))
            .map(|rank| rank + 1)
            .max()
            .unwrap_or(0);
        component_rank.insert(component, rank);
    }

    let mut ranks = vec![0; count];
    for component in condensed.node_indices() {
        let rank = component_rank.get(&component).copied().unwrap_or(0);
        for &member in &condensed[component] {
            ranks[member] = rank;
        }
    }
    ranks
}

fn initial_layers(nodes: &[GraphNode], ranks: &[usize]) -> Vec<Vec<usize>> {
    let depth = ranks.iter().copied().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); depth];
    for (idx, &rank) in ranks.iter().enumerate() {
        layers[rank].push(idx);
    }
    for layer in &mut layers {
        layer.sort_by(|&a, &b| nodes[a].id.cmp(&nodes[b].id));
    }
    layers
}

/// Alternate downward (by predecessors) and upward (by successors) sweeps.
///
/// Only neighbors on the adjacent reference rank contribute to a barycenter.
fn order_layers(
    nodes: &[GraphNode],
    node_rank: &[usize],
    layers: &mut [Vec<usize>],
    predecessors: &[Vec<usize>],
    successors: &[Vec<usize>],
) {
    if layers.len() < 2 {
        return;
    }

    let mut slot = vec![0usize; nodes.len()];
    let record = |layer: &[usize], slot: &mut [usize]| {
        for (pos, &idx) in layer.iter().enumerate() {
            slot[idx] = pos;
        }
    };
    for layer in layers.iter() {
        record(layer, &mut slot);
    }

    for sweep in 0..SWEEPS {
        let downward = sweep % 2 == 0;
        let sweep_order: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len() - 1).rev().collect()
        };
        let neighbors = if downward { predecessors } else { successors };

        for rank in sweep_order {
            let reference = if downward { rank - 1 } else { rank + 1 };

            let mut keyed: Vec<(f64, usize)> = layers[rank]
                .iter()
                .map(|&idx| {
                    let adjacent: Vec<usize> = neighbors[idx]
                        .iter()
                        .copied()
                        .filter(|&n| node_rank[n] == reference)
                        .collect();
                    let barycenter = if adjacent.is_empty() {
                        slot[idx] as f64
                    } else {
                        adjacent.iter().map(|&n| slot[n] as f64).sum::<f64>()
                            / adjacent.len() as f64
                    };
                    (barycenter, idx)
                })
                .collect();

            keyed.sort_by(|(bary_a, a), (bary_b, b)| {
                bary_a
                    .total_cmp(bary_b)
                    .then_with(|| nodes[*a].id.cmp(&nodes[*b].id))
            });
            layers[rank] = keyed.into_iter().map(|(_, idx)| idx).collect();
            record(&layers[rank], &mut slot);
        }
    }
}
