//! Focus-relative column layout.
//!
//! The focus sits in column 0. Upstream nodes (reachable by walking incoming
//! edges) go to negative columns, downstream nodes (reachable by walking
//! outgoing edges) to positive columns, one column per hop:
//!
//! ```text
//!   -2        -1        0         +1
//! [blk-2] → [blk-1] → [focus] → [dep-1]
//! ```
//!
//! A node reachable both ways takes the side with the shorter hop count;
//! on a tie it goes upstream. Nodes reachable in neither direction (visible
//! only through a mixed-direction path, e.g. a sibling sharing a blocker)
//! are stacked in one trailing column right of the rightmost column.

#![allow(clippy::cast_precision_loss)]

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use beadview_core::config::LayoutConfig;

use super::Position;
use crate::model::{GraphEdge, GraphNode};

/// Compute positions for `nodes` (sorted by id) around `focus`.
#[must_use]
pub fn column_positions(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    focus: &str,
    config: &LayoutConfig,
) -> Vec<Position> {
    let columns = assign_columns(nodes, edges, focus);

    // Bucket node indexes by column; `nodes` is sorted, so buckets are too.
    let mut buckets: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, column) in columns.iter().enumerate() {
        buckets.entry(*column).or_default().push(idx);
    }
    for bucket in buckets.values_mut() {
        bucket.sort_by(|&a, &b| nodes[a].id.cmp(&nodes[b].id));
    }

    let offset = -buckets.keys().next().copied().unwrap_or(0);
    let cell_w = config.node_width + config.gutter_x;
    let cell_h = config.node_height + config.gutter_y;

    let mut positions = vec![Position::new(0.0, 0.0); nodes.len()];
    for (column, bucket) in &buckets {
        let x = (column + offset) as f64 * cell_w;
        for (row, &idx) in bucket.iter().enumerate() {
            positions[idx] = Position::new(x, row as f64 * cell_h);
        }
    }
    positions
}

/// Integer column per node, parallel to `nodes`.
#[must_use]
pub fn assign_columns(nodes: &[GraphNode], edges: &[GraphEdge], focus: &str) -> Vec<i64> {
    let visible: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut upstream: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut downstream: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        let (source, target) = (edge.source.as_str(), edge.target.as_str());
        if !visible.contains(source) || !visible.contains(target) {
            continue;
        }
        downstream.entry(source).or_default().push(target);
        upstream.entry(target).or_default().push(source);
    }

    let in_depth = hop_distances(focus, &upstream);
    let out_depth = hop_distances(focus, &downstream);

    let columns: Vec<Option<i64>> = nodes
        .iter()
        .map(|node| {
            if node.id == focus {
                return Some(0);
            }
            match (in_depth.get(node.id.as_str()), out_depth.get(node.id.as_str())) {
                (Some(&up), None) => Some(-i64::from(up)),
                (None, Some(&down)) => Some(i64::from(down)),
                (Some(&up), Some(&down)) => {
                    if down < up {
                        Some(i64::from(down))
                    } else {
                        Some(-i64::from(up))
                    }
                }
                (None, None) => None,
            }
        })
        .collect();

    let trailing = columns.iter().flatten().copied().max().unwrap_or(0) + 1;
    columns
        .into_iter()
        .map(|column| column.unwrap_or(trailing))
        .collect()
}

/// Shortest hop count from `start` to every reachable id along `adjacency`.
fn hop_distances<'a>(
    start: &'a str,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
) -> HashMap<&'a str, u32> {
    let mut distances: HashMap<&str, u32> = HashMap::from([(start, 0)]);
    let mut queue: VecDeque<&str> = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances.get(current).copied().unwrap_or(0) + 1;
        for &neighbor in adjacency.get(current).map_or(&[][..], Vec::as_slice) {
            if !distances.contains_key(neighbor) {
                distances.insert(neighbor, next_distance);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}
