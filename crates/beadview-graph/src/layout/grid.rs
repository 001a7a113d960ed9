//! Grid fallback for graphs without edges.

#![allow(clippy::cast_precision_loss)]

use beadview_core::config::LayoutConfig;

use super::Position;

/// Place `count` nodes on a square-ish grid, row-major, in input order.
///
/// The grid is `ceil(sqrt(count))` columns wide.
#[must_use]
pub fn grid_positions(count: usize, config: &LayoutConfig) -> Vec<Position> {
    let columns = ceil_sqrt(count).max(1);
    let cell_w = config.node_width + config.gutter_x;
    let cell_h = config.node_height + config.gutter_y;

    (0..count)
        .map(|idx| {
            let col = idx % columns;
            let row = idx / columns;
            Position::new(col as f64 * cell_w, row as f64 * cell_h)
        })
        .collect()
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = 0usize;
    while root * root < n {
        root += 1;
    }
    root
}
