//! Leveled blocker/dependent workspace around a focus node.

use beadview_core::HopDepth;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::model::{GraphModel, GraphNode};
use crate::traverse::{DOWNSTREAM, Frontier, UPSTREAM};

/// Parameters for [`build_path_workspace`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOptions {
    pub focus_id: Option<String>,
    pub depth: HopDepth,
    pub hide_closed: bool,
}

/// Upstream and downstream levels around a focus, nearest level first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathWorkspace {
    pub focus: Option<GraphNode>,
    pub blockers: Vec<Vec<GraphNode>>,
    pub dependents: Vec<Vec<GraphNode>>,
}

impl PathWorkspace {
    /// The shape returned for an absent or unknown focus.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            focus: None,
            blockers: Vec::new(),
            dependents: Vec::new(),
        }
    }
}

/// Walk incoming edges (blockers) and outgoing edges (dependents) from the
/// focus in lockstep, one hop per step, up to `depth`.
///
/// Each hop's newly discovered nodes form one level, sorted by id. With
/// `hide_closed`, closed nodes are left out of their level but the walk
/// still continues through them. Empty levels are not emitted.
#[must_use]
#[instrument(skip(model, options), fields(focus = options.focus_id.as_deref(), depth = %options.depth))]
pub fn build_path_workspace(model: &GraphModel, options: &PathOptions) -> PathWorkspace {
    let Some(focus) = options
        .focus_id
        .as_deref()
        .and_then(|id| model.node(id))
    else {
        debug!("focus absent or unknown, returning empty workspace");
        return PathWorkspace::empty();
    };

    let mut upstream = Frontier::new(model, &focus.id, UPSTREAM);
    let mut downstream = Frontier::new(model, &focus.id, DOWNSTREAM);
    let mut workspace = PathWorkspace {
        focus: Some(focus.clone()),
        ..PathWorkspace::empty()
    };

    let mut hop = 0u32;
    while !(upstream.is_exhausted() && downstream.is_exhausted()) {
        if options.depth.limit().is_some_and(|limit| hop >= limit) {
            break;
        }
        hop += 1;

        let level = collect_level(model, upstream.advance(), options.hide_closed);
        if !level.is_empty() {
            workspace.blockers.push(level);
        }
        let level = collect_level(model, downstream.advance(), options.hide_closed);
        if !level.is_empty() {
            workspace.dependents.push(level);
        }
    }

    debug!(
        hops = hop,
        blocker_levels = workspace.blockers.len(),
        dependent_levels = workspace.dependents.len(),
        "path workspace built"
    );
    workspace
}

fn collect_level(model: &GraphModel, discovered: Vec<&str>, hide_closed: bool) -> Vec<GraphNode> {
    let mut level: Vec<GraphNode> = discovered
        .into_iter()
        .filter_map(|id| model.node(id))
        .filter(|node| !hide_closed || !node.status.is_closed())
        .cloned()
        .collect();
    level.sort_by(|a, b| a.id.cmp(&b.id));
    level
}
