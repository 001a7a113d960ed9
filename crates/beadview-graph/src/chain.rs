//! Transitive blocker analysis for one focus node.

use std::collections::{HashSet, VecDeque};

use beadview_core::{EdgeType, Status};
use petgraph::Direction;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::model::{GraphEdge, GraphModel};

/// Everything standing between a focus node and being workable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedChainAnalysis {
    /// Every transitive blocker, sorted.
    pub blocker_node_ids: Vec<String>,
    /// Blockers with status exactly `open`. `blocked`, `deferred` and the
    /// other unclosed states are left out so this count and
    /// `in_progress_blocker_count` never overlap.
    pub open_blocker_count: usize,
    /// Blockers with status `in_progress`.
    pub in_progress_blocker_count: usize,
    /// Nearest unclosed blocker whose own blockers are all closed.
    ///
    /// Any status other than `closed` qualifies here, so a `deferred` root
    /// cause is still named even though `open_blocker_count` skips it.
    pub first_actionable_blocker_id: Option<String>,
    /// Keys of every traversed `blocks` edge, sorted.
    pub chain_edge_ids: Vec<String>,
}

/// Incoming `blocks` edges of `id`.
fn blocking_edges<'a>(
    model: &'a GraphModel,
    id: &str,
) -> impl Iterator<Item = &'a GraphEdge> + use<'a> {
    model
        .edges_directed(id, Direction::Incoming)
        .iter()
        .filter(|edge| edge.edge_type == EdgeType::Blocks)
}

/// Breadth-first walk over incoming `blocks` edges from `focus_id`.
///
/// The focus is never counted as its own blocker, even inside a cycle.
/// An absent or unknown focus yields [`BlockedChainAnalysis::default`].
#[must_use]
#[instrument(skip(model))]
pub fn analyze_blocked_chain(model: &GraphModel, focus_id: Option<&str>) -> BlockedChainAnalysis {
    let Some(focus) = focus_id.filter(|id| model.contains(id)) else {
        return BlockedChainAnalysis::default();
    };

    let mut seen: HashSet<&str> = HashSet::from([focus]);
    let mut discovered: Vec<&str> = Vec::new();
    let mut edge_keys: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([focus]);

    while let Some(current) = queue.pop_front() {
        for edge in blocking_edges(model, current) {
            edge_keys.insert(edge.key());
            let blocker = edge.source.as_str();
            if seen.insert(blocker) {
                discovered.push(blocker);
                queue.push_back(blocker);
            }
        }
    }

    let status_of = |id: &str| model.node(id).map(|node| node.status);
    let count_with = |status: Status| {
        discovered
            .iter()
            .filter(|&&id| status_of(id) == Some(status))
            .count()
    };

    let first_actionable = discovered.iter().copied().find(|&id| {
        status_of(id).is_some_and(|status| !status.is_closed())
            && blocking_edges(model, id)
                .all(|edge| status_of(edge.source.as_str()).is_some_and(Status::is_closed))
    });

    let mut blocker_node_ids: Vec<String> = discovered.iter().map(|id| (*id).to_string()).collect();
    blocker_node_ids.sort();
    let mut chain_edge_ids: Vec<String> = edge_keys.into_iter().collect();
    chain_edge_ids.sort();

    let analysis = BlockedChainAnalysis {
        open_blocker_count: count_with(Status::Open),
        in_progress_blocker_count: count_with(Status::InProgress),
        first_actionable_blocker_id: first_actionable.map(str::to_string),
        blocker_node_ids,
        chain_edge_ids,
    };
    debug!(
        blockers = analysis.blocker_node_ids.len(),
        edges = analysis.chain_edge_ids.len(),
        actionable = analysis.first_actionable_blocker_id.as_deref(),
        "blocked chain analyzed"
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildOptions, build_graph_model};
    use beadview_core::Issue;

    fn build(issues: &[Issue]) -> GraphModel {
        build_graph_model(issues, &BuildOptions::default())
    }

    #[test]
    fn three_node_chain() {
        let model = build(&[
            Issue::new("bb-1", Status::Open),
            Issue::new("bb-2", Status::InProgress).blocked_by("bb-1"),
            Issue::new("bb-3", Status::Blocked).blocked_by("bb-2"),
        ]);
        let analysis = analyze_blocked_chain(&model, Some("bb-3"));

        assert_eq!(analysis.blocker_node_ids, vec!["bb-1", "bb-2"]);
        assert_eq!(analysis.open_blocker_count, 1);
        assert_eq!(analysis.in_progress_blocker_count, 1);
        assert_eq!(analysis.first_actionable_blocker_id.as_deref(), Some("bb-1"));
        assert_eq!(
            analysis.chain_edge_ids,
            vec!["bb-1:blocks:bb-2", "bb-2:blocks:bb-3"]
        );
    }

    #[test]
    fn blocker_behind_closed_blocker_is_actionable() {
        let model = build(&[
            Issue::new("done", Status::Closed),
            Issue::new("next", Status::Open).blocked_by("done"),
            Issue::new("focus", Status::Open).blocked_by("next"),
        ]);
        let analysis = analyze_blocked_chain(&model, Some("focus"));
        assert_eq!(analysis.blocker_node_ids, vec!["done", "next"]);
        assert_eq!(analysis.first_actionable_blocker_id.as_deref(), Some("next"));
    }

    #[test]
    fn deferred_root_is_actionable_but_not_counted_open() {
        let model = build(&[
            Issue::new("root", Status::Deferred),
            Issue::new("mid", Status::Blocked).blocked_by("root"),
            Issue::new("focus", Status::Open).blocked_by("mid"),
        ]);
        let analysis = analyze_blocked_chain(&model, Some("focus"));
        assert_eq!(analysis.blocker_node_ids, vec!["mid", "root"]);
        assert_eq!(analysis.open_blocker_count, 0);
        assert_eq!(analysis.in_progress_blocker_count, 0);
        assert_eq!(analysis.first_actionable_blocker_id.as_deref(), Some("root"));
    }

    #[test]
    fn closed_blockers_are_never_actionable() {
        let model = build(&[
            Issue::new("a", Status::Closed),
            Issue::new("focus", Status::Open).blocked_by("a"),
        ]);
        let analysis = analyze_blocked_chain(&model, Some("focus"));
        assert_eq!(analysis.blocker_node_ids, vec!["a"]);
        assert_eq!(analysis.open_blocker_count, 0);
        assert_eq!(analysis.first_actionable_blocker_id, None);
    }

    #[test]
    fn non_blocking_edges_are_ignored() {
        let model = build(&[
            Issue::new("epic", Status::Open),
            Issue::new("focus", Status::Open)
                .with_dependency(EdgeType::Parent, "epic")
                .with_dependency(EdgeType::RelatesTo, "epic"),
        ]);
        assert_eq!(
            analyze_blocked_chain(&model, Some("focus")),
            BlockedChainAnalysis::default()
        );
    }

    #[test]
    fn cycle_through_focus_excludes_focus() {
        let model = build(&[
            Issue::new("a", Status::Open).blocked_by("b"),
            Issue::new("b", Status::Open).blocked_by("a"),
        ]);
        let analysis = analyze_blocked_chain(&model, Some("a"));
        assert_eq!(analysis.blocker_node_ids, vec!["b"]);
        // b's only blocker is a, which is open.
        assert_eq!(analysis.first_actionable_blocker_id, None);
        assert_eq!(analysis.chain_edge_ids, vec!["a:blocks:b", "b:blocks:a"]);
    }

    #[test]
    fn unknown_or_absent_focus_is_empty() {
        let model = build(&[Issue::new("a", Status::Open)]);
        assert_eq!(
            analyze_blocked_chain(&model, Some("nope")),
            BlockedChainAnalysis::default()
        );
        assert_eq!(analyze_blocked_chain(&model, None), BlockedChainAnalysis::default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(BlockedChainAnalysis::default()).expect("serialize");
        assert!(json.get("blockerNodeIds").is_some());
        assert!(json.get("firstActionableBlockerId").is_some());
        assert!(json.get("inProgressBlockerCount").is_some());
    }
}
