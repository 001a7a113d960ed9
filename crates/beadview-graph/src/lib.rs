#![forbid(unsafe_code)]
//! beadview-graph library.
//!
//! Builds a normalized dependency graph from an issue snapshot and answers
//! structural queries over it: bounded-hop views with layout, leveled
//! blocker/dependent workspaces, transitive blocked-chain analysis, and
//! cycle detection over `blocks` edges.
//!
//! ```text
//! &[Issue] ──build_graph_model──▶ GraphModel ──┬─▶ build_graph_view_model ─▶ GraphViewModel
//!                                              ├─▶ build_path_workspace   ─▶ PathWorkspace
//!                                              ├─▶ analyze_blocked_chain  ─▶ BlockedChainAnalysis
//!                                              └─▶ detect_dependency_cycles ▶ CycleAnomaly
//! ```
//!
//! Every function is pure: same input, byte-identical output. Hash sets are
//! used only for visited tracking; returned lists are sorted explicitly.

pub mod chain;
pub mod cycles;
pub mod layout;
pub mod model;
pub mod traverse;
pub mod view;
pub mod workspace;

pub use chain::{BlockedChainAnalysis, analyze_blocked_chain};
pub use cycles::{CycleAnomaly, detect_dependency_cycles};
pub use layout::{Position, PositionedGraphNode};
pub use model::{
    AdjacencyEntry, BuildOptions, GraphDiagnostics, GraphEdge, GraphModel, GraphNode,
    build_graph_model,
};
pub use view::{GraphViewModel, ViewOptions, build_graph_view_model};
pub use workspace::{PathOptions, PathWorkspace, build_path_workspace};
