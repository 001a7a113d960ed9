//! `beadview path`: blocker and dependent levels around one issue.

use std::io::Write;

use beadview_graph::{GraphNode, PathOptions, PathWorkspace, build_path_workspace};
use clap::Args;

use super::{Context, resolve_depth};
use crate::output::{pretty_rule, pretty_section, render_mode};

/// Arguments for `beadview path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Focus issue id.
    pub id: String,

    /// Levels to walk in each direction: 1, 2, ... or `full`.
    #[arg(long)]
    pub depth: Option<String>,

    /// Leave closed issues out of the levels.
    #[arg(long)]
    pub hide_closed: bool,
}

/// Execute `beadview path`.
pub fn run_path(args: &PathArgs, ctx: &Context) -> anyhow::Result<()> {
    let view_config = &ctx.config.project.view;
    let depth = resolve_depth(args.depth.as_deref(), view_config.default_depth, ctx.output)?;
    ctx.check_focus(&args.id);

    let workspace = build_path_workspace(
        &ctx.model,
        &PathOptions {
            focus_id: Some(args.id.clone()),
            depth,
            hide_closed: args.hide_closed || view_config.hide_closed,
        },
    );

    render_mode(ctx.output, &workspace, render_path_text, render_path_pretty)
}

fn join_ids(level: &[GraphNode]) -> String {
    level
        .iter()
        .map(|node| node.id.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_path_text(workspace: &PathWorkspace, w: &mut dyn Write) -> std::io::Result<()> {
    let Some(focus) = &workspace.focus else {
        return Ok(());
    };
    writeln!(w, "focus {}", focus.id)?;
    for (idx, level) in workspace.blockers.iter().enumerate() {
        writeln!(w, "blockers {} {}", idx + 1, join_ids(level))?;
    }
    for (idx, level) in workspace.dependents.iter().enumerate() {
        writeln!(w, "dependents {} {}", idx + 1, join_ids(level))?;
    }
    Ok(())
}

fn render_levels(
    w: &mut dyn Write,
    heading: &str,
    levels: &[Vec<GraphNode>],
) -> std::io::Result<()> {
    writeln!(w)?;
    pretty_section(w, heading)?;
    if levels.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for (idx, level) in levels.iter().enumerate() {
        writeln!(w, "  Level {}", idx + 1)?;
        for node in level {
            writeln!(w, "    {:<14} {:<12} {}", node.id, node.status, node.title)?;
        }
    }
    Ok(())
}

fn render_path_pretty(workspace: &PathWorkspace, w: &mut dyn Write) -> std::io::Result<()> {
    let Some(focus) = &workspace.focus else {
        writeln!(w, "No focus issue; nothing to show.")?;
        return Ok(());
    };
    writeln!(w, "Path workspace for {}: {}", focus.id, focus.title)?;
    pretty_rule(w)?;
    render_levels(w, "Blockers (upstream)", &workspace.blockers)?;
    render_levels(w, "Dependents (downstream)", &workspace.dependents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beadview_core::{HopDepth, Issue, Status};
    use beadview_graph::{BuildOptions, build_graph_model};
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: PathArgs,
    }

    #[test]
    fn args_require_id() {
        assert!(Wrapper::try_parse_from(["test"]).is_err());
        let parsed = Wrapper::parse_from(["test", "bb-1", "--depth", "2"]);
        assert_eq!(parsed.args.id, "bb-1");
        assert_eq!(parsed.args.depth.as_deref(), Some("2"));
    }

    fn workspace() -> PathWorkspace {
        let model = build_graph_model(
            &[
                Issue::new("bb-1", Status::Open),
                Issue::new("bb-2", Status::Open).blocked_by("bb-1"),
                Issue::new("bb-3", Status::Open).blocked_by("bb-2"),
                Issue::new("bb-4", Status::Open).blocked_by("bb-3"),
            ],
            &BuildOptions::default(),
        );
        build_path_workspace(
            &model,
            &PathOptions {
                focus_id: Some("bb-2".to_string()),
                depth: HopDepth::TWO,
                hide_closed: false,
            },
        )
    }

    #[test]
    fn text_has_one_line_per_level() {
        let mut out = Vec::new();
        render_path_text(&workspace(), &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert_eq!(
            rendered,
            "focus bb-2\nblockers 1 bb-1\ndependents 1 bb-3\ndependents 2 bb-4\n"
        );
    }

    #[test]
    fn empty_workspace_renders_nothing_in_text() {
        let mut out = Vec::new();
        render_path_text(&PathWorkspace::empty(), &mut out).expect("render");
        assert!(out.is_empty());
    }

    #[test]
    fn pretty_has_both_sections() {
        let mut out = Vec::new();
        render_path_pretty(&workspace(), &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Blockers (upstream)"));
        assert!(rendered.contains("Dependents (downstream)"));
        assert!(rendered.contains("Level 2"));
    }
}
