//! `beadview view`: bounded-hop subgraph with layout positions.

use std::io::Write;

use beadview_graph::{GraphViewModel, ViewOptions, build_graph_view_model};
use clap::Args;

use super::{Context, resolve_depth};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `beadview view`.
#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    /// Focus issue id. Without one, the whole graph is shown.
    pub id: Option<String>,

    /// Hop depth around the focus: 1, 2, ... or `full`.
    #[arg(long)]
    pub depth: Option<String>,

    /// Hide closed issues (the focus is always kept).
    #[arg(long)]
    pub hide_closed: bool,
}

/// Execute `beadview view`.
pub fn run_view(args: &ViewArgs, ctx: &Context) -> anyhow::Result<()> {
    let view_config = &ctx.config.project.view;
    let depth = resolve_depth(args.depth.as_deref(), view_config.default_depth, ctx.output)?;
    if let Some(id) = &args.id {
        ctx.check_focus(id);
    }

    let options = ViewOptions {
        focus_id: args.id.clone(),
        depth,
        hide_closed: args.hide_closed || view_config.hide_closed,
        layout: ctx.config.project.layout,
    };
    let view = build_graph_view_model(&ctx.model, &options);

    render_mode(ctx.output, &view, render_view_text, |view, w| {
        render_view_pretty(view, &options, w)
    })
}

fn render_view_text(view: &GraphViewModel, w: &mut dyn Write) -> std::io::Result<()> {
    for placed in &view.nodes {
        writeln!(
            w,
            "node {} {} {} {}",
            placed.node.id, placed.node.status, placed.position.x, placed.position.y
        )?;
    }
    for edge in &view.edges {
        writeln!(w, "edge {} {} {}", edge.source, edge.edge_type, edge.target)?;
    }
    Ok(())
}

fn render_view_pretty(
    view: &GraphViewModel,
    options: &ViewOptions,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(w, "Graph view")?;
    pretty_kv(w, "Focus", options.focus_id.as_deref().unwrap_or("(none)"))?;
    pretty_kv(w, "Depth", options.depth.to_string())?;
    pretty_kv(w, "Nodes", view.nodes.len().to_string())?;
    pretty_kv(w, "Edges", view.edges.len().to_string())?;

    if view.is_empty() {
        writeln!(w, "\nNothing to show.")?;
        return Ok(());
    }

    writeln!(w)?;
    for placed in &view.nodes {
        let marker = if Some(placed.node.id.as_str()) == options.focus_id.as_deref() {
            "*"
        } else {
            " "
        };
        writeln!(
            w,
            "{marker} {:<14} {:<12} ({:>6}, {:>6})  {}",
            placed.node.id,
            placed.node.status,
            placed.position.x,
            placed.position.y,
            placed.node.title
        )?;
    }
    if !view.edges.is_empty() {
        writeln!(w)?;
        for edge in &view.edges {
            writeln!(w, "  {} --{}--> {}", edge.source, edge.edge_type, edge.target)?;
        }
    }
    Ok(())
}
