//! `beadview chain`: everything transitively blocking one issue.

use std::io::Write;

use beadview_graph::{BlockedChainAnalysis, analyze_blocked_chain};
use clap::Args;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `beadview chain`.
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Blocked issue to analyze.
    pub id: String,
}

/// Execute `beadview chain`.
pub fn run_chain(args: &ChainArgs, ctx: &Context) -> anyhow::Result<()> {
    ctx.check_focus(&args.id);
    let analysis = analyze_blocked_chain(&ctx.model, Some(&args.id));
    render_mode(ctx.output, &analysis, render_chain_text, |analysis, w| {
        render_chain_pretty(&args.id, analysis, w)
    })
}

fn render_chain_text(analysis: &BlockedChainAnalysis, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "blockers {}", analysis.blocker_node_ids.join(" "))?;
    writeln!(
        w,
        "open={} in_progress={} actionable={}",
        analysis.open_blocker_count,
        analysis.in_progress_blocker_count,
        analysis.first_actionable_blocker_id.as_deref().unwrap_or("-")
    )?;
    for key in &analysis.chain_edge_ids {
        writeln!(w, "edge {key}")?;
    }
    Ok(())
}

fn render_chain_pretty(
    focus: &str,
    analysis: &BlockedChainAnalysis,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(w, &format!("Blocked chain for {focus}"))?;
    if analysis.blocker_node_ids.is_empty() {
        writeln!(w, "Nothing blocks {focus}.")?;
        return Ok(());
    }

    pretty_kv(w, "Blockers", analysis.blocker_node_ids.len().to_string())?;
    pretty_kv(w, "Open", analysis.open_blocker_count.to_string())?;
    pretty_kv(w, "In progress", analysis.in_progress_blocker_count.to_string())?;
    pretty_kv(
        w,
        "Start with",
        analysis
            .first_actionable_blocker_id
            .as_deref()
            .unwrap_or("(no actionable blocker)"),
    )?;

    writeln!(w)?;
    for id in &analysis.blocker_node_ids {
        writeln!(w, "  - {id}")?;
    }
    Ok(())
}
