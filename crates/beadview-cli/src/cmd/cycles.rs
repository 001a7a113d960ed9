//! `beadview cycles`: list dependency cycles among `blocks` edges.

use std::io::Write;

use beadview_graph::{CycleAnomaly, GraphModel, detect_dependency_cycles};
use clap::Args;

use super::Context;
use crate::output::render_mode;

/// Arguments for `beadview cycles`.
#[derive(Args, Debug, Default)]
pub struct CyclesArgs {}

/// Execute `beadview cycles`.
pub fn run_cycles(_args: &CyclesArgs, ctx: &Context) -> anyhow::Result<()> {
    let anomaly = detect_dependency_cycles(&ctx.model);
    if !anomaly.is_empty() {
        tracing::warn!(cycles = anomaly.cycles.len(), "dependency cycles present");
    }
    render_mode(ctx.output, &anomaly, render_cycles_text, |anomaly, w| {
        render_cycles_pretty(anomaly, &ctx.model, w)
    })
}

fn render_cycles_text(anomaly: &CycleAnomaly, w: &mut dyn Write) -> std::io::Result<()> {
    for cycle in &anomaly.cycles {
        writeln!(w, "cycle {}", cycle.join(" "))?;
    }
    Ok(())
}

fn render_cycles_pretty(
    anomaly: &CycleAnomaly,
    model: &GraphModel,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    if anomaly.is_empty() {
        writeln!(w, "No dependency cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Dependency cycles ({})", anomaly.cycles.len())?;

    for (idx, cycle) in anomaly.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for item_id in cycle {
            match model.node(item_id) {
                Some(node) if node.title != node.id => {
                    writeln!(w, "  - {item_id}  {}", node.title)?;
                }
                _ => writeln!(w, "  - {item_id}")?,
            }
        }
    }

    Ok(())
}
