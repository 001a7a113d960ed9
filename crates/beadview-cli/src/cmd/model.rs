//! `beadview model`: build the graph and summarize it.

use std::io::Write;

use beadview_graph::{GraphDiagnostics, GraphModel};
use clap::Args;
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `beadview model`.
#[derive(Args, Debug, Default)]
pub struct ModelArgs {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelReport<'a> {
    content_hash: String,
    #[serde(flatten)]
    model: &'a GraphModel,
}

/// Execute `beadview model`.
pub fn run_model(_args: &ModelArgs, ctx: &Context) -> anyhow::Result<()> {
    let report = ModelReport {
        content_hash: ctx.model.content_hash(),
        model: &ctx.model,
    };
    render_mode(ctx.output, &report, render_model_text, render_model_pretty)
}

fn diagnostics_line(d: GraphDiagnostics) -> String {
    format!(
        "missing_targets={} dropped_duplicates={} unsupported_types={}",
        d.missing_targets, d.dropped_duplicates, d.unsupported_types
    )
}

fn render_model_text(report: &ModelReport<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "nodes={} edges={} {} hash={}",
        report.model.node_count(),
        report.model.edge_count(),
        diagnostics_line(report.model.diagnostics()),
        report.content_hash
    )
}

fn render_model_pretty(report: &ModelReport<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    let model = report.model;
    let diagnostics = model.diagnostics();

    pretty_section(w, "Graph model")?;
    if let Some(key) = model.project_key() {
        pretty_kv(w, "Project", key)?;
    }
    pretty_kv(w, "Nodes", model.node_count().to_string())?;
    pretty_kv(w, "Edges", model.edge_count().to_string())?;
    pretty_kv(w, "Content hash", &report.content_hash)?;

    if diagnostics.total() > 0 {
        writeln!(w)?;
        pretty_section(w, "Discarded dependency records")?;
        pretty_kv(w, "Missing targets", diagnostics.missing_targets.to_string())?;
        pretty_kv(w, "Duplicates", diagnostics.dropped_duplicates.to_string())?;
        pretty_kv(w, "Unsupported", diagnostics.unsupported_types.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beadview_core::{Issue, Status};
    use beadview_graph::{BuildOptions, build_graph_model};

    fn model() -> GraphModel {
        build_graph_model(
            &[
                Issue::new("bb-1", Status::Open),
                Issue::new("bb-2", Status::Open)
                    .blocked_by("bb-1")
                    .blocked_by("bb-gone"),
            ],
            &BuildOptions {
                project_key: Some("bb".to_string()),
            },
        )
    }

    #[test]
    fn text_is_one_line() {
        let model = model();
        let report = ModelReport {
            content_hash: model.content_hash(),
            model: &model,
        };
        let mut out = Vec::new();
        render_model_text(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.starts_with("nodes=2 edges=1 missing_targets=1"));
    }

    #[test]
    fn pretty_lists_discards_only_when_present() {
        let model = model();
        let report = ModelReport {
            content_hash: model.content_hash(),
            model: &model,
        };
        let mut out = Vec::new();
        render_model_pretty(&report, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("Project:"));
        assert!(rendered.contains("Discarded dependency records"));
    }

    #[test]
    fn json_report_flattens_model() {
        let model = model();
        let report = ModelReport {
            content_hash: model.content_hash(),
            model: &model,
        };
        let json = serde_json::to_value(&report).expect("serialize");
        assert!(json["contentHash"].as_str().is_some_and(|h| h.starts_with("blake3:")));
        assert_eq!(json["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["projectKey"], "bb");
    }
}
