use beadview_core::{EdgeType, HopDepth, Issue, Status};
use beadview_graph::{
    BuildOptions, GraphModel, PathOptions, ViewOptions, analyze_blocked_chain, build_graph_model,
    build_graph_view_model, build_path_workspace, detect_dependency_cycles,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const TIERS: &[(&str, usize)] = &[("small", 100), ("medium", 1_000), ("large", 5_000)];

/// Layered synthetic snapshot: each issue is blocked by up to two issues a
/// few positions back, belongs to an epic every 50 issues, and every 97th
/// issue closes a short cycle.
fn synthetic_snapshot(count: usize) -> Vec<Issue> {
    (0..count)
        .map(|idx| {
            let status = match idx % 7 {
                0 => Status::Closed,
                1 => Status::InProgress,
                _ => Status::Open,
            };
            let mut issue = Issue::new(format!("bd-{idx:05}"), status);
            for back in [1, 3] {
                if idx >= back {
                    issue = issue.blocked_by(format!("bd-{:05}", idx - back));
                }
            }
            if idx % 50 != 0 {
                issue = issue.with_dependency(EdgeType::Parent, format!("bd-{:05}", idx - idx % 50));
            }
            if idx % 97 == 0 && idx + 2 < count {
                issue = issue.blocked_by(format!("bd-{:05}", idx + 2));
            }
            issue
        })
        .collect()
}

fn middle_id(model: &GraphModel) -> Option<String> {
    model.nodes().get(model.node_count() / 2).map(|n| n.id.clone())
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph.queries");

    for &(name, count) in TIERS {
        let issues = synthetic_snapshot(count);
        let model = build_graph_model(&issues, &BuildOptions::default());
        let focus = middle_id(&model);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("build", name), &issues, |b, issues| {
            b.iter(|| black_box(build_graph_model(issues, &BuildOptions::default())));
        });

        let view = ViewOptions {
            focus_id: focus.clone(),
            depth: HopDepth::TWO,
            ..ViewOptions::default()
        };
        group.bench_with_input(BenchmarkId::new("view_focus", name), &model, |b, model| {
            b.iter(|| black_box(build_graph_view_model(model, &view)));
        });

        group.bench_with_input(BenchmarkId::new("view_full", name), &model, |b, model| {
            b.iter(|| black_box(build_graph_view_model(model, &ViewOptions::default())));
        });

        let path = PathOptions {
            focus_id: focus.clone(),
            depth: HopDepth::Full,
            hide_closed: false,
        };
        group.bench_with_input(BenchmarkId::new("path", name), &model, |b, model| {
            b.iter(|| black_box(build_path_workspace(model, &path)));
        });

        group.bench_with_input(BenchmarkId::new("chain", name), &model, |b, model| {
            b.iter(|| black_box(analyze_blocked_chain(model, focus.as_deref())));
        });

        group.bench_with_input(BenchmarkId::new("cycles", name), &model, |b, model| {
            b.iter(|| black_box(detect_dependency_cycles(model)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
