//! Command handlers and the shared snapshot/config plumbing they run on.

pub mod chain;
pub mod cycles;
pub mod model;
pub mod path;
pub mod view;

use std::io;
use std::path::{Path, PathBuf};

use beadview_core::config::{EffectiveConfig, find_project_root};
use beadview_core::error::ErrorCode;
use beadview_core::snapshot::{self, SnapshotError};
use beadview_core::{HopDepth, Issue};
use beadview_graph::{BuildOptions, GraphModel, build_graph_model};
use tracing::{debug, info};

use crate::output::{CliError, OutputMode, Reported, render_error, render_warning};

/// Everything a command needs: the built model, resolved config, and the
/// output mode.
pub struct Context {
    pub model: GraphModel,
    pub config: EffectiveConfig,
    pub output: OutputMode,
}

impl Context {
    /// Warn (human modes only) when `id` is not in the model.
    pub fn check_focus(&self, id: &str) {
        if self.model.contains(id) {
            return;
        }
        let code = ErrorCode::ItemNotFound;
        render_warning(
            self.output,
            &format!("{}: {id} ({})", code.message(), code.code()),
        );
    }
}

/// Where to read the issue snapshot from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    Stdin,
    File(PathBuf),
}

impl SnapshotSource {
    /// `--input -` means stdin; no flag means the configured project path.
    pub fn resolve(
        input: Option<&Path>,
        cwd: &Path,
        config: &EffectiveConfig,
    ) -> Result<Self, CliError> {
        match input {
            Some(path) if path == Path::new("-") => Ok(Self::Stdin),
            Some(path) => Ok(Self::File(cwd.join(path))),
            None => {
                if find_project_root(cwd).is_none() {
                    return Err(CliError::from_code(
                        ErrorCode::NotInitialized,
                        cwd.display(),
                    ));
                }
                Ok(Self::File(config.snapshot_path()))
            }
        }
    }
}

/// Read and parse the snapshot, mapping failures to stable error codes.
pub fn load_issues(source: &SnapshotSource) -> Result<Vec<Issue>, CliError> {
    let result = match source {
        SnapshotSource::Stdin => snapshot::read_snapshot(io::stdin().lock()),
        SnapshotSource::File(path) => {
            if !path.exists() {
                return Err(CliError::from_code(
                    ErrorCode::SnapshotNotFound,
                    path.display(),
                ));
            }
            snapshot::load_snapshot(path)
        }
    };

    result.map_err(|err| {
        let code = match err {
            SnapshotError::Io { .. } | SnapshotError::Stdin(_) => ErrorCode::SnapshotNotFound,
            SnapshotError::Document(_) | SnapshotError::Line { .. } => {
                ErrorCode::SnapshotParseError
            }
        };
        CliError::from_code(code, err)
    })
}

/// Load the snapshot and build the model for a command run.
pub fn prepare(
    input: Option<&Path>,
    project_key: Option<String>,
    config: EffectiveConfig,
    output: OutputMode,
) -> anyhow::Result<Context> {
    let cwd = std::env::current_dir()?;
    let loaded = SnapshotSource::resolve(input, &cwd, &config)
        .and_then(|source| {
            debug!(?source, "loading snapshot");
            load_issues(&source)
        });
    let issues = match loaded {
        Ok(issues) => issues,
        Err(err) => {
            render_error(output, &err)?;
            return Err(Reported.into());
        }
    };

    let options = BuildOptions {
        project_key: project_key.or_else(|| config.project.project_key.clone()),
    };
    let model = build_graph_model(&issues, &options);
    info!(
        nodes = model.node_count(),
        edges = model.edge_count(),
        "graph model ready"
    );

    Ok(Context {
        model,
        config,
        output,
    })
}

/// Parse `--depth`, falling back to the configured default.
pub fn resolve_depth(
    flag: Option<&str>,
    fallback: HopDepth,
    output: OutputMode,
) -> anyhow::Result<HopDepth> {
    let Some(raw) = flag else {
        return Ok(fallback);
    };
    match raw.parse::<HopDepth>() {
        Ok(depth) => Ok(depth),
        Err(err) => {
            render_error(output, &CliError::from_code(ErrorCode::InvalidDepth, &err))?;
            Err(Reported.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beadview_core::Status;
    use beadview_core::config::{ProjectConfig, UserConfig};

    fn config(root: &Path) -> EffectiveConfig {
        EffectiveConfig {
            project_root: root.to_path_buf(),
            project: ProjectConfig::default(),
            user: UserConfig::default(),
        }
    }

    #[test]
    fn check_focus_is_quiet_for_known_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = Context {
            model: build_graph_model(&[Issue::new("bd-1", Status::Open)], &BuildOptions::default()),
            config: config(dir.path()),
            output: OutputMode::Json,
        };
        ctx.check_focus("bd-1");
        ctx.check_focus("bd-404");
        assert!(ctx.model.contains("bd-1"));
    }

    #[test]
    fn dash_means_stdin() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = SnapshotSource::resolve(Some(Path::new("-")), dir.path(), &config(dir.path()))
            .expect("resolve");
        assert_eq!(source, SnapshotSource::Stdin);
    }

    #[test]
    fn explicit_input_is_relative_to_cwd() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = SnapshotSource::resolve(
            Some(Path::new("issues.json")),
            dir.path(),
            &config(dir.path()),
        )
        .expect("resolve");
        assert_eq!(source, SnapshotSource::File(dir.path().join("issues.json")));
    }

    #[test]
    fn missing_project_is_not_initialized() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SnapshotSource::resolve(None, dir.path(), &config(dir.path()))
            .expect_err("no project");
        assert_eq!(err.error_code.as_deref(), Some("E1001"));
    }

    #[test]
    fn configured_path_is_used_inside_project() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join(".beads")).expect("mkdir");
        let source =
            SnapshotSource::resolve(None, dir.path(), &config(dir.path())).expect("resolve");
        assert_eq!(
            source,
            SnapshotSource::File(dir.path().join(".beads/issues.jsonl"))
        );
    }

    #[test]
    fn missing_file_maps_to_snapshot_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_issues(&SnapshotSource::File(dir.path().join("nope.jsonl")))
            .expect_err("missing");
        assert_eq!(err.error_code.as_deref(), Some("E1003"));
    }

    #[test]
    fn bad_line_maps_to_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("issues.jsonl");
        std::fs::write(&path, "{\"id\":\"a\",\"status\":\"open\"}\nnot json\n").expect("write");
        let err = load_issues(&SnapshotSource::File(path)).expect_err("parse");
        assert_eq!(err.error_code.as_deref(), Some("E1004"));
        assert!(err.message.contains("line 2"));
    }

    #[test]
    fn depth_defaults_and_parses() {
        assert_eq!(
            resolve_depth(None, HopDepth::TWO, OutputMode::Json).expect("default"),
            HopDepth::TWO
        );
        assert_eq!(
            resolve_depth(Some("full"), HopDepth::ONE, OutputMode::Json).expect("full"),
            HopDepth::Full
        );
        assert!(resolve_depth(Some("0"), HopDepth::ONE, OutputMode::Json).is_err());
    }
}
