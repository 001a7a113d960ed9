use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::HopDepth;

/// Directory holding project-level beadview settings.
pub const PROJECT_DIR: &str = ".beadview";
/// Directory written by the beads tracker.
pub const BEADS_DIR: &str = ".beads";
/// Default snapshot location, relative to the project root.
pub const DEFAULT_SNAPSHOT_PATH: &str = ".beads/issues.jsonl";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Key reported on every built model (e.g. the beads prefix).
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Fixed node box and spacing used by every layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_node_width")]
    pub node_width: f64,
    #[serde(default = "default_node_height")]
    pub node_height: f64,
    /// Horizontal gap between focus-layout columns and grid cells.
    #[serde(default = "default_gutter_x")]
    pub gutter_x: f64,
    /// Vertical gap between focus-layout rows and grid cells.
    #[serde(default = "default_gutter_y")]
    pub gutter_y: f64,
    /// Horizontal gap between ranks in the layered layout.
    #[serde(default = "default_rank_sep")]
    pub rank_sep: f64,
    /// Vertical gap between nodes sharing a rank in the layered layout.
    #[serde(default = "default_node_sep")]
    pub node_sep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            gutter_x: default_gutter_x(),
            gutter_y: default_gutter_y(),
            rank_sep: default_rank_sep(),
            node_sep: default_node_sep(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub default_depth: HopDepth,
    #[serde(default)]
    pub hide_closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot path relative to the project root.
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project_root: PathBuf,
    pub project: ProjectConfig,
    pub user: UserConfig,
}

impl EffectiveConfig {
    /// Absolute path of the configured snapshot.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.project_root.join(&self.project.snapshot.path)
    }
}

/// Walk up from `start` to the nearest directory containing `.beadview/` or
/// `.beads/`.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() || current.join(BEADS_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_DIR).join("config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_user_config_from(&config_dir.join("beadview/config.toml"))
}

fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve project and user configuration for a working directory.
///
/// When no project root can be found, `start` itself is used and the
/// project config falls back to defaults.
pub fn resolve_config(start: &Path) -> Result<EffectiveConfig> {
    let project_root = find_project_root(start).unwrap_or_else(|| start.to_path_buf());
    let project = load_project_config(&project_root)?;
    let user = load_user_config()?;

    tracing::debug!(root = %project_root.display(), "resolved beadview config");

    Ok(EffectiveConfig {
        project_root,
        project,
        user,
    })
}

const fn default_node_width() -> f64 {
    220.0
}

const fn default_node_height() -> f64 {
    64.0
}

const fn default_gutter_x() -> f64 {
    80.0
}

const fn default_gutter_y() -> f64 {
    32.0
}

const fn default_rank_sep() -> f64 {
    80.0
}

const fn default_node_sep() -> f64 {
    32.0
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}
