//! Issue snapshot loading.
//!
//! Two on-disk shapes are accepted:
//!
//! - a JSON array of issue records (`[{...}, {...}]`)
//! - beads-style JSONL, one issue record per line (`.beads/issues.jsonl`)
//!
//! The shape is detected from the first non-whitespace byte. Blank JSONL lines
//! are skipped. Anything that does not deserialize into [`Issue`] is a
//! boundary contract violation and is rejected with a [`SnapshotError`];
//! dangling dependency targets and unknown dependency kinds are NOT errors
//! here, they are absorbed later by the graph builder.

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::model::Issue;

/// Detected layout of a snapshot document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    JsonArray,
    JsonLines,
}

impl SnapshotFormat {
    /// Detect the format from the document text.
    ///
    /// An empty document is treated as empty JSONL.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match text.trim_start().as_bytes().first() {
            Some(b'[') => Self::JsonArray,
            _ => Self::JsonLines,
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read snapshot from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("snapshot is not a valid issue list: {0}")]
    Document(#[source] serde_json::Error),

    #[error("invalid issue record on line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse snapshot text in either supported format.
///
/// # Errors
///
/// Returns [`SnapshotError::Document`] for a malformed JSON array and
/// [`SnapshotError::Line`] (1-based line number) for a malformed JSONL record.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_snapshot(text: &str) -> Result<Vec<Issue>, SnapshotError> {
    let format = SnapshotFormat::detect(text);
    let issues = match format {
        SnapshotFormat::JsonArray => {
            serde_json::from_str::<Vec<Issue>>(text).map_err(SnapshotError::Document)?
        }
        SnapshotFormat::JsonLines => parse_lines(text)?,
    };
    debug!(?format, issues = issues.len(), "parsed snapshot");
    Ok(issues)
}

fn parse_lines(text: &str) -> Result<Vec<Issue>, SnapshotError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Issue>(line).map_err(|source| SnapshotError::Line {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Load a snapshot file from disk.
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if the file cannot be read, or a parse error
/// from [`parse_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<Vec<Issue>, SnapshotError> {
    let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&text)
}

/// Read a snapshot from any reader (stdin in the CLI).
///
/// # Errors
///
/// Returns [`SnapshotError::Stdin`] on read failure, or a parse error.
pub fn read_snapshot(mut reader: impl Read) -> Result<Vec<Issue>, SnapshotError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(SnapshotError::Stdin)?;
    parse_snapshot(&text)
}
