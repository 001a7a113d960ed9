#![forbid(unsafe_code)]
//! beadview-core library.
//!
//! Issue snapshot types, snapshot loading, configuration, and error codes
//! shared by the graph engine and the CLI.
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at I/O seams, `thiserror` enums for
//!   loader failures callers may want to match on.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod snapshot;

pub use model::{Dependency, DependencyKind, EdgeType, HopDepth, Issue, Status};
