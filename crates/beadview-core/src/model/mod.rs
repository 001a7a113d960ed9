//! Plain-data types describing an issue snapshot and query parameters.

pub mod depth;
pub mod issue;

pub use depth::{HopDepth, ParseDepthError};
pub use issue::{Dependency, DependencyKind, EdgeType, Issue, ParseEnumError, Status};
