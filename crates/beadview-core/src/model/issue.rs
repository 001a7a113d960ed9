use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::{cmp::Ordering, fmt, str::FromStr};

/// The eight lifecycle states a bead can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Blocked,
    Deferred,
    Closed,
    Tombstone,
    Pinned,
    Hooked,
}

impl Status {
    pub const ALL: [Self; 8] = [
        Self::Open,
        Self::InProgress,
        Self::Blocked,
        Self::Deferred,
        Self::Closed,
        Self::Tombstone,
        Self::Pinned,
        Self::Hooked,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Deferred => "deferred",
            Self::Closed => "closed",
            Self::Tombstone => "tombstone",
            Self::Pinned => "pinned",
            Self::Hooked => "hooked",
        }
    }

    /// `true` only for [`Status::Closed`].
    ///
    /// Tombstoned items are not treated as closed by the graph queries.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// The five dependency kinds the graph models as edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    Blocks,
    Parent,
    RelatesTo,
    Duplicates,
    Supersedes,
}

impl EdgeType {
    pub const ALL: [Self; 5] = [
        Self::Blocks,
        Self::Parent,
        Self::RelatesTo,
        Self::Duplicates,
        Self::Supersedes,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Parent => "parent",
            Self::RelatesTo => "relates_to",
            Self::Duplicates => "duplicates",
            Self::Supersedes => "supersedes",
        }
    }
}

// Edge sort order is defined on the wire name, not on declaration order.
impl Ord for EdgeType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for EdgeType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A declared dependency kind as found in the snapshot.
///
/// Only [`EdgeType`] kinds become graph edges. Everything else (`replies_to`,
/// tracker-specific kinds, typos) is kept verbatim so it can be counted and
/// skipped instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyKind {
    Edge(EdgeType),
    Unsupported(String),
}

impl DependencyKind {
    /// The modeled edge type, or `None` for unsupported kinds.
    #[must_use]
    pub const fn edge_type(&self) -> Option<EdgeType> {
        match self {
            Self::Edge(edge_type) => Some(*edge_type),
            Self::Unsupported(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Edge(edge_type) => edge_type.as_str(),
            Self::Unsupported(raw) => raw,
        }
    }
}

impl From<String> for DependencyKind {
    fn from(raw: String) -> Self {
        match EdgeType::from_str(&raw) {
            Ok(edge_type) => Self::Edge(edge_type),
            Err(_) => Self::Unsupported(raw),
        }
    }
}

impl From<&str> for DependencyKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<EdgeType> for DependencyKind {
    fn from(edge_type: EdgeType) -> Self {
        Self::Edge(edge_type)
    }
}

impl From<DependencyKind> for String {
    fn from(kind: DependencyKind) -> Self {
        match kind {
            DependencyKind::Edge(edge_type) => edge_type.as_str().to_string(),
            DependencyKind::Unsupported(raw) => raw,
        }
    }
}

/// One dependency record owned by an issue.
///
/// Accepts both the compact `{type, target}` form and the beads JSONL form
/// `{issue_id, depends_on_id, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(rename = "type", alias = "dep_type")]
    pub kind: DependencyKind,
    #[serde(alias = "depends_on_id")]
    pub target: String,
    /// Owning issue as echoed by beads exports. Never read by the graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
}

impl Dependency {
    pub fn new(kind: impl Into<DependencyKind>, target: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: target.into(),
            issue_id: None,
        }
    }
}

/// One issue record from an external tracker snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: Status,
    /// Lower is more important.
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
    #[serde(default)]
    pub assignee: Option<String>,
    /// ISO 8601 timestamp, passed through untouched.
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<Dependency>,
    /// Opaque tracker data. The graph engine never reads it.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Issue {
    /// Minimal issue with default title/type, used heavily by fixtures.
    pub fn new(id: impl Into<String>, status: Status) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            status,
            priority: 2,
            issue_type: default_issue_type(),
            assignee: None,
            updated_at: String::new(),
            dependencies: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Append a dependency record and return `self`.
    #[must_use]
    pub fn with_dependency(
        mut self,
        kind: impl Into<DependencyKind>,
        target: impl Into<String>,
    ) -> Self {
        self.dependencies.push(Dependency::new(kind, target));
        self
    }

    /// Shorthand for "this issue is blocked by `blocker`".
    #[must_use]
    pub fn blocked_by(self, blocker: impl Into<String>) -> Self {
        self.with_dependency(EdgeType::Blocks, blocker)
    }
}

fn default_issue_type() -> String {
    "task".to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Dependency>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Dependency>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "status",
                got: s.to_string(),
            })
    }
}

impl FromStr for EdgeType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|edge_type| edge_type.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "dependency type",
                got: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).expect("serialize"),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"tombstone\"").expect("parse"),
            Status::Tombstone
        );
        for status in Status::ALL {
            assert_eq!(Status::from_str(&status.to_string()), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<Status>("\"active\"").is_err());
        assert!(Status::from_str("done").is_err());
    }

    #[test]
    fn only_closed_counts_as_closed() {
        let closed: Vec<Status> = Status::ALL.into_iter().filter(|s| s.is_closed()).collect();
        assert_eq!(closed, vec![Status::Closed]);
    }

    #[test]
    fn edge_types_order_by_wire_name() {
        let mut all = EdgeType::ALL.to_vec();
        all.sort();
        assert_eq!(
            all,
            vec![
                EdgeType::Blocks,
                EdgeType::Duplicates,
                EdgeType::Parent,
                EdgeType::RelatesTo,
                EdgeType::Supersedes,
            ]
        );
    }

    #[test]
    fn dependency_kind_keeps_unsupported_values() {
        let kind: DependencyKind = serde_json::from_str("\"replies_to\"").expect("parse");
        assert_eq!(kind, DependencyKind::Unsupported("replies_to".to_string()));
        assert_eq!(kind.edge_type(), None);
        assert_eq!(serde_json::to_string(&kind).expect("serialize"), "\"replies_to\"");

        let kind: DependencyKind = serde_json::from_str("\"relates_to\"").expect("parse");
        assert_eq!(kind.edge_type(), Some(EdgeType::RelatesTo));
    }

    #[test]
    fn issue_parses_compact_and_beads_dependency_forms() {
        let raw = r#"{
            "id": "bb-1",
            "title": "Wire login",
            "status": "open",
            "priority": 1,
            "issue_type": "feature",
            "assignee": null,
            "updated_at": "2024-05-01T10:00:00Z",
            "dependencies": [
                {"type": "blocks", "target": "bb-2"},
                {"issue_id": "bb-1", "depends_on_id": "bb-3", "type": "parent"}
            ],
            "metadata": {"estimate": 3}
        }"#;

        let issue: Issue = serde_json::from_str(raw).expect("parse issue");
        assert_eq!(issue.dependencies.len(), 2);
        assert_eq!(issue.dependencies[0].kind.edge_type(), Some(EdgeType::Blocks));
        assert_eq!(issue.dependencies[0].target, "bb-2");
        assert_eq!(issue.dependencies[1].target, "bb-3");
        assert_eq!(issue.dependencies[1].issue_id.as_deref(), Some("bb-1"));
        assert_eq!(issue.metadata.get("estimate"), Some(&Value::from(3)));
    }

    #[test]
    fn issue_tolerates_missing_optional_fields() {
        let issue: Issue =
            serde_json::from_str(r#"{"id": "bb-9", "status": "closed", "dependencies": null}"#)
                .expect("parse issue");
        assert_eq!(issue.title, "");
        assert_eq!(issue.issue_type, "task");
        assert_eq!(issue.priority, 0);
        assert!(issue.assignee.is_none());
        assert!(issue.dependencies.is_empty());
        assert!(issue.metadata.is_empty());
    }

    #[test]
    fn builder_helpers_append_dependencies() {
        let issue = Issue::new("bb-1", Status::Open)
            .blocked_by("bb-2")
            .with_dependency("replies_to", "bb-3");
        assert_eq!(issue.title, "bb-1");
        assert_eq!(issue.dependencies.len(), 2);
        assert_eq!(issue.dependencies[0].kind, DependencyKind::Edge(EdgeType::Blocks));
        assert_eq!(
            issue.dependencies[1].kind,
            DependencyKind::Unsupported("replies_to".to_string())
        );
    }
}
