use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    SnapshotNotFound,
    SnapshotParseError,
    ItemNotFound,
    InvalidDepth,
    InternalUnexpected,
}

impl ErrorCode {
    pub const ALL: [Self; 7] = [
        Self::NotInitialized,
        Self::ConfigParseError,
        Self::SnapshotNotFound,
        Self::SnapshotParseError,
        Self::ItemNotFound,
        Self::InvalidDepth,
        Self::InternalUnexpected,
    ];

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::SnapshotNotFound => "E1003",
            Self::SnapshotParseError => "E1004",
            Self::ItemNotFound => "E2001",
            Self::InvalidDepth => "E2002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "No beads project found",
            Self::ConfigParseError => "Config file parse error",
            Self::SnapshotNotFound => "Issue snapshot not found",
            Self::SnapshotParseError => "Issue snapshot parse error",
            Self::ItemNotFound => "Item not found",
            Self::InvalidDepth => "Invalid depth value",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => {
                Some("Run inside a directory with .beads/ or pass --input <file>.")
            }
            Self::ConfigParseError => Some("Fix syntax in .beadview/config.toml and retry."),
            Self::SnapshotNotFound => {
                Some("Export issues to .beads/issues.jsonl or pass --input <file>.")
            }
            Self::SnapshotParseError => {
                Some("Each record needs an id and one of the eight known statuses.")
            }
            Self::ItemNotFound => Some("Check the id against `beadview model`."),
            Self::InvalidDepth => Some("Use a positive hop count (1, 2, ...) or 'full'."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ErrorCode::ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ErrorCode::ALL {
            let rendered = code.code();
            assert_eq!(rendered.len(), 5);
            assert!(rendered.starts_with('E'));
            assert!(rendered.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(ErrorCode::SnapshotParseError.to_string(), "E1004");
    }
}
