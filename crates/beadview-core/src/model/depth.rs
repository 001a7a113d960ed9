use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How far a neighborhood query reaches from its focus node.
///
/// Serialized as a positive integer hop count or the string `"full"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDepth", into = "RawDepth")]
pub enum HopDepth {
    /// At most this many hops. Always at least 1.
    Hops(u32),
    /// No hop limit.
    Full,
}

impl HopDepth {
    pub const ONE: Self = Self::Hops(1);
    pub const TWO: Self = Self::Hops(2);

    /// The hop limit, or `None` for [`HopDepth::Full`].
    #[must_use]
    pub const fn limit(self) -> Option<u32> {
        match self {
            Self::Hops(hops) => Some(hops),
            Self::Full => None,
        }
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl Default for HopDepth {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for HopDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hops(hops) => write!(f, "{hops}"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Error returned for depth values that are neither `full` nor a positive integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDepthError(pub String);

impl fmt::Display for ParseDepthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid depth '{}': expected a positive hop count or 'full'",
            self.0
        )
    }
}

impl std::error::Error for ParseDepthError {}

impl FromStr for HopDepth {
    type Err = ParseDepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("full") {
            return Ok(Self::Full);
        }
        match trimmed.parse::<u32>() {
            Ok(hops) if hops > 0 => Ok(Self::Hops(hops)),
            _ => Err(ParseDepthError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawDepth {
    Hops(u32),
    Text(String),
}

impl TryFrom<RawDepth> for HopDepth {
    type Error = ParseDepthError;

    fn try_from(raw: RawDepth) -> Result<Self, Self::Error> {
        match raw {
            RawDepth::Hops(0) => Err(ParseDepthError("0".to_string())),
            RawDepth::Hops(hops) => Ok(Self::Hops(hops)),
            RawDepth::Text(text) => text.parse(),
        }
    }
}

impl From<HopDepth> for RawDepth {
    fn from(depth: HopDepth) -> Self {
        match depth {
            HopDepth::Hops(hops) => Self::Hops(hops),
            HopDepth::Full => Self::Text("full".to_string()),
        }
    }
}
