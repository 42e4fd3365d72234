//! The sole output type of the audit engine.

use core::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Severity of a finding.
///
/// The public severities ascend `Warning < NotCompliant < Error`.
/// `InternalAction` marks DCC-internal follow-up items (typically
/// missing-data conditions) rather than public non-compliance, and sorts
/// below the public severities. The numeric values mirror the levels of the
/// upstream audit framework so serialized findings compare stably across
/// systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Internal follow-up for the data coordination center.
    #[serde(rename = "INTERNAL_ACTION")]
    InternalAction = 30,

    /// Worth a look, not a standards violation.
    #[serde(rename = "WARNING")]
    Warning = 40,

    /// Below the published data standards.
    #[serde(rename = "NOT_COMPLIANT")]
    NotCompliant = 50,

    /// Structurally wrong or drastically below standards.
    #[serde(rename = "ERROR")]
    Error = 60,
}

impl Level {
    /// The canonical upper-case name of the level.
    pub fn name(&self) -> &'static str {
        match self {
            Level::InternalAction => "INTERNAL_ACTION",
            Level::Warning => "WARNING",
            Level::NotCompliant => "NOT_COMPLIANT",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One severity-tagged diagnostic about one aspect of an entity's data
/// quality.
///
/// Findings are immutable once constructed: they are pure outputs of a check
/// against a frozen input snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Short category slug (e.g. `"low read depth"`). Stable across runs;
    /// the hosting system groups and gates on it.
    pub category: String,

    /// Human-readable message, self-contained, with `{label|path}` links to
    /// the objects involved.
    pub detail: String,

    /// Severity of the finding.
    pub level: Level,
}

impl Finding {
    /// Creates a new [`Finding`].
    pub fn new<C, D>(category: C, detail: D, level: Level) -> Self
    where
        C: Into<String>,
        D: Into<String>,
    {
        Finding {
            category: category.into(),
            detail: detail.into(),
            level,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.category, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::InternalAction < Level::Warning);
        assert!(Level::Warning < Level::NotCompliant);
        assert!(Level::NotCompliant < Level::Error);
    }

    #[test]
    fn test_level_serialization_round_trip() {
        let serialized = serde_json::to_string(&Level::NotCompliant).unwrap();
        assert_eq!(serialized, "\"NOT_COMPLIANT\"");
        let level: Level = serde_json::from_str(&serialized).unwrap();
        assert_eq!(level, Level::NotCompliant);
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::new("low read depth", "Too shallow.", Level::Warning);
        assert_eq!(
            finding.to_string(),
            "[WARNING] low read depth: Too shallow."
        );
    }
}
