//! Shared types for logsift
//!
//! This crate contains data structures used across multiple logsift crates.

use serde::{Deserialize, Serialize};

// ============================================================================
// Log Summary Types
// ============================================================================

/// One filterable activity of an event log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Activity name, also the identifier used by selections and criteria
    pub name: String,

    /// Number of cases containing this activity
    pub case_count: u64,

    /// Relative frequency in percent (0..=100)
    pub frequency: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, case_count: u64, frequency: f64) -> Self {
        Self {
            name: name.into(),
            case_count,
            frequency,
        }
    }
}

/// A log summary as loaded from disk
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSummary {
    #[serde(default)]
    pub log_name: String,

    #[serde(default)]
    pub activities: Vec<Item>,
}

impl LogSummary {
    /// Parse a summary document
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Names of every activity, in source order
    pub fn names(&self) -> Vec<String> {
        self.activities.iter().map(|a| a.name.clone()).collect()
    }
}

// ============================================================================
// Filter Option Types
// ============================================================================

/// Which attribute a filter targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Activity,
    Resource,
    Case,
    Time,
    Performance,
}

impl FilterType {
    pub const ALL: [FilterType; 5] = [
        Self::Activity,
        Self::Resource,
        Self::Case,
        Self::Time,
        Self::Performance,
    ];

    /// Parse from the wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "activity" => Some(Self::Activity),
            "resource" => Some(Self::Resource),
            "case" => Some(Self::Case),
            "time" => Some(Self::Time),
            "performance" => Some(Self::Performance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Resource => "resource",
            Self::Case => "case",
            Self::Time => "time",
            Self::Performance => "performance",
        }
    }
}

/// Whether matching items are kept or dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAction {
    /// Keep only matching items
    #[default]
    Retain,
    /// Keep only items that do not match
    Remove,
}

impl FilterAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "retain" => Some(Self::Retain),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Remove => "remove",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Retain => "Retain",
            Self::Remove => "Remove",
        }
    }

    /// Cycle to the other action
    pub fn next(&self) -> Self {
        match self {
            Self::Retain => Self::Remove,
            Self::Remove => Self::Retain,
        }
    }
}

/// How multi-valued item attributes are matched against criteria values.
///
/// Activity names are single-valued, so `Any` and `All` select the same items
/// today. The mode is carried for attribute types with several values per item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Matching {
    #[default]
    Any,
    All,
}

impl Matching {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "any" => Some(Self::Any),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "Any value",
            Self::All => "All values",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Any => Self::All,
            Self::All => Self::Any,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_json() {
        let summary = LogSummary::from_json(
            r#"{"logName":"orders","activities":[{"name":"Review","caseCount":10,"frequency":50.0}]}"#,
        )
        .unwrap();
        assert_eq!(summary.log_name, "orders");
        assert_eq!(summary.activities, vec![Item::new("Review", 10, 50.0)]);
    }

    #[test]
    fn test_summary_missing_activities() {
        let summary = LogSummary::from_json(r#"{"logName":"empty"}"#).unwrap();
        assert!(summary.activities.is_empty());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&FilterAction::Remove).unwrap(), "\"remove\"");
        assert_eq!(FilterType::parse("performance"), Some(FilterType::Performance));
        assert_eq!(Matching::parse("every"), None);
        for t in FilterType::ALL {
            assert_eq!(FilterType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_cycle() {
        assert_eq!(FilterAction::Retain.next(), FilterAction::Remove);
        assert_eq!(Matching::All.next(), Matching::Any);
    }
}
