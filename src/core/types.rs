//! Finding and plan value types shared by every analyzer

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity levels for detected issues, ordered low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Numeric rank used for prioritization: critical=4 down to low=1
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue categories. The five known categories get dedicated variants for
/// renderers keyed on them; anything else passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Performance,
    Reliability,
    Security,
    Cost,
    Quality,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Performance => "performance",
            Category::Reliability => "reliability",
            Category::Security => "security",
            Category::Cost => "cost",
            Category::Quality => "quality",
            Category::Other(name) => name,
        }
    }

    /// Display form with the first letter capitalized, e.g. "Performance"
    pub fn title_case(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "performance" => Category::Performance,
            "reliability" => Category::Reliability,
            "security" => Category::Security,
            "cost" => Category::Cost,
            "quality" => Category::Quality,
            other => Category::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::from(s.as_str()))
    }
}

/// A detected problem in one of the monitored pipelines.
///
/// Issues are immutable once constructed: analyzers emit fresh values on
/// every call and nothing downstream mutates a returned issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub affected_component: String,
    pub impact: String,
    pub recommendation: String,
    /// Deterministic weighted-evidence score in [0.0, 1.0], not a probability
    pub confidence: f64,
    /// Supplementary structured values (counts, rates, sample names) for
    /// testing and audit; downstream consumers must not branch on these
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Optimization kinds follow the same open-set rule as [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptimizationKind {
    Time,
    Cost,
    Reliability,
    Performance,
    Quality,
    Other(String),
}

impl OptimizationKind {
    pub fn as_str(&self) -> &str {
        match self {
            OptimizationKind::Time => "time",
            OptimizationKind::Cost => "cost",
            OptimizationKind::Reliability => "reliability",
            OptimizationKind::Performance => "performance",
            OptimizationKind::Quality => "quality",
            OptimizationKind::Other(name) => name,
        }
    }
}

impl From<&str> for OptimizationKind {
    fn from(s: &str) -> Self {
        match s {
            "time" => OptimizationKind::Time,
            "cost" => OptimizationKind::Cost,
            "reliability" => OptimizationKind::Reliability,
            "performance" => OptimizationKind::Performance,
            "quality" => OptimizationKind::Quality,
            other => OptimizationKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for OptimizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OptimizationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OptimizationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(OptimizationKind::from(s.as_str()))
    }
}

/// Relative effort to implement an optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

/// A ranked, multi-step remediation suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    #[serde(rename = "type")]
    pub kind: OptimizationKind,
    pub title: String,
    pub description: String,
    pub estimated_impact: String,
    pub implementation_effort: EffortLevel,
    /// Urgency 1-5, 1 being highest
    pub priority: u8,
    /// Ordered execution sequence
    pub steps: Vec<String>,
    /// Signed fractional deltas per metric; negative means reduction.
    /// Informational estimates only.
    pub metrics_impact: BTreeMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_rank_total_order() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }

    #[test]
    fn category_round_trips_unknown_values() {
        let cat: Category = serde_json::from_str("\"capacity\"").unwrap();
        assert_eq!(cat, Category::Other("capacity".to_string()));
        assert_eq!(serde_json::to_string(&cat).unwrap(), "\"capacity\"");
    }

    #[test]
    fn category_known_values_use_dedicated_variants() {
        let cat: Category = serde_json::from_str("\"reliability\"").unwrap();
        assert_eq!(cat, Category::Reliability);
    }

    #[test]
    fn category_title_case() {
        assert_eq!(Category::Performance.title_case(), "Performance");
        assert_eq!(Category::Other("capacity".into()).title_case(), "Capacity");
    }

    #[test]
    fn optimization_kind_serializes_as_type_field() {
        let opt = Optimization {
            kind: OptimizationKind::Time,
            title: "t".into(),
            description: "d".into(),
            estimated_impact: "e".into(),
            implementation_effort: EffortLevel::Low,
            priority: 1,
            steps: vec!["step one".into()],
            metrics_impact: BTreeMap::new(),
        };
        let json = serde_json::to_value(&opt).unwrap();
        assert_eq!(json["type"], "time");
        assert_eq!(json["implementation_effort"], "low");
    }
}
