use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseQueryError;

/// Upper bound for every risk metric (exposure, impact, mitigation)
pub const METRIC_MAX: u8 = 100;

/// Risk level classification of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    /// Upper-cased label used on cards and in the export
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            _ => Err(ParseQueryError::RiskLevel(s.to_string())),
        }
    }
}

/// Direction the risk has been moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }
}

/// One row of the risk heatmap.
///
/// `category` is the primary key within a dataset; reveal state and
/// projections are keyed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRecord {
    pub category: String,
    #[serde(alias = "risk")]
    pub risk_level: RiskLevel,
    /// Exposure level, 0 to 100
    pub exposure: u8,
    /// Impact level, 0 to 100
    pub impact: u8,
    /// Mitigation status, 0 to 100
    pub mitigation: u8,
    pub trend: Trend,
    /// Display timestamp, opaque to the view ("2 mins ago")
    pub last_updated: String,
}

impl RiskRecord {
    pub fn new(
        category: impl Into<String>,
        risk_level: RiskLevel,
        exposure: u8,
        impact: u8,
        mitigation: u8,
        trend: Trend,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            risk_level,
            exposure,
            impact,
            mitigation,
            trend,
            last_updated: last_updated.into(),
        }
    }

    /// Metric name and value pairs, for range validation
    pub fn metrics(&self) -> [(&'static str, u8); 3] {
        [
            ("exposure", self.exposure),
            ("impact", self.impact),
            ("mitigation", self.mitigation),
        ]
    }
}

/// Risk level filter selected in the heatmap toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl RiskFilter {
    pub fn matches(&self, level: RiskLevel) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::High => level == RiskLevel::High,
            RiskFilter::Medium => level == RiskLevel::Medium,
            RiskFilter::Low => level == RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFilter::All => "all",
            RiskFilter::High => "high",
            RiskFilter::Medium => "medium",
            RiskFilter::Low => "low",
        }
    }
}

impl From<RiskLevel> for RiskFilter {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => RiskFilter::High,
            RiskLevel::Medium => RiskFilter::Medium,
            RiskLevel::Low => RiskFilter::Low,
        }
    }
}

impl FromStr for RiskFilter {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(RiskFilter::All),
            other => other
                .parse::<RiskLevel>()
                .map(RiskFilter::from)
                .map_err(|_| ParseQueryError::RiskFilter(s.to_string())),
        }
    }
}

/// Metric the heatmap is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Exposure,
    Impact,
    Mitigation,
}

impl SortKey {
    /// Ordering of two records under this key.
    ///
    /// Exposure and impact put the highest value first. Mitigation is
    /// ascending so the least-mitigated risks surface first.
    pub fn compare(&self, a: &RiskRecord, b: &RiskRecord) -> Ordering {
        match self {
            SortKey::Exposure => b.exposure.cmp(&a.exposure),
            SortKey::Impact => b.impact.cmp(&a.impact),
            SortKey::Mitigation => a.mitigation.cmp(&b.mitigation),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Exposure => "exposure",
            SortKey::Impact => "impact",
            SortKey::Mitigation => "mitigation",
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exposure" => Ok(SortKey::Exposure),
            "impact" => Ok(SortKey::Impact),
            "mitigation" => Ok(SortKey::Mitigation),
            _ => Err(ParseQueryError::SortKey(s.to_string())),
        }
    }
}

/// The user's current filter/sort/search selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub risk_filter: RiskFilter,
    pub sort_key: SortKey,
    #[serde(default)]
    pub search_term: String,
}

impl ViewQuery {
    pub fn new(risk_filter: RiskFilter, sort_key: SortKey, search_term: impl Into<String>) -> Self {
        Self {
            risk_filter,
            sort_key,
            search_term: search_term.into(),
        }
    }

    /// Whether a record passes both the level filter and the search term
    pub fn matches(&self, record: &RiskRecord) -> bool {
        if !self.risk_filter.matches(record.risk_level) {
            return false;
        }
        let term = self.search_term.to_lowercase();
        term.is_empty() || record.category.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, level: RiskLevel) -> RiskRecord {
        RiskRecord::new(category, level, 10, 20, 30, Trend::Stable, "now")
    }

    #[test]
    fn filter_parsing_accepts_any_case() {
        assert_eq!("HIGH".parse::<RiskFilter>().unwrap(), RiskFilter::High);
        assert_eq!("all".parse::<RiskFilter>().unwrap(), RiskFilter::All);
        assert_eq!(" Medium ".parse::<RiskFilter>().unwrap(), RiskFilter::Medium);
        assert!("critical".parse::<RiskFilter>().is_err());
        assert!("size".parse::<SortKey>().is_err());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let query = ViewQuery::new(RiskFilter::All, SortKey::Exposure, "LIQUID");
        assert!(query.matches(&record("Liquidity Pool", RiskLevel::Medium)));
        assert!(!query.matches(&record("Oracle Dependency", RiskLevel::High)));
    }

    #[test]
    fn filter_and_search_combine() {
        let query = ViewQuery::new(RiskFilter::High, SortKey::Exposure, "pool");
        assert!(!query.matches(&record("Liquidity Pool", RiskLevel::Medium)));
        assert!(query.matches(&record("Liquidity Pool", RiskLevel::High)));
    }

    #[test]
    fn mitigation_orders_ascending() {
        let mut low = record("a", RiskLevel::Low);
        low.mitigation = 10;
        let mut high = record("b", RiskLevel::Low);
        high.mitigation = 90;
        assert_eq!(SortKey::Mitigation.compare(&low, &high), Ordering::Less);
        low.exposure = 5;
        high.exposure = 50;
        assert_eq!(SortKey::Exposure.compare(&low, &high), Ordering::Greater);
    }

    #[test]
    fn record_accepts_legacy_risk_field() {
        let json = r#"{
            "category": "Smart Contract",
            "risk": "high",
            "exposure": 85,
            "impact": 95,
            "mitigation": 65,
            "trend": "up",
            "lastUpdated": "2 mins ago"
        }"#;
        let parsed: RiskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.risk_level, RiskLevel::High);
        assert_eq!(parsed.last_updated, "2 mins ago");
    }
}
