//! Risk Datasets
//!
//! The record set a view operates on is injected through [`RiskDataSource`],
//! so the compiled-in seed data can be swapped for a JSON export or any other
//! feed without touching the view.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::DatasetError;
use crate::models::{RiskLevel, RiskRecord, Trend, METRIC_MAX};

/// Validated, read-only set of risk records with unique categories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskDataset {
    records: Vec<RiskRecord>,
}

impl RiskDataset {
    /// Validate and wrap a record set.
    ///
    /// Rejects empty or duplicate categories and metrics above 100.
    pub fn new(records: Vec<RiskRecord>) -> Result<Self, DatasetError> {
        validate(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RiskRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&RiskRecord> {
        self.records.iter().find(|r| r.category == category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }
}

fn validate(records: &[RiskRecord]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.category.trim().is_empty() {
            return Err(DatasetError::EmptyCategory);
        }
        if !seen.insert(record.category.as_str()) {
            return Err(DatasetError::DuplicateCategory(record.category.clone()));
        }
        for (field, value) in record.metrics() {
            if value > METRIC_MAX {
                return Err(DatasetError::MetricOutOfRange {
                    category: record.category.clone(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Anything that can supply the records for a view session
pub trait RiskDataSource {
    fn load(&self) -> Result<RiskDataset, DatasetError>;

    /// Name for logging
    fn source_name(&self) -> &str;
}

/// The six compiled-in heatmap records
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedDataset;

impl SeedDataset {
    pub fn records() -> Vec<RiskRecord> {
        vec![
            RiskRecord::new(
                "Smart Contract",
                RiskLevel::High,
                85,
                95,
                65,
                Trend::Up,
                "2 mins ago",
            ),
            RiskRecord::new(
                "Liquidity Pool",
                RiskLevel::Medium,
                42,
                60,
                78,
                Trend::Down,
                "5 mins ago",
            ),
            RiskRecord::new(
                "Oracle Dependency",
                RiskLevel::High,
                78,
                88,
                45,
                Trend::Stable,
                "1 min ago",
            ),
            RiskRecord::new(
                "Governance Token",
                RiskLevel::Low,
                23,
                35,
                92,
                Trend::Down,
                "8 mins ago",
            ),
            RiskRecord::new(
                "Cross-Chain Bridge",
                RiskLevel::High,
                91,
                98,
                32,
                Trend::Up,
                "3 mins ago",
            ),
            RiskRecord::new(
                "Market Correlation",
                RiskLevel::Medium,
                56,
                65,
                71,
                Trend::Stable,
                "6 mins ago",
            ),
        ]
    }
}

impl RiskDataSource for SeedDataset {
    fn load(&self) -> Result<RiskDataset, DatasetError> {
        RiskDataset::new(Self::records())
    }

    fn source_name(&self) -> &str {
        "seed"
    }
}

/// Records read from a JSON array, either inline or from a file
#[derive(Debug, Clone)]
pub enum JsonDataset {
    Inline(String),
    File(PathBuf),
}

impl JsonDataset {
    pub fn inline(json: impl Into<String>) -> Self {
        JsonDataset::Inline(json.into())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        JsonDataset::File(path.as_ref().to_path_buf())
    }
}

impl RiskDataSource for JsonDataset {
    fn load(&self) -> Result<RiskDataset, DatasetError> {
        let records: Vec<RiskRecord> = match self {
            JsonDataset::Inline(json) => serde_json::from_str(json)?,
            JsonDataset::File(path) => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str(&raw)?
            }
        };
        let dataset = RiskDataset::new(records)?;
        tracing::debug!(
            "Loaded {} risk records from {}",
            dataset.len(),
            self.source_name()
        );
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        match self {
            JsonDataset::Inline(_) => "inline json",
            JsonDataset::File(path) => path.to_str().unwrap_or("json file"),
        }
    }
}
