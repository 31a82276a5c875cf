use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Duplicate risk category: {0}")]
    DuplicateCategory(String),

    #[error("Metric {field} of {category} is {value}, expected 0-100")]
    MetricOutOfRange {
        category: String,
        field: &'static str,
        value: u8,
    },

    #[error("Empty risk category name")]
    EmptyCategory,

    #[error("Invalid risk data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read risk data: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseQueryError {
    #[error("Unknown risk level: {0}")]
    RiskLevel(String),

    #[error("Unknown risk filter: {0} (expected all, high, medium or low)")]
    RiskFilter(String),

    #[error("Unknown sort key: {0} (expected exposure, impact or mitigation)")]
    SortKey(String),
}
