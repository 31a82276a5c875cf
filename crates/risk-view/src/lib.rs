//! Risk heatmap view model: record projection, reveal gating, card masking
//! and CSV export for the governance risk dashboard.

pub mod dataset;
pub mod error;
pub mod export;
pub mod models;
pub mod overview;
pub mod reveal;
pub mod view;
#[cfg(test)]
mod tests;

pub use dataset::{JsonDataset, RiskDataSource, RiskDataset, SeedDataset};
pub use error::{DatasetError, ParseQueryError};
pub use export::{to_csv, CSV_HEADER, EXPORT_FILE_NAME};
pub use models::*;
pub use overview::{OverviewTiles, RiskOverview};
pub use reveal::RevealState;
pub use view::{
    project, AccessState, Masked, Percent, Projection, RevealSummary, RiskCard, RiskDetail,
    RiskView, ToggleOutcome, ViewSnapshot, ViewStatus,
};
