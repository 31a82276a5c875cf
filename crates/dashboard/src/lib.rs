//! Governance risk dashboard
//!
//! Ties a wallet session to the risk heatmap view and the governance
//! contract desk.

pub mod config;
pub mod error;
pub mod governance;
pub mod session;
pub mod wallet;

pub use config::DashboardConfig;
pub use error::SubmissionError;
pub use governance::{GovernanceDesk, ProposalForm, RiskAssessmentForm, DEFAULT_PROPOSAL_DAYS};
pub use session::DashboardSession;
pub use wallet::{short_address, WalletSession};
