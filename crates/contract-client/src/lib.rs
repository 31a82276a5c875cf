use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod mock;

pub use mock::{ContractCall, MockContractClient};

/// Placeholder contract address used when none is configured
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Whether `address` looks like an EVM address (`0x` + 40 hex digits)
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Governance contract types
// ---------------------------------------------------------------------------

/// DAO membership as reported by the governance contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub account: String,
    pub is_member: bool,
    pub reputation: u32,
    pub voting_power: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessmentRequest {
    pub risk_type: String,
    pub description: String,
    /// 0 to 100
    pub risk_score: u8,
    /// 0 to 100
    pub confidence_level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub title: String,
    pub description: String,
    pub duration_secs: u64,
}

impl ProposalRequest {
    /// Build a request from a voting period given in whole days
    pub fn from_days(title: impl Into<String>, description: impl Into<String>, days: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            duration_secs: u64::from(days) * SECONDS_PER_DAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub proposal_id: u64,
    pub support: bool,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractFunction {
    CreateRiskAssessment,
    CreateProposal,
    CastVote,
    ExecuteProposal,
}

impl ContractFunction {
    /// Function name in the contract ABI
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractFunction::CreateRiskAssessment => "createRiskAssessment",
            ContractFunction::CreateProposal => "createProposal",
            ContractFunction::CastVote => "castVote",
            ContractFunction::ExecuteProposal => "executeProposal",
        }
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement of a submitted contract write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub function: ContractFunction,
    pub account: String,
    pub submitted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Contract client trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContractClient: Send + Sync {
    /// Membership, reputation and voting power of `account`
    async fn member_profile(&self, account: &str) -> Result<MemberProfile>;

    /// Submit a new risk assessment on behalf of `account`
    async fn create_risk_assessment(
        &self,
        account: &str,
        request: RiskAssessmentRequest,
    ) -> Result<TxReceipt>;

    /// Open a governance proposal on behalf of `account`
    async fn create_proposal(&self, account: &str, request: ProposalRequest) -> Result<TxReceipt>;

    async fn cast_vote(&self, account: &str, request: VoteRequest) -> Result<TxReceipt>;

    async fn execute_proposal(&self, account: &str, proposal_id: u64) -> Result<TxReceipt>;

    /// Address of the governance contract this client writes to
    fn contract_address(&self) -> &str;

    /// Client name for logging
    fn client_name(&self) -> &str;
}
