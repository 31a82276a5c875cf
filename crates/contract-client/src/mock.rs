//! In-memory governance contract.
//!
//! Records every write, answers membership queries from a local table and can
//! be scripted to fail, so callers can exercise both outcomes deterministically.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::{
    ContractClient, ContractFunction, MemberProfile, ProposalRequest, RiskAssessmentRequest,
    TxReceipt, VoteRequest, ZERO_ADDRESS,
};

/// A write the mock has accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    RiskAssessment {
        account: String,
        request: RiskAssessmentRequest,
    },
    Proposal {
        account: String,
        request: ProposalRequest,
    },
    Vote {
        account: String,
        request: VoteRequest,
    },
    Execute {
        account: String,
        proposal_id: u64,
    },
}

#[derive(Default)]
struct MockState {
    members: HashMap<String, MemberProfile>,
    calls: Vec<ContractCall>,
    failures: VecDeque<String>,
    lookup_failures: VecDeque<String>,
    nonce: u64,
}

pub struct MockContractClient {
    address: String,
    latency: Option<Duration>,
    state: Mutex<MockState>,
}

impl Default for MockContractClient {
    fn default() -> Self {
        Self::new(ZERO_ADDRESS)
    }
}

impl MockContractClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            latency: None,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Delay every write by `latency`, to keep a request in flight
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Register `account` as an active DAO member
    pub async fn add_member(&self, account: &str, reputation: u32, voting_power: u64) {
        let mut state = self.state.lock().await;
        state.members.insert(
            account.to_string(),
            MemberProfile {
                account: account.to_string(),
                is_member: true,
                reputation,
                voting_power,
            },
        );
    }

    /// Make the next write fail with `reason`
    pub async fn fail_next(&self, reason: impl Into<String>) {
        self.state.lock().await.failures.push_back(reason.into());
    }

    /// Make the next membership lookup fail with `reason`
    pub async fn fail_next_lookup(&self, reason: impl Into<String>) {
        self.state.lock().await.lookup_failures.push_back(reason.into());
    }

    /// Every accepted write, oldest first
    pub async fn calls(&self) -> Vec<ContractCall> {
        self.state.lock().await.calls.clone()
    }

    async fn submit(
        &self,
        account: &str,
        function: ContractFunction,
        call: ContractCall,
    ) -> Result<TxReceipt> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.state.lock().await;
        if let Some(reason) = state.failures.pop_front() {
            return Err(anyhow!("{} reverted: {}", function, reason));
        }
        let is_member = state
            .members
            .get(account)
            .map(|m| m.is_member)
            .unwrap_or(false);
        if !is_member {
            return Err(anyhow!("{} reverted: {} is not an active member", function, account));
        }

        state.nonce += 1;
        let tx_hash = format!("0x{:064x}", state.nonce);
        state.calls.push(call);
        tracing::debug!("Mock contract accepted {} from {} ({})", function, account, tx_hash);

        Ok(TxReceipt {
            tx_hash,
            function,
            account: account.to_string(),
            submitted_at: Utc::now(),
        })
    }
}

#[async_trait]
impl ContractClient for MockContractClient {
    async fn member_profile(&self, account: &str) -> Result<MemberProfile> {
        let mut state = self.state.lock().await;
        if let Some(reason) = state.lookup_failures.pop_front() {
            return Err(anyhow!("memberProfile failed: {}", reason));
        }
        Ok(state.members.get(account).cloned().unwrap_or_else(|| MemberProfile {
            account: account.to_string(),
            ..MemberProfile::default()
        }))
    }

    async fn create_risk_assessment(
        &self,
        account: &str,
        request: RiskAssessmentRequest,
    ) -> Result<TxReceipt> {
        let call = ContractCall::RiskAssessment {
            account: account.to_string(),
            request,
        };
        self.submit(account, ContractFunction::CreateRiskAssessment, call)
            .await
    }

    async fn create_proposal(&self, account: &str, request: ProposalRequest) -> Result<TxReceipt> {
        let call = ContractCall::Proposal {
            account: account.to_string(),
            request,
        };
        self.submit(account, ContractFunction::CreateProposal, call).await
    }

    async fn cast_vote(&self, account: &str, request: VoteRequest) -> Result<TxReceipt> {
        let call = ContractCall::Vote {
            account: account.to_string(),
            request,
        };
        self.submit(account, ContractFunction::CastVote, call).await
    }

    async fn execute_proposal(&self, account: &str, proposal_id: u64) -> Result<TxReceipt> {
        let call = ContractCall::Execute {
            account: account.to_string(),
            proposal_id,
        };
        self.submit(account, ContractFunction::ExecuteProposal, call)
            .await
    }

    fn contract_address(&self) -> &str {
        &self.address
    }

    fn client_name(&self) -> &str {
        "mock"
    }
}
