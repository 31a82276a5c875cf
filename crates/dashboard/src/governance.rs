//! Governance Desk
//!
//! Form state and submission of risk assessments, proposals and votes to the
//! governance contract. One request may be in flight at a time; a failed
//! request keeps its form for a retry, a successful one clears it.

use contract_client::{
    ContractClient, ContractFunction, MemberProfile, ProposalRequest, RiskAssessmentRequest,
    TxReceipt, VoteRequest,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::SubmissionError;

/// Default voting period offered by the proposal form
pub const DEFAULT_PROPOSAL_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskAssessmentForm {
    pub risk_type: String,
    pub description: String,
    pub risk_score: i64,
    pub confidence_level: i64,
}

impl RiskAssessmentForm {
    pub fn to_request(&self) -> Result<RiskAssessmentRequest, SubmissionError> {
        Ok(RiskAssessmentRequest {
            risk_type: required("risk type", &self.risk_type)?,
            description: required("description", &self.description)?,
            risk_score: percentage("risk score", self.risk_score)?,
            confidence_level: percentage("confidence level", self.confidence_level)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalForm {
    pub title: String,
    pub description: String,
    pub duration_days: i64,
}

impl Default for ProposalForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration_days: DEFAULT_PROPOSAL_DAYS,
        }
    }
}

impl ProposalForm {
    pub fn to_request(&self) -> Result<ProposalRequest, SubmissionError> {
        let days = u32::try_from(self.duration_days)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| {
                SubmissionError::InvalidInput(format!(
                    "duration must be at least one day, got {}",
                    self.duration_days
                ))
            })?;
        Ok(ProposalRequest::from_days(
            required("title", &self.title)?,
            required("description", &self.description)?,
            days,
        ))
    }
}

fn required(field: &str, value: &str) -> Result<String, SubmissionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SubmissionError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn percentage(field: &str, value: i64) -> Result<u8, SubmissionError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| {
            SubmissionError::InvalidInput(format!(
                "{} must be between 0 and 100, got {}",
                field, value
            ))
        })
}

/// Clears the in-flight flag when the request finishes, whatever the outcome
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct GovernanceDesk {
    client: Arc<dyn ContractClient>,
    profile: Mutex<Option<MemberProfile>>,
    risk_form: Mutex<RiskAssessmentForm>,
    proposal_form: Mutex<ProposalForm>,
    pending: AtomicBool,
}

impl GovernanceDesk {
    pub fn new(client: Arc<dyn ContractClient>) -> Self {
        Self {
            client,
            profile: Mutex::new(None),
            risk_form: Mutex::new(RiskAssessmentForm::default()),
            proposal_form: Mutex::new(ProposalForm::default()),
            pending: AtomicBool::new(false),
        }
    }

    /// Whether a submission is awaiting the contract
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Re-read membership, reputation and voting power for `account`.
    ///
    /// Any profile held for a previous account is dropped first, so a failed
    /// lookup leaves the desk without member rights.
    pub async fn refresh_membership(
        &self,
        account: &str,
    ) -> Result<MemberProfile, SubmissionError> {
        self.clear_profile().await;
        let profile = self
            .client
            .member_profile(account)
            .await
            .map_err(|e| {
                tracing::warn!("Membership lookup for {} failed: {:#}", account, e);
                SubmissionError::SubmissionFailed {
                    operation: "memberProfile",
                    detail: format!("{:#}", e),
                }
            })?;
        tracing::info!(
            "Membership for {}: member={} reputation={} voting_power={}",
            account,
            profile.is_member,
            profile.reputation,
            profile.voting_power
        );
        *self.profile.lock().await = Some(profile.clone());
        Ok(profile)
    }

    /// Profile loaded for `account`, if the last lookup was for it
    pub async fn profile(&self, account: &str) -> Option<MemberProfile> {
        self.profile
            .lock()
            .await
            .as_ref()
            .filter(|p| p.account == account)
            .cloned()
    }

    pub async fn clear_profile(&self) {
        *self.profile.lock().await = None;
    }

    pub async fn is_member(&self, account: &str) -> bool {
        self.profile(account)
            .await
            .map(|p| p.is_member)
            .unwrap_or(false)
    }

    pub async fn risk_form(&self) -> RiskAssessmentForm {
        self.risk_form.lock().await.clone()
    }

    pub async fn set_risk_form(&self, form: RiskAssessmentForm) {
        *self.risk_form.lock().await = form;
    }

    pub async fn proposal_form(&self) -> ProposalForm {
        self.proposal_form.lock().await.clone()
    }

    pub async fn set_proposal_form(&self, form: ProposalForm) {
        *self.proposal_form.lock().await = form;
    }

    /// Submit the risk assessment form for `account`
    pub async fn submit_risk_assessment(
        &self,
        account: Option<&str>,
    ) -> Result<TxReceipt, SubmissionError> {
        let account = self.authorize(account).await?;
        let request = self.risk_form.lock().await.to_request()?;
        let _pending = self.begin()?;

        let result = self.client.create_risk_assessment(account, request).await;
        let receipt = self.finish(ContractFunction::CreateRiskAssessment, account, result)?;
        *self.risk_form.lock().await = RiskAssessmentForm::default();
        Ok(receipt)
    }

    /// Submit the proposal form for `account`; days become seconds here
    pub async fn submit_proposal(
        &self,
        account: Option<&str>,
    ) -> Result<TxReceipt, SubmissionError> {
        let account = self.authorize(account).await?;
        let request = self.proposal_form.lock().await.to_request()?;
        let _pending = self.begin()?;

        let result = self.client.create_proposal(account, request).await;
        let receipt = self.finish(ContractFunction::CreateProposal, account, result)?;
        *self.proposal_form.lock().await = ProposalForm::default();
        Ok(receipt)
    }

    pub async fn cast_vote(
        &self,
        account: Option<&str>,
        request: VoteRequest,
    ) -> Result<TxReceipt, SubmissionError> {
        let account = self.authorize(account).await?;
        if request.weight == 0 {
            return Err(SubmissionError::InvalidInput(
                "vote weight must be positive".to_string(),
            ));
        }
        let _pending = self.begin()?;

        let result = self.client.cast_vote(account, request).await;
        self.finish(ContractFunction::CastVote, account, result)
    }

    pub async fn execute_proposal(
        &self,
        account: Option<&str>,
        proposal_id: u64,
    ) -> Result<TxReceipt, SubmissionError> {
        let account = self.authorize(account).await?;
        let _pending = self.begin()?;

        let result = self.client.execute_proposal(account, proposal_id).await;
        self.finish(ContractFunction::ExecuteProposal, account, result)
    }

    async fn authorize<'a>(&self, account: Option<&'a str>) -> Result<&'a str, SubmissionError> {
        let account = account.ok_or(SubmissionError::NotConnected)?;
        if !self.is_member(account).await {
            tracing::warn!("Submission rejected: {} is not an active member", account);
            return Err(SubmissionError::NotMember(account.to_string()));
        }
        Ok(account)
    }

    fn begin(&self) -> Result<PendingGuard<'_>, SubmissionError> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmissionError::Busy);
        }
        Ok(PendingGuard(&self.pending))
    }

    fn finish(
        &self,
        function: ContractFunction,
        account: &str,
        result: anyhow::Result<TxReceipt>,
    ) -> Result<TxReceipt, SubmissionError> {
        match result {
            Ok(receipt) => {
                tracing::info!("{} submitted by {}: {}", function, account, receipt.tx_hash);
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("{} failed for {}: {:#}", function, account, e);
                Err(SubmissionError::SubmissionFailed {
                    operation: function.as_str(),
                    detail: format!("{:#}", e),
                })
            }
        }
    }
}
