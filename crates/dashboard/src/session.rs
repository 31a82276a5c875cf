use contract_client::{ContractClient, MemberProfile, TxReceipt, VoteRequest};
use risk_view::{RiskDataset, RiskOverview, RiskView};
use std::sync::Arc;

use crate::error::SubmissionError;
use crate::governance::GovernanceDesk;
use crate::wallet::WalletSession;

/// One mounted dashboard: wallet, risk view and governance desk.
///
/// The risk view follows the wallet's connection flag. Submissions never
/// touch the view's query or reveal state.
pub struct DashboardSession {
    wallet: WalletSession,
    view: RiskView,
    desk: GovernanceDesk,
}

impl DashboardSession {
    pub fn new(dataset: RiskDataset, client: Arc<dyn ContractClient>) -> Self {
        Self {
            wallet: WalletSession::new(),
            view: RiskView::new(dataset),
            desk: GovernanceDesk::new(client),
        }
    }

    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    pub fn view(&self) -> &RiskView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut RiskView {
        &mut self.view
    }

    pub fn desk(&self) -> &GovernanceDesk {
        &self.desk
    }

    pub fn overview(&self) -> RiskOverview {
        RiskOverview::from_records(self.view.dataset().records())
    }

    /// Connect `account` and load its DAO membership.
    ///
    /// A membership lookup failure leaves the wallet connected without
    /// member rights; the error is returned for display.
    pub async fn connect(&mut self, account: &str) -> Result<MemberProfile, SubmissionError> {
        if !self.wallet.connect(account) {
            return Err(SubmissionError::NotConnected);
        }
        self.view.set_connected(true);
        self.desk.refresh_membership(account.trim()).await
    }

    /// Membership of the connected account, if one has been loaded
    pub async fn member_profile(&self) -> Option<MemberProfile> {
        match self.wallet.account() {
            Some(account) => self.desk.profile(account).await,
            None => None,
        }
    }

    pub async fn is_member(&self) -> bool {
        match self.wallet.account() {
            Some(account) => self.desk.is_member(account).await,
            None => false,
        }
    }

    /// End the session: reveals are dropped along with the account
    pub async fn disconnect(&mut self) {
        self.wallet.disconnect();
        self.view.set_connected(false);
        self.view.reveal_none();
        self.desk.clear_profile().await;
    }

    pub async fn submit_risk_assessment(&self) -> Result<TxReceipt, SubmissionError> {
        self.desk.submit_risk_assessment(self.wallet.account()).await
    }

    pub async fn submit_proposal(&self) -> Result<TxReceipt, SubmissionError> {
        self.desk.submit_proposal(self.wallet.account()).await
    }

    pub async fn cast_vote(&self, request: VoteRequest) -> Result<TxReceipt, SubmissionError> {
        self.desk.cast_vote(self.wallet.account(), request).await
    }

    pub async fn execute_proposal(&self, proposal_id: u64) -> Result<TxReceipt, SubmissionError> {
        self.desk
            .execute_proposal(self.wallet.account(), proposal_id)
            .await
    }
}
