use anyhow::{bail, Context, Result};
use contract_client::{is_valid_address, ZERO_ADDRESS};
use risk_view::{RiskFilter, SortKey, ViewQuery, EXPORT_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    // Governance contract
    pub contract_address: String,

    // Wallet session
    pub wallet_address: Option<String>, // connected on start when set
    pub dao_member: bool,               // membership granted by the mock contract

    // Risk data
    pub risk_data_path: Option<PathBuf>, // JSON records, seed data otherwise

    // Initial view query
    pub risk_filter: RiskFilter,
    pub sort_key: SortKey,
    pub search_term: String,
    pub reveal_all: bool,

    // Export
    pub export_path: PathBuf,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in
    /// production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            contract_address: lookup("CONTRACT_ADDRESS")
                .unwrap_or_else(|| ZERO_ADDRESS.to_string()),

            wallet_address: lookup("WALLET_ADDRESS"),
            dao_member: lookup("DAO_MEMBER")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .context("DAO_MEMBER must be true or false")?,

            risk_data_path: lookup("RISK_DATA_PATH").map(PathBuf::from),

            risk_filter: lookup("RISK_FILTER")
                .unwrap_or_else(|| "all".to_string())
                .parse()?,
            sort_key: lookup("RISK_SORT")
                .unwrap_or_else(|| "exposure".to_string())
                .parse()?,
            search_term: lookup("RISK_SEARCH").unwrap_or_default(),
            reveal_all: lookup("REVEAL_ALL")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .context("REVEAL_ALL must be true or false")?,

            export_path: lookup("EXPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME)),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_address(&self.contract_address) {
            bail!(
                "CONTRACT_ADDRESS must be 0x followed by 40 hex digits, got {}",
                self.contract_address
            );
        }
        if let Some(wallet) = &self.wallet_address {
            if wallet.trim().is_empty() {
                bail!("WALLET_ADDRESS is set but empty");
            }
        }
        if self.export_path.as_os_str().is_empty() {
            bail!("EXPORT_PATH must not be empty");
        }
        Ok(())
    }

    pub fn initial_query(&self) -> ViewQuery {
        ViewQuery::new(self.risk_filter, self.sort_key, self.search_term.clone())
    }
}
