//! Risk Overview
//!
//! Headline tiles shown above the heatmap: total risk score, active
//! exposures and mitigation rate, derived from the full record set, each
//! with a short trend note.

use serde::Serialize;

use crate::models::{RiskLevel, RiskRecord, Trend};
use crate::view::Masked;

pub const SCORE_PLACEHOLDER: &str = "█████";
pub const COUNT_PLACEHOLDER: &str = "█";
pub const RATE_PLACEHOLDER: &str = "████";

/// Aggregate figures over a record set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct RiskOverview {
    /// Mean exposure, 0 to 100, one decimal
    pub total_risk_score: f64,
    pub active_exposures: usize,
    /// High-risk records still trending up
    pub requiring_attention: usize,
    /// Mean mitigation, 0 to 100, one decimal
    pub mitigation_rate: f64,
    pub trending_up: usize,
    pub trending_down: usize,
}

impl RiskOverview {
    pub fn from_records(records: &[RiskRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let count = records.len() as f64;
        let mean = |metric: fn(&RiskRecord) -> u8| {
            let total: f64 = records.iter().map(|r| f64::from(metric(r))).sum();
            round1(total / count)
        };

        Self {
            total_risk_score: mean(|r| r.exposure),
            active_exposures: records.len(),
            requiring_attention: records
                .iter()
                .filter(|r| r.risk_level == RiskLevel::High && r.trend == Trend::Up)
                .count(),
            mitigation_rate: mean(|r| r.mitigation),
            trending_up: records.iter().filter(|r| r.trend == Trend::Up).count(),
            trending_down: records.iter().filter(|r| r.trend == Trend::Down).count(),
        }
    }

    /// Tiles as displayed: hidden behind placeholders until connected
    pub fn tiles(&self, connected: bool) -> OverviewTiles {
        if !connected {
            return OverviewTiles {
                total_risk_score: Masked::Hidden(SCORE_PLACEHOLDER),
                active_exposures: Masked::Hidden(COUNT_PLACEHOLDER),
                mitigation_rate: Masked::Hidden(RATE_PLACEHOLDER),
                attention_note: Masked::Hidden("Encrypted"),
                risk_score_note: Masked::Hidden("Encrypted"),
                mitigation_note: Masked::Hidden("Encrypted"),
            };
        }
        OverviewTiles {
            total_risk_score: Masked::Visible(format!("{:.1}%", self.total_risk_score)),
            active_exposures: Masked::Visible(self.active_exposures.to_string()),
            mitigation_rate: Masked::Visible(format!("{:.0}%", self.mitigation_rate)),
            attention_note: Masked::Visible(format!(
                "{} require immediate attention",
                self.requiring_attention
            )),
            risk_score_note: Masked::Visible(format!(
                "{} of {} exposures trending up",
                self.trending_up, self.active_exposures
            )),
            mitigation_note: Masked::Visible(self.mitigation_trend().to_string()),
        }
    }

    /// Direction of governance response, read from the record trends
    pub fn mitigation_trend(&self) -> &'static str {
        match self.trending_down.cmp(&self.trending_up) {
            std::cmp::Ordering::Greater => "Improving governance response",
            std::cmp::Ordering::Less => "Governance response lagging",
            std::cmp::Ordering::Equal => "Governance response holding",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewTiles {
    pub total_risk_score: Masked<String>,
    pub active_exposures: Masked<String>,
    pub mitigation_rate: Masked<String>,
    pub attention_note: Masked<String>,
    pub risk_score_note: Masked<String>,
    pub mitigation_note: Masked<String>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
