//! Risk View
//!
//! Session state behind the risk heatmap: the current query, the reveal set
//! and the connection flag, plus the derived projection and masked cards the
//! renderer paints.

use serde::Serialize;
use std::fmt;

use crate::dataset::{RiskDataSource, RiskDataset};
use crate::error::DatasetError;
use crate::export;
use crate::models::{RiskFilter, RiskRecord, SortKey, Trend, ViewQuery};
use crate::reveal::RevealState;

pub const CATEGORY_PLACEHOLDER: &str = "████████████";
pub const RISK_LEVEL_PLACEHOLDER: &str = "████";
pub const EXPOSURE_PLACEHOLDER: &str = "██%";
pub const LAST_UPDATED_PLACEHOLDER: &str = "██ █████";

/// Filtered and ordered records for one query.
///
/// Holds borrowed records, so iterating again yields the same sequence.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    items: Vec<&'a RiskRecord>,
    source_len: usize,
}

impl<'a> Projection<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a RiskRecord> + '_ {
        self.items.iter().copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.items.iter().map(|r| r.category.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status(&self) -> ViewStatus {
        if self.source_len == 0 {
            ViewStatus::Empty
        } else if self.items.is_empty() {
            ViewStatus::NoMatches
        } else {
            ViewStatus::Showing(self.items.len())
        }
    }
}

/// Filter `records` by `query` and stable-sort them by its sort key
pub fn project<'a>(records: &'a [RiskRecord], query: &ViewQuery) -> Projection<'a> {
    let mut items: Vec<&RiskRecord> = records.iter().filter(|r| query.matches(r)).collect();
    items.sort_by(|a, b| query.sort_key.compare(a, b));
    Projection {
        items,
        source_len: records.len(),
    }
}

/// What the heatmap grid has to show for the current query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum ViewStatus {
    /// The record set itself is empty
    Empty,
    /// Records exist but none match the query
    NoMatches,
    Showing(usize),
}

/// Whether a wallet is connected for this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    Locked,
    Connected,
}

/// Result of a single reveal toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Revealed,
    Concealed,
    /// No wallet connected, state untouched
    Locked,
    /// Category is not in the record set, state untouched
    UnknownCategory,
}

/// A whole-number percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Percent(pub u8);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A card field that is either shown or replaced by placeholder glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Masked<T> {
    Visible(T),
    Hidden(&'static str),
}

impl<T> Masked<T> {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Masked::Hidden(_))
    }

    pub fn visible(&self) -> Option<&T> {
        match self {
            Masked::Visible(value) => Some(value),
            Masked::Hidden(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Masked::Visible(value) => value.fmt(f),
            Masked::Hidden(placeholder) => f.write_str(placeholder),
        }
    }
}

/// Impact/mitigation breakdown, only present on revealed cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskDetail {
    pub impact: Percent,
    pub mitigation: Percent,
    pub trend: Trend,
}

/// One heatmap card as the renderer should paint it
#[derive(Debug, Clone, Serialize)]
pub struct RiskCard<'a> {
    #[serde(skip)]
    pub record: &'a RiskRecord,
    pub is_viewable: bool,
    pub is_revealed: bool,
    /// Drawn with a lock badge because no wallet is connected
    pub locked: bool,
    pub category: Masked<&'a str>,
    pub risk_level: Masked<&'static str>,
    pub exposure: Masked<Percent>,
    pub last_updated: Masked<&'a str>,
    pub detail: Option<RiskDetail>,
}

impl<'a> RiskCard<'a> {
    fn build(record: &'a RiskRecord, connected: bool, revealed: bool) -> Self {
        let viewable = connected && revealed;
        if viewable {
            return Self {
                record,
                is_viewable: true,
                is_revealed: true,
                locked: false,
                category: Masked::Visible(record.category.as_str()),
                risk_level: Masked::Visible(record.risk_level.label()),
                exposure: Masked::Visible(Percent(record.exposure)),
                last_updated: Masked::Visible(record.last_updated.as_str()),
                detail: Some(RiskDetail {
                    impact: Percent(record.impact),
                    mitigation: Percent(record.mitigation),
                    trend: record.trend,
                }),
            };
        }

        // Before connection the labels stay readable; once connected an
        // unrevealed card hides them too.
        let (category, risk_level) = if connected {
            (
                Masked::Hidden(CATEGORY_PLACEHOLDER),
                Masked::Hidden(RISK_LEVEL_PLACEHOLDER),
            )
        } else {
            (
                Masked::Visible(record.category.as_str()),
                Masked::Visible(record.risk_level.label()),
            )
        };

        Self {
            record,
            is_viewable: false,
            is_revealed: revealed,
            locked: !connected,
            category,
            risk_level,
            exposure: Masked::Hidden(EXPOSURE_PLACEHOLDER),
            last_updated: Masked::Hidden(LAST_UPDATED_PLACEHOLDER),
            detail: None,
        }
    }
}

impl fmt::Display for RiskCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.locked {
            "[locked]"
        } else if self.is_viewable {
            "[open]"
        } else {
            "[sealed]"
        };
        write!(
            f,
            "{} {} | {} | exposure {} | {}",
            marker, self.category, self.risk_level, self.exposure, self.last_updated
        )?;
        if let Some(detail) = &self.detail {
            write!(
                f,
                " | impact {} | mitigation {} | trend {}",
                detail.impact,
                detail.mitigation,
                detail.trend.arrow()
            )?;
        }
        Ok(())
    }
}

/// Reveal counts over the visible projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealSummary {
    pub revealed_count: usize,
    pub total_visible_count: usize,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a> {
    pub access: AccessState,
    pub status: ViewStatus,
    pub query: &'a ViewQuery,
    pub cards: Vec<RiskCard<'a>>,
    pub summary: RevealSummary,
}

/// Per-session risk heatmap state
#[derive(Debug, Clone)]
pub struct RiskView {
    dataset: RiskDataset,
    query: ViewQuery,
    revealed: RevealState,
    connected: bool,
}

impl RiskView {
    /// Start a disconnected session over `dataset` with the default query
    pub fn new(dataset: RiskDataset) -> Self {
        Self {
            dataset,
            query: ViewQuery::default(),
            revealed: RevealState::new(),
            connected: false,
        }
    }

    pub fn from_source(source: &dyn RiskDataSource) -> Result<Self, DatasetError> {
        let dataset = source.load()?;
        tracing::debug!(
            "Risk view loaded {} records from {}",
            dataset.len(),
            source.source_name()
        );
        Ok(Self::new(dataset))
    }

    pub fn dataset(&self) -> &RiskDataset {
        &self.dataset
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn reveal_state(&self) -> &RevealState {
        &self.revealed
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn access(&self) -> AccessState {
        if self.connected {
            AccessState::Connected
        } else {
            AccessState::Locked
        }
    }

    /// Follow the wallet session's connection flag.
    ///
    /// The reveal set is kept; it simply stops being viewable.
    pub fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            tracing::debug!("Risk view connection changed: {}", connected);
        }
        self.connected = connected;
    }

    pub fn set_query(&mut self, query: ViewQuery) {
        tracing::debug!(
            "Risk view query: filter={} sort={} search={:?}",
            query.risk_filter.as_str(),
            query.sort_key.as_str(),
            query.search_term
        );
        self.query = query;
    }

    pub fn set_risk_filter(&mut self, risk_filter: RiskFilter) {
        self.query.risk_filter = risk_filter;
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.query.sort_key = sort_key;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    /// Current projection of the record set under the session query
    pub fn project(&self) -> Projection<'_> {
        project(self.dataset.records(), &self.query)
    }

    pub fn status(&self) -> ViewStatus {
        self.project().status()
    }

    /// Flip the reveal state of one card.
    ///
    /// Does nothing while disconnected or for an unknown category.
    pub fn toggle_reveal(&mut self, category: &str) -> ToggleOutcome {
        if !self.connected {
            tracing::debug!("Reveal of {} ignored: wallet not connected", category);
            return ToggleOutcome::Locked;
        }
        if !self.dataset.contains(category) {
            tracing::debug!("Reveal of unknown category {} ignored", category);
            return ToggleOutcome::UnknownCategory;
        }
        if self.revealed.toggle(category) {
            ToggleOutcome::Revealed
        } else {
            ToggleOutcome::Concealed
        }
    }

    /// Reveal exactly the cards of the current projection.
    ///
    /// Records hidden by the filter or search stay concealed. Returns the
    /// number of revealed cards; while disconnected nothing changes and 0 is
    /// returned.
    pub fn reveal_all(&mut self) -> usize {
        if !self.connected {
            tracing::debug!("Reveal all ignored: wallet not connected");
            return 0;
        }
        let visible: Vec<String> = self.project().categories().map(str::to_string).collect();
        self.revealed.replace(visible);
        self.revealed.len()
    }

    pub fn reveal_none(&mut self) {
        self.revealed.clear();
    }

    pub fn is_revealed(&self, category: &str) -> bool {
        self.revealed.contains(category)
    }

    pub fn is_viewable(&self, record: &RiskRecord) -> bool {
        self.connected && self.revealed.contains(&record.category)
    }

    pub fn card<'a>(&'a self, record: &'a RiskRecord) -> RiskCard<'a> {
        RiskCard::build(
            record,
            self.connected,
            self.revealed.contains(&record.category),
        )
    }

    pub fn cards(&self) -> Vec<RiskCard<'_>> {
        self.project().iter().map(|r| self.card(r)).collect()
    }

    pub fn summary(&self) -> RevealSummary {
        let projection = self.project();
        RevealSummary {
            revealed_count: projection
                .categories()
                .filter(|c| self.revealed.contains(c))
                .count(),
            total_visible_count: projection.len(),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let projection = self.project();
        let cards = projection.iter().map(|r| self.card(r)).collect();
        ViewSnapshot {
            access: self.access(),
            status: projection.status(),
            query: &self.query,
            cards,
            summary: self.summary(),
        }
    }

    /// Every viewable record, in record-set order
    ///
    /// Independent of the query: a revealed record stays viewable while the
    /// filter or search hides its card.
    pub fn viewable_records(&self) -> impl Iterator<Item = &RiskRecord> + '_ {
        self.dataset
            .records()
            .iter()
            .filter(move |r| self.is_viewable(r))
    }

    /// CSV of every viewable record, in record-set order
    pub fn export_visible(&self) -> Vec<u8> {
        export::to_csv(self.viewable_records()).into_bytes()
    }
}
