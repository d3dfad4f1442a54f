//! The per-page session a content script drives
//!
//! A session is built once per page load. `run_analysis` runs both phases;
//! a settings change afterwards only reruns the filter phase so existing
//! marks are kept.

use crate::config::ToolsConfig;
use crate::extractor::{extract_page, trading_data};
use crate::highlighter::{
    apply_filters, apply_matches, clear_filters, page_style, CardAnnotation, CardBoard, FilterOutcome, MatchOutcome, PageStyle,
};
use crate::matcher::find_trades;
use crate::messaging::{ExtensionMessage, MessageResponse, ScrapeResponse};
use crate::models::{
    DisplaySettings, OpportunityCounts, PageSnapshot, ProfileIdentity, ProfileSnapshot, TradingData,
    TradingOpportunity,
};
use crate::parser::ProfilePage;
use crate::status::{check_setup_status, BadgeState, SetupStatus};
use crate::storage::StoredState;
use crate::utils::is_tracker_url;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// What one analysis did to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub badge: BadgeState,
    pub own_profile: bool,
    pub counts: OpportunityCounts,
    pub matches: MatchOutcome,
    pub filters: FilterOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<SetupStatus>,
}

#[derive(Debug, Clone)]
pub struct ContentSession {
    config: ToolsConfig,
    url: Option<String>,
    board: CardBoard,
    snapshot: PageSnapshot,
    trading_data: Option<TradingData>,
    settings: DisplaySettings,
    opportunities: TradingOpportunity,
    own_profile: bool,
    /// Decided once per analysis from the badge
    filters_active: bool,
    badge: BadgeState,
}

impl ContentSession {
    pub fn new(html: &str, url: Option<&str>, config: ToolsConfig) -> Self {
        let page = ProfilePage::parse(html, url);
        let snapshot = extract_page(&page);
        let trading_data = trading_data(&page);
        let board = CardBoard::from_page(&page);

        debug!(cards = board.len(), url = url.unwrap_or("-"), "content session created");

        Self {
            config,
            url: url.map(str::to_string),
            board,
            snapshot,
            trading_data,
            settings: DisplaySettings::default(),
            opportunities: TradingOpportunity::default(),
            own_profile: false,
            filters_active: false,
            badge: BadgeState::None,
        }
    }

    /// A page without a URL is assumed to come from the tracker
    pub fn is_tracker_page(&self) -> bool {
        self.url
            .as_deref()
            .map_or(true, |url| is_tracker_url(url, &self.config.tracker_base_url))
    }

    pub fn snapshot(&self) -> &PageSnapshot {
        &self.snapshot
    }

    pub fn board(&self) -> &CardBoard {
        &self.board
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn opportunities(&self) -> &TradingOpportunity {
        &self.opportunities
    }

    pub fn badge(&self) -> BadgeState {
        self.badge
    }

    pub fn is_own_profile(&self) -> bool {
        self.own_profile
    }

    pub fn run_analysis(&mut self, stored: &StoredState, now: DateTime<Utc>) -> AnalysisSummary {
        self.settings = stored.trading_settings.clone();
        self.opportunities = TradingOpportunity::default();
        self.own_profile = false;

        let (badge, setup) = self.decide(stored, now);
        self.badge = badge;
        self.filters_active = badge.filters_apply();

        let matches = apply_matches(self.board.cards_mut(), &self.opportunities);
        let filters = self.refresh_filters();

        let counts = self.opportunities.counts();
        info!(
            badge = %self.badge,
            they_have = counts.cards_they_have_that_i_want,
            you_have = counts.cards_i_have_that_they_want,
            "analysis complete"
        );

        self.summary(matches, filters, setup)
    }

    /// Filter phase only; marks from the last analysis stay as they are.
    pub fn update_settings(&mut self, settings: DisplaySettings) -> FilterOutcome {
        self.settings = settings;
        self.refresh_filters()
    }

    pub fn handle_message(&mut self, message: ExtensionMessage) -> MessageResponse {
        debug!(action = message.action(), "message received");
        match message {
            ExtensionMessage::GetTradingData => MessageResponse::TradingData(self.trading_data.clone()),
            ExtensionMessage::Scrape => MessageResponse::Scrape(self.scrape()),
            ExtensionMessage::UpdateTradingSettings { settings } => {
                self.update_settings(settings);
                MessageResponse::Ack { success: true }
            }
            ExtensionMessage::GetBadgeState => MessageResponse::Badge { state: self.badge },
            ExtensionMessage::UpdateBadge { state } => {
                self.badge = state;
                MessageResponse::Ack { success: true }
            }
        }
    }

    /// The collection on this page, for storing as the user's own
    pub fn scrape(&self) -> ScrapeResponse {
        let collection = self
            .snapshot
            .viewed
            .as_ref()
            .or(self.snapshot.viewer.as_ref())
            .map(|snapshot| snapshot.collection.clone());

        match collection {
            Some(collection) => ScrapeResponse {
                collection: Some(collection),
                error: None,
            },
            None => ScrapeResponse {
                collection: None,
                error: Some("No collection data found on this page".to_string()),
            },
        }
    }

    pub fn annotations(&self) -> Vec<CardAnnotation> {
        self.board.annotations()
    }

    pub fn page_style(&self) -> PageStyle {
        page_style(&self.settings)
    }

    /// Badge for this page, computing opportunities when there is someone
    /// to trade with. Setup status is returned only when it needs attention.
    fn decide(&mut self, stored: &StoredState, now: DateTime<Utc>) -> (BadgeState, Option<SetupStatus>) {
        if !self.is_tracker_page() {
            return (BadgeState::None, None);
        }
        let Some(viewed) = self.snapshot.viewed.clone() else {
            return (BadgeState::Gray, None);
        };

        let stored_identity = stored_identity(stored);
        self.own_profile = self.snapshot.is_own_profile(&stored_identity);
        if self.own_profile {
            return (BadgeState::Gray, None);
        }

        let setup = check_setup_status(
            stored.profile_url.as_deref(),
            stored.collection.as_ref(),
            now,
            self.config.stale_after_hours,
        );
        let Some(mine) = self.my_snapshot(stored, &stored_identity) else {
            return (BadgeState::Yellow, Some(setup));
        };

        self.opportunities = find_trades(&mine, Some(&viewed));

        let badge = if self.snapshot.viewer.is_none() && setup.needs_attention {
            BadgeState::Yellow
        } else {
            BadgeState::Green
        };
        (badge, setup.needs_attention.then_some(setup))
    }

    fn refresh_filters(&mut self) -> FilterOutcome {
        if self.filters_active {
            apply_filters(self.board.cards_mut(), &self.settings, self.own_profile)
        } else {
            clear_filters(self.board.cards_mut())
        }
    }

    /// The logged-in user's side: embedded in the page when available,
    /// otherwise whatever was stored on an earlier scrape.
    fn my_snapshot(&self, stored: &StoredState, stored_identity: &ProfileIdentity) -> Option<ProfileSnapshot> {
        let identity = self.snapshot.viewer_identity(stored_identity);
        let collection = match &self.snapshot.viewer {
            Some(viewer) => viewer.collection.clone(),
            None => stored.collection.clone()?,
        };
        Some(ProfileSnapshot { identity, collection })
    }

    fn summary(&self, matches: MatchOutcome, filters: FilterOutcome, setup: Option<SetupStatus>) -> AnalysisSummary {
        AnalysisSummary {
            badge: self.badge,
            own_profile: self.own_profile,
            counts: self.opportunities.counts(),
            matches,
            filters,
            setup,
        }
    }
}

fn stored_identity(stored: &StoredState) -> ProfileIdentity {
    match &stored.profile_url {
        Some(url) => ProfileIdentity::from_url(url.clone()),
        None => ProfileIdentity::default(),
    }
}
