//! Dashboard session state and its reducer.
//!
//! `DashboardState` is a plain value. Every user interaction is an `Action`
//! and `DashboardState::apply` returns the next state. Derived data (the
//! filtered feed, bookmarks, timeline, analytics) is produced by `render`
//! from the state and the engine, never stored.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::debug;

use crate::analytics::{self, AnalyticsReport, Metric, Period};
use crate::filter::{FilterCriteria, FilterEngine};
use crate::subscription::{Access, Feature, TierId};
use crate::types::{Article, BiasOrientation, FactCheckVerdict, TimelineEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Feed,
    Timeline,
    Bookmarks,
    Analytics,
}

impl View {
    /// The capability needed to open this view, if any.
    pub fn required_feature(&self) -> Option<Feature> {
        match self {
            View::Feed | View::Bookmarks => None,
            View::Timeline => Some(Feature::Timeline),
            View::Analytics => Some(Feature::Analytics),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Action {
    SetQuery(String),
    ToggleCategory(String),
    ToggleSource(String),
    ToggleBias(BiasOrientation),
    ToggleFactCheck(FactCheckVerdict),
    ClearFilters,
    ToggleBookmark(String),
    SelectArticle(String),
    CloseArticle,
    OpenSubscription,
    CloseSubscription,
    SelectTier(TierId),
    SetView(View),
    SetMetric(Metric),
    SetPeriod(Period),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub tier: TierId,
    pub view: View,
    pub filters: FilterCriteria,
    pub bookmarks: BTreeSet<String>,
    pub selected_article: Option<String>,
    pub subscription_open: bool,
    pub metric: Metric,
    pub period: Period,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(TierId::default())
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl DashboardState {
    pub fn new(tier: TierId) -> Self {
        Self {
            tier,
            view: View::Feed,
            filters: FilterCriteria::default(),
            bookmarks: BTreeSet::new(),
            selected_article: None,
            subscription_open: false,
            metric: Metric::Bias,
            period: Period::Week,
        }
    }

    pub fn access(&self) -> Access {
        Access::for_tier(self.tier)
    }

    /// The criteria the feed is actually filtered by. Bias and fact-check
    /// selections stay recorded but only apply once the tier has advanced
    /// filters.
    pub fn active_filters(&self) -> Cow<'_, FilterCriteria> {
        if self.access().allows(Feature::AdvancedFilters) {
            return Cow::Borrowed(&self.filters);
        }
        let mut filters = self.filters.clone();
        filters.bias.clear();
        filters.fact_check.clear();
        Cow::Owned(filters)
    }

    /// Returns the state after `action`. Never fails.
    pub fn apply(mut self, action: Action) -> Self {
        debug!("Applying {:?}", action);
        match action {
            Action::SetQuery(query) => self.filters.query = query,
            Action::ToggleCategory(category) => toggle(&mut self.filters.categories, category),
            Action::ToggleSource(source) => toggle(&mut self.filters.sources, source),
            Action::ToggleBias(orientation) => toggle(&mut self.filters.bias, orientation),
            Action::ToggleFactCheck(verdict) => toggle(&mut self.filters.fact_check, verdict),
            Action::ClearFilters => self.filters = FilterCriteria::default(),
            Action::ToggleBookmark(id) => toggle(&mut self.bookmarks, id),
            Action::SelectArticle(id) => self.selected_article = Some(id),
            Action::CloseArticle => self.selected_article = None,
            Action::OpenSubscription => self.subscription_open = true,
            Action::CloseSubscription => self.subscription_open = false,
            Action::SelectTier(tier) => {
                self.tier = tier;
                self.subscription_open = false;
            }
            Action::SetView(view) => match view.required_feature() {
                Some(feature) if !self.access().allows(feature) => self.subscription_open = true,
                _ => self.view = view,
            },
            Action::SetMetric(metric) => self.metric = metric,
            Action::SetPeriod(period) => self.period = period,
        }
        self
    }

    /// Derives everything a client needs to present this state.
    pub fn render(&self, engine: &FilterEngine, timeline: &[TimelineEvent]) -> DashboardView {
        let access = self.access();
        let filters = self.active_filters();
        let feed = || -> Vec<Article> {
            engine
                .filter(&filters)
                .into_iter()
                .cloned()
                .collect()
        };

        // A downgrade can leave the session on a view the tier no longer opens.
        let view = match self.view.required_feature() {
            Some(feature) if !access.allows(feature) => View::Feed,
            _ => self.view,
        };

        let content = match view {
            View::Feed => ViewContent::Feed { articles: feed() },
            View::Bookmarks => ViewContent::Bookmarks {
                articles: feed()
                    .into_iter()
                    .filter(|a| self.bookmarks.contains(&a.id))
                    .collect(),
            },
            View::Timeline => ViewContent::Timeline {
                events: timeline.to_vec(),
            },
            View::Analytics => {
                let articles: Vec<&Article> = engine.articles().iter().collect();
                ViewContent::Analytics {
                    metric: self.metric,
                    report: analytics::compute(self.metric, self.period, &articles),
                }
            }
        };

        DashboardView {
            view,
            access,
            filters: self.filters.clone(),
            categories: engine.categories().to_vec(),
            sources: engine.sources().to_vec(),
            bookmarks: self.bookmarks.iter().cloned().collect(),
            selected_article: self
                .selected_article
                .as_deref()
                .and_then(|id| engine.get(id))
                .cloned(),
            subscription_open: self.subscription_open,
            content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewContent {
    Feed { articles: Vec<Article> },
    Bookmarks { articles: Vec<Article> },
    Timeline { events: Vec<TimelineEvent> },
    Analytics { metric: Metric, report: AnalyticsReport },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub view: View,
    pub access: Access,
    pub filters: FilterCriteria,
    pub categories: Vec<String>,
    pub sources: Vec<String>,
    pub bookmarks: Vec<String>,
    pub selected_article: Option<Article>,
    pub subscription_open: bool,
    pub content: ViewContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_involutive() {
        let state = DashboardState::default()
            .apply(Action::ToggleCategory("Politics".into()))
            .apply(Action::ToggleCategory("Politics".into()));
        assert!(state.filters.categories.is_empty());
    }

    #[test]
    fn test_select_tier_closes_dialog() {
        let state = DashboardState::new(TierId::Basic)
            .apply(Action::OpenSubscription)
            .apply(Action::SelectTier(TierId::Pro));
        assert_eq!(state.tier, TierId::Pro);
        assert!(!state.subscription_open);
        assert!(state.access().has_pro_access);
    }

    #[test]
    fn test_gated_view_opens_subscription() {
        let state = DashboardState::new(TierId::Pro).apply(Action::SetView(View::Timeline));
        assert_eq!(state.view, View::Feed);
        assert!(state.subscription_open);

        let state = state
            .apply(Action::SelectTier(TierId::Enterprise))
            .apply(Action::SetView(View::Timeline));
        assert_eq!(state.view, View::Timeline);
    }

    #[test]
    fn test_active_filters_drop_advanced_facets_below_pro() {
        let state = DashboardState::new(TierId::Basic)
            .apply(Action::SetQuery("reform".into()))
            .apply(Action::ToggleBias(BiasOrientation::Right))
            .apply(Action::ToggleFactCheck(FactCheckVerdict::Disputed));
        let active = state.active_filters();
        assert_eq!(active.query, "reform");
        assert!(active.bias.is_empty());
        assert!(active.fact_check.is_empty());
        assert!(!state.filters.bias.is_empty());

        let state = state.apply(Action::SelectTier(TierId::Pro));
        assert!(matches!(state.active_filters(), Cow::Borrowed(_)));
        assert!(state.active_filters().bias.contains(&BiasOrientation::Right));
    }

    #[test]
    fn test_clear_filters_keeps_bookmarks() {
        let state = DashboardState::default()
            .apply(Action::ToggleBookmark("2".into()))
            .apply(Action::SetQuery("earnings".into()))
            .apply(Action::ToggleBias(BiasOrientation::CenterRight))
            .apply(Action::ClearFilters);
        assert!(state.filters.is_unconstrained());
        assert!(state.bookmarks.contains("2"));
    }
}
