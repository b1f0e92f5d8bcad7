use axum::{
    extract::{Path, Query, State},
    Json,
};
use nd_core::analytics::{self, AnalyticsReport, Metric, Period};
use nd_core::{
    subscription_tiers, Action, AnalysisReport, Article, BiasOrientation, DashboardView, Error,
    FactCheckVerdict, Feature, FilterCriteria, SubscriptionTier, TierId, TimelineEvent,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use crate::error::ApiResult;
use crate::AppState;

/// Facet selections arrive as comma separated lists.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub bias: Option<String>,
    pub fact_check: Option<String>,
}

fn split(list: &Option<String>) -> Vec<&str> {
    list.as_deref()
        .map(|s| s.split(',').map(str::trim).filter(|v| !v.is_empty()).collect())
        .unwrap_or_default()
}

impl ArticleQuery {
    pub fn criteria(&self) -> nd_core::Result<FilterCriteria> {
        FilterCriteria::from_raw(
            self.q.as_deref().unwrap_or_default(),
            &split(&self.category),
            &split(&self.source),
            &split(&self.bias),
            &split(&self.fact_check),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleList {
    pub total: usize,
    pub articles: Vec<Article>,
    pub categories: Vec<String>,
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: Vec<String>,
    pub sources: Vec<String>,
    pub bias: Vec<BiasOrientation>,
    pub fact_check: Vec<FactCheckVerdict>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TierList {
    pub current: TierId,
    pub tiers: Vec<SubscriptionTier>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<String>,
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticleQuery>,
) -> ApiResult<Json<ArticleList>> {
    let criteria = query.criteria()?;
    if criteria.uses_advanced_filters() {
        state.session.read().await.access().require(Feature::AdvancedFilters)?;
    }
    debug!("Filtering with {:?}", criteria);
    let outcome = state.engine.apply(&criteria);
    Ok(Json(ArticleList {
        total: outcome.articles.len(),
        articles: outcome.articles.into_iter().cloned().collect(),
        categories: outcome.categories.to_vec(),
        sources: outcome.sources.to_vec(),
    }))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Article>> {
    state
        .engine
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("article {}", id)).into())
}

pub async fn get_article_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AnalysisReport>> {
    let article = state
        .engine
        .get(&id)
        .ok_or_else(|| Error::NotFound(format!("article {}", id)))?;
    let access = state.session.read().await.access();
    let report = nd_analysis::analyze_for(state.analyzer.as_ref(), &access, article).await?;
    Ok(Json(report))
}

pub async fn get_facets(State(state): State<Arc<AppState>>) -> Json<Facets> {
    Json(Facets {
        categories: state.engine.categories().to_vec(),
        sources: state.engine.sources().to_vec(),
        bias: BiasOrientation::ALL.to_vec(),
        fact_check: FactCheckVerdict::ALL.to_vec(),
    })
}

pub async fn list_tiers(State(state): State<Arc<AppState>>) -> Json<TierList> {
    Json(TierList {
        current: state.session.read().await.tier,
        tiers: subscription_tiers().to_vec(),
    })
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let session = state.session.read().await;
    Json(session.render(&state.engine, &state.timeline))
}

pub async fn post_action(
    State(state): State<Arc<AppState>>,
    Json(action): Json<Action>,
) -> Json<DashboardView> {
    let mut session = state.session.write().await;
    if let Action::SelectTier(tier) = &action {
        info!("💳 Session tier set to {}", tier);
    }
    let next = session.clone().apply(action);
    *session = next;
    Json(session.render(&state.engine, &state.timeline))
}

pub async fn get_timeline(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TimelineEvent>>> {
    state.session.read().await.access().require(Feature::Timeline)?;
    Ok(Json(state.timeline.clone()))
}

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Path(metric): Path<String>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<AnalyticsReport>> {
    state.session.read().await.access().require(Feature::Analytics)?;
    let metric: Metric = metric.parse()?;
    let period: Period = match query.period.as_deref() {
        Some(p) => p.parse()?,
        None => Period::default(),
    };
    let articles: Vec<&Article> = state.engine.articles().iter().collect();
    Ok(Json(analytics::compute(metric, period, &articles)))
}
