use std::sync::Arc;
use nd_core::{Analyzer, ArticleStorage, DashboardState, FilterEngine, Result, TierId, TimelineEvent};
use tokio::sync::RwLock;
use tracing::info;

/// Shared server state: the indexed corpus plus the one dashboard session.
pub struct AppState {
    pub engine: FilterEngine,
    pub timeline: Vec<TimelineEvent>,
    pub analyzer: Arc<dyn Analyzer>,
    pub session: RwLock<DashboardState>,
}

impl AppState {
    pub async fn load(
        storage: &dyn ArticleStorage,
        analyzer: Arc<dyn Analyzer>,
        tier: TierId,
    ) -> Result<Self> {
        let engine = FilterEngine::new(storage.articles().await?);
        let timeline = storage.timeline().await?;
        info!(
            "📰 Serving {} articles, {} timeline events, session tier {}",
            engine.articles().len(),
            timeline.len(),
            tier
        );
        Ok(Self {
            engine,
            timeline,
            analyzer,
            session: RwLock::new(DashboardState::new(tier)),
        })
    }
}
