pub mod analytics;
pub mod config;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod models;
pub mod state;
pub mod storage;
pub mod subscription;
pub mod types;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use filter::{FilterCriteria, FilterEngine, FilterOutcome};
pub use models::{AnalysisReport, Analyzer, ArticleAnalysis};
pub use state::{Action, DashboardState, DashboardView, View, ViewContent};
pub use storage::ArticleStorage;
pub use subscription::{subscription_tiers, Access, Feature, SubscriptionTier, TierId};
pub use types::{
    Article, BiasOrientation, FactCheckStatus, FactCheckVerdict, PoliticalBias, Significance,
    TimelineEvent,
};
