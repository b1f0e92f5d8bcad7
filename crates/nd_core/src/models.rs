use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::subscription::{minimum_tier, Access, Feature, TierId};
use crate::types::{Article, FactCheckStatus, PoliticalBias};
use crate::Result;

#[async_trait]
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &str;

    /// Produce the fact-check and bias report for an article
    async fn analyze(&self, article: &Article) -> Result<ArticleAnalysis>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredibilityGrade {
    Excellent,
    Good,
    Fair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relevance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub writing_style: String,
    pub source_reliability: CredibilityGrade,
    pub emotional_tone: String,
    pub political_relevance: Relevance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAnalysis {
    pub article_id: String,
    pub title: String,
    pub source: String,
    pub author: String,
    pub fact_check: FactCheckStatus,
    pub bias: PoliticalBias,
    pub credibility_percent: u32,
    pub insights: Insights,
}

/// What a caller on a given tier is allowed to see of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "access", rename_all = "lowercase")]
pub enum AnalysisReport {
    Full(ArticleAnalysis),
    #[serde(rename_all = "camelCase")]
    Locked {
        article_id: String,
        title: String,
        source: String,
        author: String,
        required: TierId,
    },
}

impl AnalysisReport {
    pub fn gated(access: &Access, analysis: ArticleAnalysis) -> Self {
        let needed = [Feature::FactChecking, Feature::BiasAnalysis];
        match needed.into_iter().find(|f| !access.allows(*f)) {
            None => AnalysisReport::Full(analysis),
            Some(feature) => AnalysisReport::Locked {
                article_id: analysis.article_id,
                title: analysis.title,
                source: analysis.source,
                author: analysis.author,
                required: minimum_tier(feature),
            },
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, AnalysisReport::Locked { .. })
    }
}
