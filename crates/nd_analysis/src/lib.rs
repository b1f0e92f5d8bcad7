use nd_core::{Access, AnalysisReport, Analyzer, Article, Result};

pub mod models;

pub use models::create_analyzer;

/// Runs `analyzer` and trims the result to what `access` may see.
pub async fn analyze_for(
    analyzer: &dyn Analyzer,
    access: &Access,
    article: &Article,
) -> Result<AnalysisReport> {
    let analysis = analyzer.analyze(article).await?;
    Ok(AnalysisReport::gated(access, analysis))
}

pub mod prelude {
    pub use super::analyze_for;
    pub use super::models::{create_analyzer, AnnotationAnalyzer};
    pub use nd_core::{AnalysisReport, Analyzer, ArticleAnalysis, Result, Error};
}
