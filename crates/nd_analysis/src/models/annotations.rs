use nd_core::models::{ArticleAnalysis, CredibilityGrade, Insights, Relevance};
use nd_core::{Analyzer, Article, BiasOrientation, FactCheckVerdict, Result};

/// Builds reports from the annotations carried by each article.
///
/// No text is inspected: the verdict, bias and credibility come from the
/// corpus, and the insight lines are fixed mappings of those values.
#[derive(Debug, Default)]
pub struct AnnotationAnalyzer;

impl AnnotationAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

pub fn credibility_grade(score: f32) -> CredibilityGrade {
    if score >= 0.9 {
        CredibilityGrade::Excellent
    } else if score >= 0.8 {
        CredibilityGrade::Good
    } else {
        CredibilityGrade::Fair
    }
}

pub fn writing_style(orientation: BiasOrientation) -> &'static str {
    if orientation == BiasOrientation::Center {
        "Objective, factual"
    } else if orientation.leans_left() {
        "Analytical, critical"
    } else {
        "Supportive, descriptive"
    }
}

pub fn emotional_tone(verdict: FactCheckVerdict) -> &'static str {
    match verdict {
        FactCheckVerdict::Verified => "Neutral, informative",
        _ => "Cautious, questioning",
    }
}

pub fn political_relevance(category: &str) -> Relevance {
    match category {
        "Politics" => Relevance::High,
        "Environment" => Relevance::Medium,
        _ => Relevance::Low,
    }
}

#[async_trait::async_trait]
impl Analyzer for AnnotationAnalyzer {
    fn name(&self) -> &str {
        "annotations"
    }

    async fn analyze(&self, article: &Article) -> Result<ArticleAnalysis> {
        Ok(ArticleAnalysis {
            article_id: article.id.clone(),
            title: article.title.clone(),
            source: article.source.clone(),
            author: article.author.clone(),
            fact_check: article.fact_check_status.clone(),
            bias: article.political_bias.clone(),
            credibility_percent: (article.credibility_score * 100.0).round() as u32,
            insights: Insights {
                writing_style: writing_style(article.political_bias.orientation).to_string(),
                source_reliability: credibility_grade(article.credibility_score),
                emotional_tone: emotional_tone(article.fact_check_status.status).to_string(),
                political_relevance: political_relevance(&article.category),
            },
        })
    }
}
