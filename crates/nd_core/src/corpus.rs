use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

use crate::types::{Article, Significance, TimelineEvent};
use crate::{Error, Result};

const ARTICLES_JSON: &str = include_str!("../data/articles.json");
const TIMELINE_JSON: &str = include_str!("../data/timeline.json");

/// Timeline entries on disk reference articles by id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRecord {
    id: String,
    date: NaiveDate,
    title: String,
    summary: String,
    article_ids: Vec<String>,
    significance: Significance,
}

/// The articles shipped with the crate.
pub fn builtin_articles() -> Result<Vec<Article>> {
    parse_articles(ARTICLES_JSON)
}

/// The timeline shipped with the crate, resolved against `articles`.
pub fn builtin_timeline(articles: &[Article]) -> Result<Vec<TimelineEvent>> {
    parse_timeline(TIMELINE_JSON, articles)
}

/// Parses and validates a JSON array of articles.
pub fn parse_articles(json: &str) -> Result<Vec<Article>> {
    let articles: Vec<Article> = serde_json::from_str(json)?;
    validate(&articles)?;
    debug!("Loaded {} articles", articles.len());
    Ok(articles)
}

pub fn parse_timeline(json: &str, articles: &[Article]) -> Result<Vec<TimelineEvent>> {
    let records: Vec<TimelineRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(|record| {
            let linked = record
                .article_ids
                .iter()
                .map(|id| {
                    articles
                        .iter()
                        .find(|a| &a.id == id)
                        .cloned()
                        .ok_or_else(|| {
                            Error::Storage(format!(
                                "timeline event {} references unknown article {}",
                                record.id, id
                            ))
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(TimelineEvent {
                id: record.id,
                date: record.date,
                title: record.title,
                summary: record.summary,
                articles: linked,
                significance: record.significance,
            })
        })
        .collect()
}

fn validate(articles: &[Article]) -> Result<()> {
    let mut seen = HashSet::new();
    for article in articles {
        if !seen.insert(article.id.as_str()) {
            return Err(Error::Storage(format!("duplicate article id: {}", article.id)));
        }
        let scores = [
            ("credibilityScore", article.credibility_score),
            ("politicalBias.confidence", article.political_bias.confidence),
            ("factCheckStatus.confidence", article.fact_check_status.confidence),
        ];
        for (field, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Storage(format!(
                    "article {}: {} out of range: {}",
                    article.id, field, value
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BiasOrientation, FactCheckVerdict};

    #[test]
    fn test_builtin_articles() {
        let articles = builtin_articles().unwrap();
        let ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(articles[2].political_bias.orientation, BiasOrientation::Center);
        assert_eq!(articles[4].fact_check_status.status, FactCheckVerdict::PartiallyVerified);
        assert_eq!(articles[0].read_time, 8);
    }

    #[test]
    fn test_builtin_timeline_links_articles() {
        let articles = builtin_articles().unwrap();
        let timeline = builtin_timeline(&articles).unwrap();
        let linked: Vec<&str> = timeline.iter().map(|e| e.articles[0].id.as_str()).collect();
        assert_eq!(linked, vec!["1", "3", "5"]);
        assert_eq!(timeline[0].significance, Significance::High);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut articles = builtin_articles().unwrap();
        articles.push(articles[0].clone());
        let json = serde_json::to_string(&articles).unwrap();
        assert!(matches!(parse_articles(&json), Err(Error::Storage(_))));
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let mut articles = builtin_articles().unwrap();
        articles[1].credibility_score = 1.5;
        let json = serde_json::to_string(&articles).unwrap();
        assert!(parse_articles(&json).is_err());
    }

    #[test]
    fn test_timeline_unknown_article() {
        let json = r#"[{"id":"x","date":"2025-01-01","title":"t","summary":"s","articleIds":["99"],"significance":"low"}]"#;
        assert!(parse_timeline(json, &[]).is_err());
    }
}
