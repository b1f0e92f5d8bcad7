use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::types::{Article, BiasOrientation};
use crate::{Error, Result};

const TOP_TOPICS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Bias,
    Credibility,
    Topics,
    Engagement,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Bias, Metric::Credibility, Metric::Topics, Metric::Engagement];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Bias => "bias",
            Metric::Credibility => "credibility",
            Metric::Topics => "topics",
            Metric::Engagement => "engagement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Bias => "Political Bias Distribution",
            Metric::Credibility => "Source Credibility",
            Metric::Topics => "Trending Topics",
            Metric::Engagement => "Reading Patterns",
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidFilter(format!("unknown metric: {}", s)))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "24h")]
    Day,
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Quarter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "24h",
            Period::Week => "7d",
            Period::Month => "30d",
            Period::Quarter => "90d",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Period::Day => Duration::hours(24),
            Period::Week => Duration::days(7),
            Period::Month => Duration::days(30),
            Period::Quarter => Duration::days(90),
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidFilter(format!("unknown period: {}", s)))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasShare {
    pub orientation: BiasOrientation,
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityBucket {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub articles: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEngagement {
    pub category: String,
    pub articles: usize,
    pub total_read_time: u32,
    pub avg_read_time: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", content = "rows", rename_all = "lowercase")]
pub enum MetricData {
    Bias(Vec<BiasShare>),
    Credibility(Vec<CredibilityBucket>),
    Topics(Vec<TopicCount>),
    Engagement(Vec<CategoryEngagement>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub period: Period,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub articles: usize,
    pub data: MetricData,
}

/// Computes `metric` over the articles published within `period` of the
/// newest article in `articles`.
pub fn compute(metric: Metric, period: Period, articles: &[&Article]) -> AnalyticsReport {
    let window_end = articles.iter().map(|a| a.published_at).max();
    let window_start = window_end.map(|end| end - period.duration());
    let window: Vec<&Article> = match window_start {
        Some(start) => articles
            .iter()
            .copied()
            .filter(|a| a.published_at >= start)
            .collect(),
        None => Vec::new(),
    };

    let data = match metric {
        Metric::Bias => MetricData::Bias(bias_distribution(&window)),
        Metric::Credibility => MetricData::Credibility(credibility_buckets(&window)),
        Metric::Topics => MetricData::Topics(trending_topics(&window)),
        Metric::Engagement => MetricData::Engagement(engagement(&window)),
    };

    AnalyticsReport {
        period,
        window_start,
        window_end,
        articles: window.len(),
        data,
    }
}

fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

fn bias_distribution(articles: &[&Article]) -> Vec<BiasShare> {
    BiasOrientation::ALL
        .into_iter()
        .map(|orientation| {
            let count = articles
                .iter()
                .filter(|a| a.political_bias.orientation == orientation)
                .count();
            BiasShare {
                orientation,
                count,
                percent: percent(count, articles.len()),
            }
        })
        .collect()
}

fn credibility_buckets(articles: &[&Article]) -> Vec<CredibilityBucket> {
    let bounds: [(&str, f32); 5] = [
        ("90-100%", 0.9),
        ("80-89%", 0.8),
        ("70-79%", 0.7),
        ("60-69%", 0.6),
        ("below 60%", f32::NEG_INFINITY),
    ];
    let mut counts = [0usize; 5];
    for article in articles {
        if let Some(slot) = bounds
            .iter()
            .position(|(_, floor)| article.credibility_score >= *floor)
        {
            counts[slot] += 1;
        }
    }
    bounds
        .iter()
        .zip(counts)
        .map(|((range, _), count)| CredibilityBucket {
            range: range.to_string(),
            count,
        })
        .collect()
}

fn trending_topics(articles: &[&Article]) -> Vec<TopicCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        for tag in &article.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    let mut topics: Vec<TopicCount> = counts
        .into_iter()
        .map(|(topic, articles)| TopicCount {
            topic: topic.to_string(),
            articles,
        })
        .collect();
    topics.sort_by(|a, b| b.articles.cmp(&a.articles).then_with(|| a.topic.cmp(&b.topic)));
    topics.truncate(TOP_TOPICS);
    topics
}

fn engagement(articles: &[&Article]) -> Vec<CategoryEngagement> {
    let mut by_category: BTreeMap<&str, (usize, u32)> = BTreeMap::new();
    for article in articles {
        let entry = by_category.entry(article.category.as_str()).or_default();
        entry.0 += 1;
        entry.1 += article.read_time;
    }
    by_category
        .into_iter()
        .map(|(category, (count, total))| CategoryEngagement {
            category: category.to_string(),
            articles: count,
            total_read_time: total,
            avg_read_time: (total as f32 / count as f32 * 10.0).round() / 10.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::builtin_articles;

    fn corpus() -> Vec<Article> {
        builtin_articles().unwrap()
    }

    #[test]
    fn test_bias_distribution_zero_fills() {
        let articles = corpus();
        let refs: Vec<&Article> = articles.iter().collect();
        let report = compute(Metric::Bias, Period::Week, &refs);
        assert_eq!(report.articles, 5);
        match report.data {
            MetricData::Bias(rows) => {
                assert_eq!(rows.len(), 5);
                assert_eq!(rows[0].orientation, BiasOrientation::Left);
                assert_eq!(rows[0].count, 0);
                assert_eq!(rows[2].count, 2);
                assert_eq!(rows[2].percent, 40);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_day_window_anchored_at_newest() {
        let articles = corpus();
        let refs: Vec<&Article> = articles.iter().collect();
        // Newest is 2025-01-15T10:30Z; 24h back keeps articles 1, 2, 3 and 4.
        let report = compute(Metric::Credibility, Period::Day, &refs);
        assert_eq!(report.articles, 4);
        match report.data {
            MetricData::Credibility(rows) => {
                let counts: Vec<usize> = rows.iter().map(|r| r.count).collect();
                assert_eq!(counts, vec![2, 2, 0, 0, 0]);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_topics_ranked() {
        let articles = corpus();
        let refs: Vec<&Article> = articles.iter().collect();
        let report = compute(Metric::Topics, Period::Quarter, &refs);
        match report.data {
            MetricData::Topics(rows) => {
                assert_eq!(rows.len(), TOP_TOPICS);
                assert_eq!(rows[0].topic, "politics");
                assert_eq!(rows[0].articles, 3);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_engagement_per_category() {
        let articles = corpus();
        let refs: Vec<&Article> = articles.iter().collect();
        let report = compute(Metric::Engagement, Period::Quarter, &refs);
        match report.data {
            MetricData::Engagement(rows) => {
                let politics = rows.iter().find(|r| r.category == "Politics").unwrap();
                assert_eq!(politics.articles, 2);
                assert_eq!(politics.total_read_time, 10);
                assert_eq!(politics.avg_read_time, 5.0);
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let report = compute(Metric::Bias, Period::Day, &[]);
        assert_eq!(report.articles, 0);
        assert!(report.window_end.is_none());
    }

    #[test]
    fn test_parse_metric_and_period() {
        assert_eq!("Topics".parse::<Metric>().unwrap(), Metric::Topics);
        assert_eq!("30d".parse::<Period>().unwrap(), Period::Month);
        assert!("1y".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::Week);
    }
}
