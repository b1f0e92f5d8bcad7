use nd_core::analytics::{AnalyticsReport, MetricData};
use nd_core::{AnalysisReport, Article, Result, SubscriptionTier, TierId, TimelineEvent};
use serde::Serialize;
use std::fmt::Write;

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn article_line(article: &Article) -> String {
    format!(
        "[{}] {} | {} ({}, {}, {})",
        article.id,
        article.title,
        article.source,
        article.category,
        article.political_bias.orientation,
        article.fact_check_status.status,
    )
}

pub fn articles(articles: &[&Article]) -> String {
    if articles.is_empty() {
        return "No articles match.".to_string();
    }
    let mut out = String::new();
    for article in articles {
        let _ = writeln!(out, "{}", article_line(article));
    }
    let _ = write!(out, "{} article(s)", articles.len());
    out
}

pub fn facets(categories: &[String], sources: &[String]) -> String {
    format!(
        "Categories: {}\nSources: {}",
        categories.join(", "),
        sources.join(", ")
    )
}

pub fn tiers(tiers: &[SubscriptionTier], current: TierId) -> String {
    let mut out = String::new();
    for tier in tiers {
        let marker = if tier.id == current { "*" } else { " " };
        let limit = match tier.daily_limit() {
            Some(n) => format!("{} articles/day", n),
            None => "unlimited".to_string(),
        };
        let _ = writeln!(out, "{} {} (${:.2}, {})", marker, tier.name, tier.price, limit);
        for feature in &tier.features {
            let _ = writeln!(out, "    - {}", feature);
        }
    }
    out.trim_end().to_string()
}

pub fn analysis(report: &AnalysisReport) -> String {
    match report {
        AnalysisReport::Full(a) => {
            let mut out = format!("{}\n{} | By {}\n", a.title, a.source, a.author);
            let _ = writeln!(
                out,
                "Fact check: {} ({:.0}% confidence)\n  {}",
                a.fact_check.status.label(),
                a.fact_check.confidence * 100.0,
                a.fact_check.summary
            );
            for source in &a.fact_check.sources {
                let _ = writeln!(out, "  - {}", source);
            }
            let _ = writeln!(
                out,
                "Bias: {} ({:.0}% confidence)\n  {}",
                a.bias.orientation.label(),
                a.bias.confidence * 100.0,
                a.bias.reasoning
            );
            let _ = writeln!(out, "Credibility: {}%", a.credibility_percent);
            let _ = write!(
                out,
                "Writing style: {}\nSource reliability: {:?}\nEmotional tone: {}\nPolitical relevance: {:?}",
                a.insights.writing_style,
                a.insights.source_reliability,
                a.insights.emotional_tone,
                a.insights.political_relevance
            );
            out
        }
        AnalysisReport::Locked { title, source, author, required, .. } => format!(
            "{}\n{} | By {}\nUpgrade to {} for fact checking and bias analysis.",
            title, source, author, required
        ),
    }
}

pub fn timeline(events: &[TimelineEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let _ = writeln!(
            out,
            "{} [{:?}] {}\n    {}",
            event.date, event.significance, event.title, event.summary
        );
        for article in &event.articles {
            let _ = writeln!(out, "    {}", article_line(article));
        }
    }
    out.trim_end().to_string()
}

pub fn analytics(report: &AnalyticsReport) -> String {
    let mut out = format!("{} article(s) in the last {}\n", report.articles, report.period);
    match &report.data {
        MetricData::Bias(rows) => {
            for row in rows {
                let _ = writeln!(out, "{:<14} {:>3}% ({})", row.orientation.label(), row.percent, row.count);
            }
        }
        MetricData::Credibility(rows) => {
            for row in rows {
                let _ = writeln!(out, "{:<10} {}", row.range, row.count);
            }
        }
        MetricData::Topics(rows) => {
            for row in rows {
                let _ = writeln!(out, "{:<16} {}", row.topic, row.articles);
            }
        }
        MetricData::Engagement(rows) => {
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:<14} {} article(s), {:.1} min avg",
                    row.category, row.articles, row.avg_read_time
                );
            }
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::corpus::builtin_articles;
    use nd_core::subscription_tiers;

    #[test]
    fn test_article_line() {
        let articles = builtin_articles().unwrap();
        assert_eq!(
            article_line(&articles[2]),
            "[3] New Healthcare Reform Bill Faces Bipartisan Opposition | Political Wire (Politics, center, partially-verified)"
        );
    }

    #[test]
    fn test_empty_article_list() {
        assert_eq!(articles(&[]), "No articles match.");
    }

    #[test]
    fn test_tiers_marks_current() {
        let text = tiers(subscription_tiers(), TierId::Pro);
        assert!(text.contains("* Pro ($12.99, unlimited)"));
        assert!(text.contains("  Basic ($0.00, 50 articles/day)"));
    }

    #[test]
    fn test_locked_analysis() {
        let report = AnalysisReport::Locked {
            article_id: "1".into(),
            title: "T".into(),
            source: "S".into(),
            author: "A".into(),
            required: TierId::Pro,
        };
        assert!(analysis(&report).ends_with("Upgrade to pro for fact checking and bias analysis."));
    }
}
