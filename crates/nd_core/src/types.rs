use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A news article together with its bias and fact-check annotations.
///
/// Articles are loaded once with the corpus and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub source: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub image_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub political_bias: PoliticalBias,
    pub credibility_score: f32,
    pub fact_check_status: FactCheckStatus,
    pub read_time: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliticalBias {
    pub orientation: BiasOrientation,
    pub confidence: f32,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckStatus {
    pub status: FactCheckVerdict,
    pub confidence: f32,
    pub summary: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiasOrientation {
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
}

impl BiasOrientation {
    pub const ALL: [BiasOrientation; 5] = [
        BiasOrientation::Left,
        BiasOrientation::CenterLeft,
        BiasOrientation::Center,
        BiasOrientation::CenterRight,
        BiasOrientation::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BiasOrientation::Left => "left",
            BiasOrientation::CenterLeft => "center-left",
            BiasOrientation::Center => "center",
            BiasOrientation::CenterRight => "center-right",
            BiasOrientation::Right => "right",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BiasOrientation::Left => "Left",
            BiasOrientation::CenterLeft => "Center Left",
            BiasOrientation::Center => "Center",
            BiasOrientation::CenterRight => "Center Right",
            BiasOrientation::Right => "Right",
        }
    }

    pub fn leans_left(&self) -> bool {
        matches!(self, BiasOrientation::Left | BiasOrientation::CenterLeft)
    }
}

impl fmt::Display for BiasOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiasOrientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BiasOrientation::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidFilter(format!("unknown bias orientation: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FactCheckVerdict {
    Verified,
    PartiallyVerified,
    Disputed,
    False,
    Pending,
}

impl FactCheckVerdict {
    pub const ALL: [FactCheckVerdict; 5] = [
        FactCheckVerdict::Verified,
        FactCheckVerdict::PartiallyVerified,
        FactCheckVerdict::Disputed,
        FactCheckVerdict::False,
        FactCheckVerdict::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactCheckVerdict::Verified => "verified",
            FactCheckVerdict::PartiallyVerified => "partially-verified",
            FactCheckVerdict::Disputed => "disputed",
            FactCheckVerdict::False => "false",
            FactCheckVerdict::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FactCheckVerdict::Verified => "Verified",
            FactCheckVerdict::PartiallyVerified => "Partially Verified",
            FactCheckVerdict::Disputed => "Disputed",
            FactCheckVerdict::False => "False",
            FactCheckVerdict::Pending => "Pending",
        }
    }
}

impl fmt::Display for FactCheckVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactCheckVerdict {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FactCheckVerdict::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidFilter(format!("unknown fact-check status: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Low,
    Medium,
    High,
}

/// A dated story on the topic timeline, linking the articles that cover it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub summary: String,
    pub articles: Vec<Article>,
    pub significance: Significance,
}
