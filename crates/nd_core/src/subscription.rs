use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    Basic,
    Pro,
    #[default]
    Enterprise,
}

impl TierId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierId::Basic => "basic",
            TierId::Pro => "pro",
            TierId::Enterprise => "enterprise",
        }
    }

    /// The full table entry for this tier.
    pub fn tier(&self) -> &'static SubscriptionTier {
        // The table holds every variant, in declaration order.
        &TIERS[*self as usize]
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(TierId::Basic),
            "pro" => Ok(TierId::Pro),
            "enterprise" => Ok(TierId::Enterprise),
            _ => Err(Error::UnknownTier(s.to_string())),
        }
    }
}

/// Capabilities a subscription tier can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    FactChecking,
    BiasAnalysis,
    Timeline,
    AdvancedFilters,
    Analytics,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Feature::FactChecking => "fact checking",
            Feature::BiasAnalysis => "bias analysis",
            Feature::Timeline => "timeline",
            Feature::AdvancedFilters => "advanced filters",
            Feature::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTier {
    pub id: TierId,
    pub name: String,
    pub price: f64,
    pub features: Vec<String>,
    /// `-1` means unlimited.
    pub max_articles_per_day: i32,
    pub has_fact_checking: bool,
    pub has_bias_analysis: bool,
    pub has_timeline: bool,
    pub has_advanced_filters: bool,
}

impl SubscriptionTier {
    pub fn daily_limit(&self) -> Option<u32> {
        u32::try_from(self.max_articles_per_day).ok()
    }

    pub fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::FactChecking => self.has_fact_checking,
            Feature::BiasAnalysis => self.has_bias_analysis,
            Feature::Timeline => self.has_timeline,
            Feature::AdvancedFilters => self.has_advanced_filters,
            Feature::Analytics => self.id == TierId::Enterprise,
        }
    }
}

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

lazy_static! {
    static ref TIERS: Vec<SubscriptionTier> = vec![
        SubscriptionTier {
            id: TierId::Basic,
            name: "Basic".to_string(),
            price: 0.0,
            features: features(&[
                "Access to 50 articles per day",
                "Basic news aggregation",
                "Simple search functionality",
                "Mobile app access",
            ]),
            max_articles_per_day: 50,
            has_fact_checking: false,
            has_bias_analysis: false,
            has_timeline: false,
            has_advanced_filters: false,
        },
        SubscriptionTier {
            id: TierId::Pro,
            name: "Pro".to_string(),
            price: 12.99,
            features: features(&[
                "Unlimited article access",
                "AI-powered fact checking",
                "Political bias analysis",
                "Advanced filtering options",
                "Bookmark and save articles",
                "Priority customer support",
            ]),
            max_articles_per_day: -1,
            has_fact_checking: true,
            has_bias_analysis: true,
            has_timeline: false,
            has_advanced_filters: true,
        },
        SubscriptionTier {
            id: TierId::Enterprise,
            name: "Enterprise".to_string(),
            price: 29.99,
            features: features(&[
                "Everything in Pro",
                "Timeline tracking for topics",
                "Historical context analysis",
                "Custom news alerts",
                "API access for integration",
                "Team collaboration features",
                "White-label options",
            ]),
            max_articles_per_day: -1,
            has_fact_checking: true,
            has_bias_analysis: true,
            has_timeline: true,
            has_advanced_filters: true,
        },
    ];
}

/// The fixed, ordered tier table.
pub fn subscription_tiers() -> &'static [SubscriptionTier] {
    &TIERS
}

/// The cheapest tier that unlocks `feature`.
pub fn minimum_tier(feature: Feature) -> TierId {
    TIERS
        .iter()
        .find(|tier| tier.allows(feature))
        .map(|tier| tier.id)
        .unwrap_or(TierId::Enterprise)
}

/// Access flags derived from the current tier. Basic access is implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    pub tier: TierId,
    pub has_pro_access: bool,
    pub has_enterprise_access: bool,
}

impl Access {
    pub fn for_tier(tier: TierId) -> Self {
        Self {
            tier,
            has_pro_access: matches!(tier, TierId::Pro | TierId::Enterprise),
            has_enterprise_access: tier == TierId::Enterprise,
        }
    }

    pub fn allows(&self, feature: Feature) -> bool {
        self.tier.tier().allows(feature)
    }

    /// Fails with `AccessDenied` naming the tier to upgrade to.
    pub fn require(&self, feature: Feature) -> Result<()> {
        if self.allows(feature) {
            Ok(())
        } else {
            Err(Error::AccessDenied {
                feature: feature.to_string(),
                required: minimum_tier(feature).to_string(),
            })
        }
    }
}
