//! Rate Cards
//!
//! Every constant the calculators use lives here: per-view rate, multipliers,
//! engagement weights, bonus tiers, category multipliers and cashout
//! thresholds. A rate card is loaded once and shared read-only.

use std::path::Path;

use payout_core::{PayoutError, ReferenceCalendar};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::tiers::TierTable;

/// Weights of each interaction in the engagement score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementWeights {
    pub view: f64,
    pub like: f64,
    pub comment: f64,
    pub share: f64,
    pub bookmark: f64,
    /// Weight per second of total read time
    pub read_time_second: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            view: 1.0,
            like: 3.0,
            comment: 5.0,
            share: 8.0,
            bookmark: 4.0,
            read_time_second: 0.1,
        }
    }
}

impl EngagementWeights {
    fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("view", self.view),
            ("like", self.like),
            ("comment", self.comment),
            ("share", self.share),
            ("bookmark", self.bookmark),
            ("read_time_second", self.read_time_second),
        ]
    }
}

/// Multiplier applied to the base pay of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub id: String,
    pub multiplier: f64,
}

impl CategoryRule {
    pub fn new(id: impl Into<String>, multiplier: f64) -> Self {
        Self {
            id: id.into(),
            multiplier,
        }
    }
}

/// Category lookup table. Ids match case-insensitively; unknown ids get 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    pub const DEFAULT_MULTIPLIER: f64 = 1.0;

    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn get(&self, category: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.id.eq_ignore_ascii_case(category))
    }

    pub fn multiplier_for(&self, category: &str) -> f64 {
        self.get(category)
            .map_or(Self::DEFAULT_MULTIPLIER, |r| r.multiplier)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

/// Thresholds a writer must clear before requesting a payout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashoutPolicy {
    /// Minimum unpaid earnings
    pub minimum_payout: f64,
    /// Minimum total engagement across published articles
    pub minimum_engagement: u64,
    /// Engagement required per unit of unpaid earnings
    pub engagement_to_earnings_ratio: f64,
}

impl Default for CashoutPolicy {
    fn default() -> Self {
        Self {
            minimum_payout: 100.0,
            minimum_engagement: 20_000,
            engagement_to_earnings_ratio: 200.0,
        }
    }
}

/// Complete, versioned set of payout constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateCard {
    /// Rate card name (e.g., "standard@1.0")
    pub name: String,

    // === Base Pay ===
    /// Pay per view before multipliers
    pub rate_per_view: f64,

    /// Applied to category-adjusted pay for premium articles
    pub premium_multiplier: f64,

    /// Applied after the premium multiplier for weekend publications
    pub weekend_bonus: f64,

    // === Engagement ===
    pub engagement: EngagementWeights,

    // === Bonus Tiers ===
    pub view_bonuses: TierTable,

    pub engagement_bonuses: TierTable,

    // === Categories ===
    pub categories: CategoryTable,

    // === Cashout ===
    pub cashout: CashoutPolicy,

    /// Calendar used for weekend and monthly rules
    pub calendar: ReferenceCalendar,
}

impl RateCard {
    /// Built-in production rate card
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            rate_per_view: 0.01,
            premium_multiplier: 1.5,
            weekend_bonus: 1.2,
            engagement: EngagementWeights::default(),
            view_bonuses: TierTable::from_pairs(&[
                (1_000, 5.0),
                (5_000, 25.0),
                (10_000, 75.0),
                (25_000, 200.0),
                (50_000, 500.0),
            ])
            .unwrap_or_default(),
            engagement_bonuses: TierTable::from_pairs(&[
                (500, 2.0),
                (1_000, 5.0),
                (2_500, 15.0),
                (5_000, 35.0),
                (10_000, 80.0),
                (20_000, 200.0),
            ])
            .unwrap_or_default(),
            categories: CategoryTable::new(vec![
                CategoryRule::new("news", 1.0),
                CategoryRule::new("reviews", 1.5),
                CategoryRule::new("comparisons", 1.4),
                CategoryRule::new("buying-guides", 1.3),
                CategoryRule::new("electric", 1.3),
                CategoryRule::new("maintenance", 1.2),
                CategoryRule::new("motorsport", 1.2),
                CategoryRule::new("industry", 1.1),
                CategoryRule::new("lifestyle", 0.9),
            ]),
            cashout: CashoutPolicy::default(),
            calendar: ReferenceCalendar::utc(),
        }
    }

    /// Load and validate a rate card from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, PayoutError> {
        let card: Self = serde_yaml::from_str(yaml)?;
        card.validate()?;
        Ok(card)
    }

    /// Load and validate a rate card from JSON
    pub fn from_json(json: &str) -> Result<Self, PayoutError> {
        let card: Self = serde_json::from_str(json)?;
        card.validate()?;
        Ok(card)
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PayoutError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let card = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&content)?,
            _ => Self::from_yaml(&content)?,
        };

        info!(name = %card.name, path = %path.display(), "loaded rate card");
        Ok(card)
    }

    /// Check every constant is usable by the calculators
    pub fn validate(&self) -> Result<(), PayoutError> {
        let invalid = |msg: String| -> Result<(), PayoutError> { Err(PayoutError::ConfigError(msg)) };

        if self.name.trim().is_empty() {
            return invalid("rate card name must not be empty".to_string());
        }
        if !self.rate_per_view.is_finite() || self.rate_per_view < 0.0 {
            return invalid(format!("rate_per_view {} must be finite and >= 0", self.rate_per_view));
        }
        for (field, value) in [
            ("premium_multiplier", self.premium_multiplier),
            ("weekend_bonus", self.weekend_bonus),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{} {} must be finite and > 0", field, value));
            }
        }
        for (weight, value) in self.engagement.entries() {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("engagement weight {} {} must be finite and >= 0", weight, value));
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for rule in self.categories.rules() {
            if !rule.multiplier.is_finite() || rule.multiplier <= 0.0 {
                return invalid(format!("category {} multiplier {} must be > 0", rule.id, rule.multiplier));
            }
            if seen.iter().any(|id| id.eq_ignore_ascii_case(&rule.id)) {
                return invalid(format!("duplicate category {}", rule.id));
            }
            seen.push(&rule.id);
        }

        let cashout = &self.cashout;
        if !cashout.minimum_payout.is_finite() || cashout.minimum_payout <= 0.0 {
            return invalid(format!("minimum_payout {} must be > 0", cashout.minimum_payout));
        }
        if cashout.minimum_engagement == 0 {
            return invalid("minimum_engagement must be > 0".to_string());
        }
        if !cashout.engagement_to_earnings_ratio.is_finite() || cashout.engagement_to_earnings_ratio < 0.0 {
            return invalid(format!(
                "engagement_to_earnings_ratio {} must be finite and >= 0",
                cashout.engagement_to_earnings_ratio
            ));
        }

        if !self.calendar.is_valid() {
            return invalid(format!(
                "calendar offset {} minutes is out of range",
                self.calendar.utc_offset_minutes
            ));
        }

        Ok(())
    }

    /// Content hash identifying this exact set of constants
    pub fn fingerprint(&self) -> Result<String, PayoutError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(format!("blake3:{}", blake3::hash(&bytes)))
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::standard()
    }
}
