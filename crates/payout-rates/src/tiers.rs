//! Bonus tier tables
//!
//! A tier table maps a metric (views, engagement) to a flat bonus. Only the
//! single highest tier the value reaches pays out; tiers never stack.

use serde::{Deserialize, Serialize};

/// One row of a tier table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Minimum value (inclusive) to qualify
    pub threshold: u64,
    /// Flat bonus paid at this tier
    pub bonus: f64,
}

impl Tier {
    pub fn new(threshold: u64, bonus: f64) -> Self {
        Self { threshold, bonus }
    }
}

/// Tiers sorted by ascending threshold. Construction rejects zero or
/// duplicate thresholds and negative or non-finite bonuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, String> {
        tiers.sort_by_key(|t| t.threshold);

        for tier in &tiers {
            if tier.threshold == 0 {
                return Err("tier threshold must be greater than zero".to_string());
            }
            if !tier.bonus.is_finite() || tier.bonus < 0.0 {
                return Err(format!(
                    "tier {} has invalid bonus {}",
                    tier.threshold, tier.bonus
                ));
            }
        }

        if let Some(pair) = tiers.windows(2).find(|w| w[0].threshold == w[1].threshold) {
            return Err(format!("duplicate tier threshold {}", pair[0].threshold));
        }

        Ok(Self { tiers })
    }

    /// Build from `(threshold, bonus)` pairs
    pub fn from_pairs(pairs: &[(u64, f64)]) -> Result<Self, String> {
        Self::new(pairs.iter().map(|&(t, b)| Tier::new(t, b)).collect())
    }

    /// Highest tier whose threshold is `<= value`
    pub fn tier_for(&self, value: u64) -> Option<&Tier> {
        self.tiers.iter().fold(None, |best, tier| {
            if value >= tier.threshold {
                Some(tier)
            } else {
                best
            }
        })
    }

    /// Bonus of the qualifying tier, 0 when none qualifies
    pub fn bonus_for(&self, value: u64) -> f64 {
        self.tier_for(value).map_or(0.0, |t| t.bonus)
    }

    /// First tier still out of reach
    pub fn next_tier(&self, value: u64) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.threshold > value)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = String;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}
