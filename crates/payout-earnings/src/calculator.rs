//! Per-article earnings
//!
//! Base pay is views times the per-view rate, then scaled by the category,
//! premium and weekend multipliers in that order. Two flat bonuses are added
//! on top: one for the view tier reached, one for the engagement tier.
//! Every step is recorded in the [`Breakdown`] as the amount it added.

use payout_core::ArticleMetrics;
use payout_rates::RateCard;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engagement::EngagementScorer;

/// Itemized contribution of each step to the total
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Raw view count
    pub views: u64,
    /// Views times rate, before any multiplier
    pub base: f64,
    /// Added by the category multiplier
    pub category: f64,
    /// Added by the premium multiplier
    pub premium: f64,
    /// Added by the weekend multiplier
    pub weekend: f64,
    /// View tier bonus
    pub bonus: f64,
    /// Engagement tier bonus
    pub engagement: f64,
}

impl Breakdown {
    /// Sum of all monetary parts; equals the total up to float rounding
    pub fn reconciled_total(&self) -> f64 {
        self.base + self.category + self.premium + self.weekend + self.bonus + self.engagement
    }
}

/// Earnings of one article
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsResult {
    /// Base pay after all multipliers
    pub base_earnings: f64,
    /// View tier bonus
    pub bonus_earnings: f64,
    /// Engagement tier bonus
    pub engagement_bonus: f64,
    pub total_earned: f64,
    /// Engagement score of the article
    pub engagement: u64,
    pub breakdown: Breakdown,
}

impl EarningsResult {
    /// Result for an article that earns nothing
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Distance from a value to the next bonus tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStep {
    pub current: u64,
    pub current_bonus: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_threshold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_bonus: Option<f64>,
    /// 0 once the top tier is reached
    pub remaining: u64,
}

/// Progress toward the next view and engagement tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierProgress {
    pub views: TierStep,
    pub engagement: TierStep,
}

/// Earnings calculator bound to one rate card
#[derive(Debug, Clone, Copy)]
pub struct EarningsCalculator<'a> {
    rates: &'a RateCard,
    scorer: EngagementScorer<'a>,
}

impl<'a> EarningsCalculator<'a> {
    pub fn new(rates: &'a RateCard) -> Self {
        Self {
            rates,
            scorer: EngagementScorer::new(&rates.engagement),
        }
    }

    pub fn rates(&self) -> &'a RateCard {
        self.rates
    }

    /// Engagement score with this card's weights
    pub fn engagement(&self, metrics: &ArticleMetrics) -> u64 {
        self.scorer.score(metrics)
    }

    /// Like [`calculate`](Self::calculate), but an absent record earns nothing
    pub fn calculate_opt(&self, metrics: Option<&ArticleMetrics>) -> EarningsResult {
        metrics.map_or_else(EarningsResult::zero, |m| self.calculate(m))
    }

    /// Calculate the earnings of one article
    pub fn calculate(&self, metrics: &ArticleMetrics) -> EarningsResult {
        if !metrics.earnings_enabled {
            return EarningsResult::zero();
        }

        let rates = self.rates;
        let engagement = self.scorer.score(metrics);
        let category_multiplier = rates.categories.multiplier_for(&metrics.category);

        let base = metrics.views as f64 * rates.rate_per_view;

        let after_category = base * category_multiplier;

        let after_premium = if metrics.is_premium {
            after_category * rates.premium_multiplier
        } else {
            after_category
        };

        let is_weekend = metrics
            .reference_date()
            .is_some_and(|ts| rates.calendar.is_weekend(ts));
        let after_weekend = if is_weekend {
            after_premium * rates.weekend_bonus
        } else {
            after_premium
        };

        let base_earnings = after_weekend;
        let bonus_earnings = rates.view_bonuses.bonus_for(metrics.views);
        let engagement_bonus = rates.engagement_bonuses.bonus_for(engagement);
        let total_earned = base_earnings + bonus_earnings + engagement_bonus;

        debug!(
            views = metrics.views,
            engagement,
            category = %metrics.category,
            premium = metrics.is_premium,
            weekend = is_weekend,
            total_earned,
            "calculated article earnings"
        );

        EarningsResult {
            base_earnings,
            bonus_earnings,
            engagement_bonus,
            total_earned,
            engagement,
            breakdown: Breakdown {
                views: metrics.views,
                base,
                category: after_category - base,
                premium: after_premium - after_category,
                weekend: after_weekend - after_premium,
                bonus: bonus_earnings,
                engagement: engagement_bonus,
            },
        }
    }

    /// How far an article is from its next view and engagement bonus
    pub fn progress(&self, metrics: &ArticleMetrics) -> TierProgress {
        let engagement = self.scorer.score(metrics);
        TierProgress {
            views: step(&self.rates.view_bonuses, metrics.views),
            engagement: step(&self.rates.engagement_bonuses, engagement),
        }
    }
}

fn step(table: &payout_rates::TierTable, current: u64) -> TierStep {
    let next = table.next_tier(current);
    TierStep {
        current,
        current_bonus: table.bonus_for(current),
        next_threshold: next.map(|t| t.threshold),
        next_bonus: next.map(|t| t.bonus),
        remaining: next.map_or(0, |t| t.threshold - current),
    }
}
