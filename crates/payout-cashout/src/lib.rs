//! Payout Cashout: Eligibility Gate and Summaries
//!
//! Aggregates per-article earnings over a writer's articles and decides
//! whether a payout may be requested.
//!
//! ```text
//! Articles → published filter → EarningsCalculator → Σ unpaid earnings ─┐
//!                                                  → Σ engagement ───────┤
//!                                                                        ↓
//!                              minimum_earnings ∧ minimum_engagement ∧ engagement_ratio
//!                                                                        ↓
//!                                                               CashoutEligibility
//! ```
//!
//! # Example
//!
//! ```
//! use payout_cashout::check_eligibility;
//! use payout_rates::RateCard;
//!
//! let verdict = check_eligibility(&[], &RateCard::standard());
//! assert!(!verdict.eligible);
//! assert_eq!(verdict.summary(), "Blocked: minimum_earnings, minimum_engagement");
//! ```

pub mod gate;
pub mod summary;

pub use gate::{CashoutEligibility, CashoutGate, CashoutRequirements, Requirement};
pub use summary::{summarize, ArticleEarnings, EarningsSummary};

use payout_core::Article;
use payout_rates::RateCard;

/// Quick eligibility check under the given rate card
pub fn check_eligibility(articles: &[Article], rates: &RateCard) -> CashoutEligibility {
    CashoutGate::new(rates).evaluate(articles)
}

/// Check if a writer could request a payout right now
pub fn can_cash_out(articles: &[Article], rates: &RateCard) -> bool {
    check_eligibility(articles, rates).eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use payout_core::ArticleMetrics;

    #[test]
    fn test_quick_check() {
        let card = RateCard::standard();
        let articles: Vec<Article> = (0..4)
            .map(|i| {
                Article::published(
                    format!("art-{}", i),
                    ArticleMetrics::new()
                        .with_views(30_000)
                        .with_interactions(1_000, 100, 50, 50)
                        .in_category("reviews")
                        .earning(),
                )
            })
            .collect();

        let verdict = check_eligibility(&articles, &card);
        assert_eq!(verdict.eligible, can_cash_out(&articles, &card));
        assert!(verdict.unpaid_earnings > 0.0);
    }
}
