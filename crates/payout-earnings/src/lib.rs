//! Payout Earnings: Engagement Scoring and Article Earnings
//!
//! Pure, synchronous calculators over normalized [`ArticleMetrics`]. Both
//! borrow a [`RateCard`]; neither holds state of its own, so a calculator can
//! be shared freely across threads and requests.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use payout_core::ArticleMetrics;
//! use payout_earnings::EarningsCalculator;
//! use payout_rates::RateCard;
//!
//! let card = RateCard::standard();
//! let calculator = EarningsCalculator::new(&card);
//!
//! let metrics = ArticleMetrics::new()
//!     .with_views(10_000)
//!     .with_interactions(100, 20, 10, 5)
//!     .with_read_time(3_000.0)
//!     .in_category("reviews")
//!     .premium()
//!     .earning()
//!     .published_on(Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap());
//!
//! let result = calculator.calculate(&metrics);
//! assert_eq!(result.engagement, 10_800);
//! assert!((result.total_earned - 380.0).abs() < 1e-9);
//! ```

pub mod calculator;
pub mod engagement;

pub use calculator::{Breakdown, EarningsCalculator, EarningsResult, TierProgress, TierStep};
pub use engagement::EngagementScorer;

use payout_core::ArticleMetrics;
use payout_rates::RateCard;

/// Quick engagement score under the given rate card
pub fn compute_engagement(metrics: &ArticleMetrics, rates: &RateCard) -> u64 {
    EngagementScorer::new(&rates.engagement).score(metrics)
}

/// Quick earnings calculation under the given rate card
pub fn compute_earnings(metrics: &ArticleMetrics, rates: &RateCard) -> EarningsResult {
    EarningsCalculator::new(rates).calculate(metrics)
}
