//! Payout Rates: Rate Cards and Bonus Tiers
//!
//! This crate holds the immutable configuration the payout calculators are
//! built from. Nothing here is global: callers load a [`RateCard`] once and
//! hand it to each calculator, so tests can substitute their own fixtures.
//!
//! # Example
//!
//! ```
//! use payout_rates::RateCard;
//!
//! let card = RateCard::from_yaml("name: spring@1.1\nweekend_bonus: 1.3\n").unwrap();
//!
//! assert_eq!(card.weekend_bonus, 1.3);
//! assert_eq!(card.categories.multiplier_for("reviews"), 1.5);
//! assert_eq!(card.view_bonuses.bonus_for(12_000), 75.0);
//! ```

pub mod rate_card;
pub mod tiers;

pub use rate_card::{CashoutPolicy, CategoryRule, CategoryTable, EngagementWeights, RateCard};
pub use tiers::{Tier, TierTable};
