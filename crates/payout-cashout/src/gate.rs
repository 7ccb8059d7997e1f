//! Cashout eligibility gate
//!
//! A writer may cash out only when all three requirements hold at once:
//! enough unpaid earnings, enough lifetime engagement, and enough engagement
//! relative to the amount being paid. There is no partial credit and no
//! override.

use payout_core::Article;
use payout_earnings::EarningsCalculator;
use payout_rates::{CashoutPolicy, RateCard};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One requirement of the gate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub required: f64,
    pub current: f64,
    pub met: bool,
}

impl Requirement {
    pub fn check(required: f64, current: f64) -> Self {
        Self {
            required,
            current,
            met: current >= required,
        }
    }

    /// How much is still missing; 0 once met
    pub fn shortfall(&self) -> f64 {
        (self.required - self.current).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashoutRequirements {
    pub minimum_earnings: Requirement,
    pub minimum_engagement: Requirement,
    pub engagement_ratio: Requirement,
}

impl CashoutRequirements {
    fn named(&self) -> [(&'static str, &Requirement); 3] {
        [
            ("minimum_earnings", &self.minimum_earnings),
            ("minimum_engagement", &self.minimum_engagement),
            ("engagement_ratio", &self.engagement_ratio),
        ]
    }

    pub fn all_met(&self) -> bool {
        self.named().iter().all(|(_, r)| r.met)
    }
}

/// Verdict of the gate over a writer's articles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashoutEligibility {
    pub eligible: bool,
    pub unpaid_earnings: f64,
    pub total_engagement: u64,
    pub requirements: CashoutRequirements,
}

impl CashoutEligibility {
    /// Names of the requirements that are not met
    pub fn unmet(&self) -> Vec<&'static str> {
        self.requirements
            .named()
            .iter()
            .filter(|(_, r)| !r.met)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn summary(&self) -> String {
        if self.eligible {
            "All requirements met".to_string()
        } else {
            format!("Blocked: {}", self.unmet().join(", "))
        }
    }
}

/// Gate that decides cashout readiness
#[derive(Debug, Clone, Copy)]
pub struct CashoutGate<'a> {
    policy: &'a CashoutPolicy,
    calculator: EarningsCalculator<'a>,
}

impl<'a> CashoutGate<'a> {
    /// Create a gate using the rate card's cashout policy and earnings rules
    pub fn new(rates: &'a RateCard) -> Self {
        Self {
            policy: &rates.cashout,
            calculator: EarningsCalculator::new(rates),
        }
    }

    /// Evaluate a writer's articles
    pub fn evaluate(&self, articles: &[Article]) -> CashoutEligibility {
        let mut unpaid_earnings = 0.0;
        let mut total_engagement = 0u64;

        for article in articles.iter().filter(|a| a.is_published()) {
            let result = self.calculator.calculate(&article.metrics);
            if !article.metrics.is_paid {
                unpaid_earnings += result.total_earned;
            }
            total_engagement = total_engagement.saturating_add(result.engagement);
        }

        let policy = self.policy;
        let requirements = CashoutRequirements {
            minimum_earnings: Requirement::check(policy.minimum_payout, unpaid_earnings),
            minimum_engagement: Requirement::check(
                policy.minimum_engagement as f64,
                total_engagement as f64,
            ),
            engagement_ratio: Requirement::check(
                unpaid_earnings * policy.engagement_to_earnings_ratio,
                total_engagement as f64,
            ),
        };

        let eligibility = CashoutEligibility {
            eligible: requirements.all_met(),
            unpaid_earnings,
            total_engagement,
            requirements,
        };

        debug!(
            articles = articles.len(),
            unpaid_earnings,
            total_engagement,
            eligible = eligibility.eligible,
            "evaluated cashout eligibility"
        );

        eligibility
    }
}
