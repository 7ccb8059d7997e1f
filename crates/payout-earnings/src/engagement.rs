//! Engagement scoring
//!
//! Collapses an article's interaction counters into a single weighted,
//! floored integer used for bonus tiers and cashout checks.

use payout_core::ArticleMetrics;
use payout_rates::EngagementWeights;

/// Weighted interaction scorer
#[derive(Debug, Clone, Copy)]
pub struct EngagementScorer<'a> {
    weights: &'a EngagementWeights,
}

impl<'a> EngagementScorer<'a> {
    pub fn new(weights: &'a EngagementWeights) -> Self {
        Self { weights }
    }

    /// Engagement score for one article
    pub fn score(&self, metrics: &ArticleMetrics) -> u64 {
        let w = self.weights;

        let weighted = metrics.views as f64 * w.view
            + metrics.likes as f64 * w.like
            + metrics.comments as f64 * w.comment
            + metrics.shares as f64 * w.share
            + metrics.bookmarks as f64 * w.bookmark
            + metrics.total_read_time_seconds * w.read_time_second;

        weighted.floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_sum() {
        let weights = EngagementWeights::default();
        let scorer = EngagementScorer::new(&weights);

        let metrics = ArticleMetrics::new()
            .with_views(10_000)
            .with_interactions(100, 20, 10, 5)
            .with_read_time(3_000.0);

        // 10000 + 300 + 100 + 80 + 20 + 300
        assert_eq!(scorer.score(&metrics), 10_800);
    }

    #[test]
    fn test_empty_metrics_score_zero() {
        let weights = EngagementWeights::default();
        assert_eq!(EngagementScorer::new(&weights).score(&ArticleMetrics::new()), 0);
    }

    #[test]
    fn test_read_time_is_floored() {
        let weights = EngagementWeights::default();
        let scorer = EngagementScorer::new(&weights);

        // 7 + 1.99 floors to 8
        let metrics = ArticleMetrics::new().with_views(7).with_read_time(19.9);
        assert_eq!(scorer.score(&metrics), 8);
    }

    #[test]
    fn test_custom_weights() {
        let weights = EngagementWeights {
            view: 0.0,
            like: 1.0,
            comment: 0.0,
            share: 10.0,
            bookmark: 0.0,
            read_time_second: 0.0,
        };
        let scorer = EngagementScorer::new(&weights);

        let metrics = ArticleMetrics::new()
            .with_views(50_000)
            .with_interactions(4, 9, 2, 9);
        assert_eq!(scorer.score(&metrics), 24);
    }
}
