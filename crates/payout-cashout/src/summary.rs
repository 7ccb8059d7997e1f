//! Earnings summary for a writer's dashboard
//!
//! Aggregates per-article earnings over published articles: lifetime totals,
//! the paid/unpaid split, what was earned this calendar month and a ranking.

use chrono::{DateTime, Utc};
use payout_core::{Article, ArticleStatus};
use payout_earnings::{EarningsCalculator, EarningsResult};
use payout_rates::RateCard;
use serde::{Deserialize, Serialize};

/// Earnings of one published article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleEarnings {
    pub id: String,
    pub title: String,
    pub status: ArticleStatus,
    pub is_paid: bool,
    pub views: u64,
    /// Publish date, else creation date; drives the monthly total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<DateTime<Utc>>,
    pub result: EarningsResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    /// All articles submitted, in any status
    pub article_count: usize,
    pub published_count: usize,
    pub total_views: u64,
    pub total_engagement: u64,
    pub total_earned: f64,
    pub paid_earnings: f64,
    pub unpaid_earnings: f64,
    /// Earned by articles dated in the current reference-calendar month
    pub this_month_earnings: f64,
    pub average_earned: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_article: Option<ArticleEarnings>,
    /// Published articles, highest earning first
    pub articles: Vec<ArticleEarnings>,
}

/// Summarize a writer's articles as of `now`
pub fn summarize(articles: &[Article], rates: &RateCard, now: DateTime<Utc>) -> EarningsSummary {
    let calculator = EarningsCalculator::new(rates);

    let mut ranked: Vec<ArticleEarnings> = articles
        .iter()
        .filter(|a| a.is_published())
        .map(|a| ArticleEarnings {
            id: a.id.clone(),
            title: a.title.clone(),
            status: a.status,
            is_paid: a.metrics.is_paid,
            views: a.metrics.views,
            reference_date: a.metrics.reference_date(),
            result: calculator.calculate(&a.metrics),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.result
            .total_earned
            .total_cmp(&a.result.total_earned)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut total_views = 0u64;
    let mut total_engagement = 0u64;
    let mut paid_earnings = 0.0;
    let mut unpaid_earnings = 0.0;
    let mut this_month_earnings = 0.0;

    for entry in &ranked {
        let earned = entry.result.total_earned;
        total_views = total_views.saturating_add(entry.views);
        total_engagement = total_engagement.saturating_add(entry.result.engagement);

        if entry.is_paid {
            paid_earnings += earned;
        } else {
            unpaid_earnings += earned;
        }

        if entry
            .reference_date
            .is_some_and(|ts| rates.calendar.same_month(ts, now))
        {
            this_month_earnings += earned;
        }
    }

    let total_earned = paid_earnings + unpaid_earnings;
    let published_count = ranked.len();
    let average_earned = if published_count == 0 {
        0.0
    } else {
        total_earned / published_count as f64
    };

    EarningsSummary {
        article_count: articles.len(),
        published_count,
        total_views,
        total_engagement,
        total_earned,
        paid_earnings,
        unpaid_earnings,
        this_month_earnings,
        average_earned,
        top_article: ranked.first().cloned(),
        articles: ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use payout_core::ArticleMetrics;

    fn flat_card() -> RateCard {
        let mut card = RateCard::standard();
        card.rate_per_view = 1.0;
        card.view_bonuses = Default::default();
        card.engagement_bonuses = Default::default();
        card
    }

    fn on(day: u32, month: u32) -> DateTime<Utc> {
        // Callers pass weekday dates in 2024
        Utc.with_ymd_and_hms(2024, month, day, 10, 0, 0).unwrap()
    }

    fn article(id: &str, views: u64, date: DateTime<Utc>) -> Article {
        Article::published(id, ArticleMetrics::new().with_views(views).earning().published_on(date))
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], &RateCard::standard(), on(12, 6));
        assert_eq!(summary.article_count, 0);
        assert_eq!(summary.total_earned, 0.0);
        assert_eq!(summary.average_earned, 0.0);
        assert!(summary.top_article.is_none());
    }

    #[test]
    fn test_totals_and_ranking() {
        let card = flat_card();
        let mut paid = article("b", 300, on(14, 5));
        paid.metrics.is_paid = true;

        let articles = vec![
            article("a", 100, on(11, 6)),
            paid,
            article("c", 100, on(3, 6)),
            article("draft", 9_000, on(4, 6)).with_status(ArticleStatus::Draft),
        ];

        let summary = summarize(&articles, &card, on(12, 6));

        assert_eq!(summary.article_count, 4);
        assert_eq!(summary.published_count, 3);
        assert_eq!(summary.total_views, 500);
        assert_eq!(summary.total_earned, 500.0);
        assert_eq!(summary.paid_earnings, 300.0);
        assert_eq!(summary.unpaid_earnings, 200.0);
        assert_eq!(summary.this_month_earnings, 200.0);

        let order: Vec<&str> = summary.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(summary.top_article.map(|a| a.id), Some("b".to_string()));
    }

    #[test]
    fn test_this_month_uses_reference_calendar() {
        let mut card = flat_card();
        let now = Utc.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap();
        // 30 June 22:00 UTC is 1 July 06:00 at UTC+8
        let late_june = Utc.with_ymd_and_hms(2024, 6, 30, 22, 0, 0).unwrap();
        let articles = vec![article("x", 100, late_june)];

        assert_eq!(summarize(&articles, &card, now).this_month_earnings, 0.0);

        card.calendar = payout_core::ReferenceCalendar::with_offset_minutes(8 * 60);
        assert_eq!(summarize(&articles, &card, now).this_month_earnings, 100.0);
    }

    #[test]
    fn test_creation_date_is_reported_as_reference_date() {
        let card = flat_card();
        let created = on(10, 6);
        let created_only = Article::published(
            "undated",
            ArticleMetrics::new().with_views(40).earning().created_on(created),
        );

        let summary = summarize(&[created_only], &card, on(12, 6));

        let entry = &summary.articles[0];
        assert_eq!(entry.reference_date, Some(created));
        assert_eq!(summary.this_month_earnings, 40.0);
        let json = serde_json::to_value(entry).unwrap();
        assert!(json.get("referenceDate").is_some());
        assert!(json.get("publishedAt").is_none());
    }
}
