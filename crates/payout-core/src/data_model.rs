//! Data Model: RawArticle, Article, ArticleMetrics
//!
//! [`RawArticle`] mirrors what the article listing API hands us: camelCase,
//! every field optional, counts that may arrive as `null`, negative or
//! fractional. [`RawArticle::into_article`] is the single place where those
//! values are coerced; everything past it works on [`ArticleMetrics`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PayoutError;

/// Publication state of an article. Unrecognized values map to `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Pending,
    Published,
    Rejected,
    Archived,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ArticleStatus {
    pub fn is_published(&self) -> bool {
        matches!(self, ArticleStatus::Published)
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Pending => "pending",
            ArticleStatus::Published => "published",
            ArticleStatus::Rejected => "rejected",
            ArticleStatus::Archived => "archived",
            ArticleStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Normalized per-article counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub bookmarks: u64,
    /// Accumulated reading time across all readers
    pub total_read_time_seconds: f64,
    /// Category id, looked up in the rate card's category table
    pub category: String,
    pub is_premium: bool,
    pub earnings_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Earnings for this article were already paid out
    pub is_paid: bool,
}

impl ArticleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date used for calendar rules: publish date, else creation date
    pub fn reference_date(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    pub fn with_interactions(mut self, likes: u64, comments: u64, shares: u64, bookmarks: u64) -> Self {
        self.likes = likes;
        self.comments = comments;
        self.shares = shares;
        self.bookmarks = bookmarks;
        self
    }

    pub fn with_read_time(mut self, seconds: f64) -> Self {
        self.total_read_time_seconds = seconds;
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    pub fn earning(mut self) -> Self {
        self.earnings_enabled = true;
        self
    }

    pub fn published_on(mut self, ts: DateTime<Utc>) -> Self {
        self.published_at = Some(ts);
        self
    }

    pub fn created_on(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }

    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }
}

/// An article as seen by the payout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: ArticleStatus,
    pub metrics: ArticleMetrics,
}

impl Article {
    pub fn new(id: impl Into<String>, metrics: ArticleMetrics) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            status: ArticleStatus::Unknown,
            metrics,
        }
    }

    /// Shorthand for a published article
    pub fn published(id: impl Into<String>, metrics: ArticleMetrics) -> Self {
        Self::new(id, metrics).with_status(ArticleStatus::Published)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }
}

/// Article record as delivered by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawArticle {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub status: Option<ArticleStatus>,
    pub views: Option<f64>,
    pub likes: Option<f64>,
    pub comments: Option<f64>,
    pub shares: Option<f64>,
    pub bookmarks: Option<f64>,
    #[serde(alias = "totalReadTimeSeconds")]
    pub total_read_time: Option<f64>,
    pub category: Option<String>,
    pub is_premium: Option<bool>,
    pub earnings_enabled: Option<bool>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; parsed leniently on ingestion
    #[serde(alias = "publishedAt")]
    pub publish_date: Option<String>,
    pub created_at: Option<String>,
    pub is_paid: Option<bool>,
}

impl RawArticle {
    /// Normalize into an [`Article`]. Missing counts become 0, invalid ones
    /// are clamped to 0 and fractional ones floored.
    pub fn into_article(self) -> Article {
        let id = self.id.unwrap_or_default();
        let metrics = ArticleMetrics {
            views: clamp_count(&id, "views", self.views),
            likes: clamp_count(&id, "likes", self.likes),
            comments: clamp_count(&id, "comments", self.comments),
            shares: clamp_count(&id, "shares", self.shares),
            bookmarks: clamp_count(&id, "bookmarks", self.bookmarks),
            total_read_time_seconds: clamp_seconds(&id, self.total_read_time),
            category: self.category.unwrap_or_default(),
            is_premium: self.is_premium.unwrap_or(false),
            earnings_enabled: self.earnings_enabled.unwrap_or(false),
            published_at: parse_date(&id, "publishDate", self.publish_date.as_deref()),
            created_at: parse_date(&id, "createdAt", self.created_at.as_deref()),
            is_paid: self.is_paid.unwrap_or(false),
        };

        Article {
            id,
            title: self.title.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            metrics,
        }
    }

    /// Strict check: reject instead of clamping
    pub fn validate(&self) -> Result<(), PayoutError> {
        let counts = [
            ("views", self.views),
            ("likes", self.likes),
            ("comments", self.comments),
            ("shares", self.shares),
            ("bookmarks", self.bookmarks),
        ];

        for (field, value) in counts {
            if let Some(value) = value {
                check_non_negative(field, value)?;
                if value.fract() != 0.0 {
                    return Err(PayoutError::InvalidMetric {
                        field,
                        value,
                        reason: "must be a whole number",
                    });
                }
            }
        }

        if let Some(value) = self.total_read_time {
            check_non_negative("totalReadTime", value)?;
        }

        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), PayoutError> {
    if !value.is_finite() {
        return Err(PayoutError::InvalidMetric {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(PayoutError::InvalidMetric {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn clamp_count(article: &str, field: &'static str, value: Option<f64>) -> u64 {
    match value {
        None => 0,
        Some(v) if v.is_finite() && v >= 0.0 => {
            if v.fract() != 0.0 {
                warn!(article, field, value = v, "flooring fractional count");
            }
            v.floor() as u64
        }
        Some(v) => {
            warn!(article, field, value = v, "clamping invalid count to zero");
            0
        }
    }
}

/// Date-only values are pinned to noon UTC so the calendar day survives
/// any reference offset of less than 12h
fn parse_date(article: &str, field: &'static str, value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(12, 0, 0).map(|noon| noon.and_utc());
    }

    warn!(article, field, value, "ignoring unparseable date");
    None
}

fn clamp_seconds(article: &str, value: Option<f64>) -> f64 {
    match value {
        None => 0.0,
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            warn!(article, field = "totalReadTime", value = v, "clamping invalid read time to zero");
            0.0
        }
    }
}
