//! Payout Core: Article Model, Calendar, and Errors
//!
//! Typed article records shared by every payout crate. Provider data enters
//! through [`RawArticle`] and is normalized exactly once into [`Article`];
//! the calculators downstream only ever see clean, non-negative counts.

pub mod calendar;
pub mod data_model;
pub mod display;
pub mod error;

pub use calendar::ReferenceCalendar;
pub use data_model::{Article, ArticleMetrics, ArticleStatus, RawArticle};
pub use display::{format_count, format_currency};
pub use error::PayoutError;

/// Payout engine version
pub const PAYOUT_VERSION: &str = "1.0.0";
