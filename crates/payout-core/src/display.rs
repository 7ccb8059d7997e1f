//! Display helpers for amounts and counters
//!
//! Cosmetic only. Calculations keep full precision and never round through
//! these functions.

/// Currency symbol used by the marketplace (Philippine peso)
pub const CURRENCY_SYMBOL: &str = "P";

/// `P` followed by the amount with two decimals, e.g. `P380.00`
pub fn format_currency(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}

/// Abbreviated counter: `950`, `12.3k`, `1.5M`
pub fn format_count(n: u64) -> String {
    // Values that would print as 1000.0k are promoted to M
    if n >= 999_950 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
