//! Service configuration from the environment
use std::path::PathBuf;

use payout_core::PayoutError;
use payout_rates::RateCard;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8788";
pub const DEFAULT_MAX_BATCH: usize = 1_000;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listen address (`PAYOUT_ADDR`)
    pub addr: String,
    /// Rate card file (`PAYOUT_RATES`); the built-in card when unset
    pub rates_path: Option<PathBuf>,
    /// Most articles accepted in one request (`PAYOUT_MAX_BATCH`)
    pub max_batch: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            rates_path: None,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, PayoutError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PayoutError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("PAYOUT_ADDR") {
            config.addr = addr;
        }
        if let Some(path) = get("PAYOUT_RATES") {
            config.rates_path = Some(PathBuf::from(path));
        }
        if let Some(max) = get("PAYOUT_MAX_BATCH") {
            config.max_batch = match max.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(PayoutError::ConfigError(format!(
                        "PAYOUT_MAX_BATCH must be a positive integer, got {:?}",
                        max
                    )))
                }
            };
        }

        Ok(config)
    }

    pub fn load_rates(&self) -> Result<RateCard, PayoutError> {
        match &self.rates_path {
            Some(path) => RateCard::from_path(path),
            None => Ok(RateCard::standard()),
        }
    }
}
