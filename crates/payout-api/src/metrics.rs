//! Prometheus counters served on `/metrics`.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ServiceMetrics {
    registry: Registry,
    calculations: IntCounterVec,
    cashout_checks: IntCounterVec,
}

impl ServiceMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let calculations = IntCounterVec::new(
            Opts::new("payout_calculations_total", "Articles run through a calculator"),
            &["kind"],
        )?;
        let cashout_checks = IntCounterVec::new(
            Opts::new("payout_cashout_checks_total", "Cashout eligibility evaluations"),
            &["outcome"],
        )?;

        registry.register(Box::new(calculations.clone()))?;
        registry.register(Box::new(cashout_checks.clone()))?;

        Ok(Self {
            registry,
            calculations,
            cashout_checks,
        })
    }

    /// Count `n` articles processed by `kind` ("engagement", "earnings", ...)
    pub fn record_calculations(&self, kind: &str, n: usize) {
        self.calculations.with_label_values(&[kind]).inc_by(n as u64);
    }

    pub fn record_cashout_check(&self, eligible: bool) {
        let outcome = if eligible { "eligible" } else { "ineligible" };
        self.cashout_checks.with_label_values(&[outcome]).inc();
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
