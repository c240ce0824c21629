//! Settlement-delay interest: simple interest over an actual/365-style basis,
//! with the annual rate supplied by a `RateProvider`.

use claimdesk_core::TradeRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Annual rate used when nothing more specific is configured
pub const DEFAULT_ANNUAL_RATE: f64 = 0.05;

/// Source of the annual interest rate for a trade's claim.
pub trait RateProvider {
    /// Annual rate as a fraction (0.05 = 5%)
    fn annual_rate(&self, trade: &TradeRecord) -> f64;
}

/// One rate for every trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatRate(pub f64);

impl Default for FlatRate {
    fn default() -> Self {
        FlatRate(DEFAULT_ANNUAL_RATE)
    }
}

impl RateProvider for FlatRate {
    fn annual_rate(&self, _trade: &TradeRecord) -> f64 {
        self.0
    }
}

/// Per-counterparty agreed rates with a default. Lookup ignores case and
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterpartyRates {
    default_rate: f64,
    overrides: HashMap<String, f64>,
}

impl CounterpartyRates {
    pub fn new(default_rate: f64) -> Self {
        Self {
            default_rate,
            overrides: HashMap::new(),
        }
    }

    pub fn with_rate(mut self, counterparty: &str, rate: f64) -> Self {
        self.insert(counterparty, rate);
        self
    }

    pub fn insert(&mut self, counterparty: &str, rate: f64) {
        self.overrides.insert(key(counterparty), rate);
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for CounterpartyRates {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut rates = CounterpartyRates::new(DEFAULT_ANNUAL_RATE);
        for (cpty, rate) in iter {
            rates.insert(cpty, rate);
        }
        rates
    }
}

fn key(counterparty: &str) -> String {
    counterparty.trim().to_lowercase()
}

impl RateProvider for CounterpartyRates {
    fn annual_rate(&self, trade: &TradeRecord) -> f64 {
        self.overrides
            .get(&key(trade.counterparty()))
            .copied()
            .unwrap_or(self.default_rate)
    }
}

impl<R: RateProvider + ?Sized> RateProvider for &R {
    fn annual_rate(&self, trade: &TradeRecord) -> f64 {
        (**self).annual_rate(trade)
    }
}

impl<R: RateProvider + ?Sized> RateProvider for Box<R> {
    fn annual_rate(&self, trade: &TradeRecord) -> f64 {
        (**self).annual_rate(trade)
    }
}

/// Clamp a provider's rate: negative or non-finite rates accrue nothing.
pub fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 { rate } else { 0.0 }
}

/// `rate * |notional| * days / basis`, zero unless the breach exceeds the
/// grace period. Always finite and non-negative.
pub fn accrued_interest(rate: f64, notional: f64, breach_days: i64, grace_days: i64, basis: f64) -> f64 {
    if breach_days <= grace_days || !notional.is_finite() || !(basis.is_finite() && basis > 0.0) {
        return 0.0;
    }
    let amount = sanitize_rate(rate) * notional.abs() * (breach_days as f64 / basis);
    if amount.is_finite() { amount } else { 0.0 }
}
