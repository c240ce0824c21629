//! claimdesk-engine: claim classification, settlement-delay interest, and claim KPIs

pub mod claim_id;
pub mod engine;
pub mod interest;
pub mod rules;
pub mod summary;

pub use engine::{ClaimEngine, EngineConfig, sla_breach_days};
pub use interest::{CounterpartyRates, DEFAULT_ANNUAL_RATE, FlatRate, RateProvider};
pub use summary::{ClaimBucket, ClaimSummary, CounterpartyExposure};

use claimdesk_core::{ClassificationResult, TradeRecord};

/// Classify one record with default settings and a flat default rate.
pub fn classify(trade: &TradeRecord) -> ClassificationResult {
    ClaimEngine::<FlatRate>::default().classify(trade)
}

/// Batch form of [`classify`]; output order matches input order.
pub fn classify_all(trades: &[TradeRecord]) -> Vec<ClassificationResult> {
    ClaimEngine::<FlatRate>::default().classify_all(trades)
}
