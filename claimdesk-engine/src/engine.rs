//! ClaimEngine: classify trade records into claims.
//!
//! Pure and total. Every missing or malformed input falls back to a default
//! and the substitution is recorded as a `DataWarning` on the result.

use claimdesk_core::{
    ClassificationResult, DEFAULT_FALLBACK_NOTIONAL, DataWarning, ProcessStatus, StatusField,
    TradeRecord, days_between_ceil, parse_trade_date,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::claim_id::claim_id;
use crate::interest::{FlatRate, RateProvider, accrued_interest, sanitize_rate};
use crate::rules::{StatusSnapshot, category_tags, claim_type};

/// Tunables for classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Breach days tolerated before a delay is tagged and interest accrues
    pub grace_days: i64,
    /// Notional used when a record has none
    pub fallback_notional: f64,
    /// Day-count denominator for simple interest
    pub day_count_basis: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grace_days: 1,
            fallback_notional: DEFAULT_FALLBACK_NOTIONAL,
            day_count_basis: 365.0,
        }
    }
}

/// Claim classification engine with an injected rate source.
#[derive(Debug, Clone)]
pub struct ClaimEngine<R: RateProvider> {
    config: EngineConfig,
    rates: R,
}

impl Default for ClaimEngine<FlatRate> {
    fn default() -> Self {
        Self::new(EngineConfig::default(), FlatRate::default())
    }
}

impl<R: RateProvider> ClaimEngine<R> {
    pub fn new(config: EngineConfig, rates: R) -> Self {
        Self { config, rates }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify one record. Never panics; identical input gives identical output.
    pub fn classify(&self, trade: &TradeRecord) -> ClassificationResult {
        let mut warnings = Vec::new();

        if !trade.has_trade_id() {
            warnings.push(DataWarning::MissingTradeId);
        }

        let status = StatusSnapshot::of(trade);
        check_status(StatusField::Confirmation, &status.confirmation, &mut warnings);
        check_status(StatusField::ExpenseApproval, &status.expense_approval, &mut warnings);
        check_status(StatusField::CostAllocation, &status.cost_allocation, &mut warnings);

        let sla_breach_days = sla_breach_days(trade, &mut warnings);

        let notional_amount = trade.notional().unwrap_or_else(|| {
            warnings.push(DataWarning::NotionalFallback {
                used: self.config.fallback_notional,
            });
            self.config.fallback_notional
        });

        let pnl = trade.pnl();
        let category_labels = category_tags(&status, sla_breach_days, self.config.grace_days);
        let claim_type = claim_type(&status, pnl);

        let interest_rate = sanitize_rate(self.rates.annual_rate(trade));
        let interest_amount = accrued_interest(
            interest_rate,
            notional_amount,
            sla_breach_days,
            self.config.grace_days,
            self.config.day_count_basis,
        );

        if !warnings.is_empty() {
            debug!(trade_id = trade.trade_id(), warnings = warnings.len(), "classified with data warnings");
        }

        ClassificationResult {
            claim_id: claim_id(trade, &category_labels),
            trade_id: trade.trade_id().to_string(),
            counterparty: trade.counterparty().to_string(),
            claim_type,
            category_labels,
            sla_breach_days,
            interest_rate,
            interest_amount,
            notional_amount,
            pnl,
            warnings,
        }
    }

    /// Classify every record, preserving input order.
    pub fn classify_all(&self, trades: &[TradeRecord]) -> Vec<ClassificationResult> {
        let results: Vec<ClassificationResult> = trades.iter().map(|t| self.classify(t)).collect();
        debug!(
            records = results.len(),
            claims = results.iter().filter(|r| r.is_claim()).count(),
            with_warnings = results.iter().filter(|r| r.has_warnings()).count(),
            "batch classified"
        );
        results
    }
}

fn check_status(field: StatusField, status: &ProcessStatus, warnings: &mut Vec<DataWarning>) {
    if let ProcessStatus::Other(value) = status {
        warnings.push(DataWarning::UnrecognizedStatus {
            field,
            value: value.clone(),
        });
    }
}

/// Settlement date minus value date in whole days (rounded up). Missing or
/// unparseable dates give 0 and a warning.
pub fn sla_breach_days(trade: &TradeRecord, warnings: &mut Vec<DataWarning>) -> i64 {
    let value = match trade.value_date_raw() {
        None => {
            warnings.push(DataWarning::MissingValueDate);
            None
        }
        Some(raw) => {
            let parsed = parse_trade_date(raw);
            if parsed.is_none() {
                warnings.push(DataWarning::UnparseableValueDate { raw: raw.to_string() });
            }
            parsed
        }
    };

    let settlement = match trade.settlement_date_raw() {
        None => {
            warnings.push(DataWarning::MissingSettlementDate);
            None
        }
        Some(raw) => {
            let parsed = parse_trade_date(raw);
            if parsed.is_none() {
                warnings.push(DataWarning::UnparseableSettlementDate { raw: raw.to_string() });
            }
            parsed
        }
    };

    match (value, settlement) {
        (Some(v), Some(s)) => days_between_ceil(v, s),
        _ => 0,
    }
}
