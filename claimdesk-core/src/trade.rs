//! Trade records as they arrive from uploads or document fetches.

use crate::status::ProcessStatus;
use serde::{Deserialize, Serialize};

/// Notional used when a record carries none.
pub const DEFAULT_FALLBACK_NOTIONAL: f64 = 1_000_000.0;

const UNKNOWN_TRADE_ID: &str = "UNKNOWN-TRADE";
const UNKNOWN_COUNTERPARTY: &str = "Unknown";

/// A flat, permissive trade record. Every field may be absent.
///
/// Dates are kept as the raw strings the source supplied so that parse
/// failures can be reported per record instead of being lost at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeRecord {
    pub trade_id: Option<String>,
    pub counterparty: Option<String>,
    pub trade_date: Option<String>,
    pub value_date: Option<String>,
    pub settlement_date: Option<String>,
    pub notional_amount: Option<f64>,
    pub pnl_calculated: Option<f64>,
    pub confirmation_status: Option<String>,
    pub expense_approval_status: Option<String>,
    pub cost_allocation_status: Option<String>,
}

impl TradeRecord {
    pub fn new(trade_id: impl Into<String>) -> Self {
        Self {
            trade_id: Some(trade_id.into()),
            ..Self::default()
        }
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    pub fn with_trade_date(mut self, date: impl Into<String>) -> Self {
        self.trade_date = Some(date.into());
        self
    }

    pub fn with_value_date(mut self, date: impl Into<String>) -> Self {
        self.value_date = Some(date.into());
        self
    }

    pub fn with_settlement_date(mut self, date: impl Into<String>) -> Self {
        self.settlement_date = Some(date.into());
        self
    }

    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional_amount = Some(notional);
        self
    }

    pub fn with_pnl(mut self, pnl: f64) -> Self {
        self.pnl_calculated = Some(pnl);
        self
    }

    pub fn with_confirmation(mut self, status: impl Into<String>) -> Self {
        self.confirmation_status = Some(status.into());
        self
    }

    pub fn with_expense_approval(mut self, status: impl Into<String>) -> Self {
        self.expense_approval_status = Some(status.into());
        self
    }

    pub fn with_cost_allocation(mut self, status: impl Into<String>) -> Self {
        self.cost_allocation_status = Some(status.into());
        self
    }

    /// Trade id, or a synthesized placeholder when blank
    pub fn trade_id(&self) -> &str {
        non_blank(&self.trade_id).unwrap_or(UNKNOWN_TRADE_ID)
    }

    pub fn has_trade_id(&self) -> bool {
        non_blank(&self.trade_id).is_some()
    }

    pub fn counterparty(&self) -> &str {
        non_blank(&self.counterparty).unwrap_or(UNKNOWN_COUNTERPARTY)
    }

    pub fn value_date_raw(&self) -> Option<&str> {
        non_blank(&self.value_date)
    }

    pub fn settlement_date_raw(&self) -> Option<&str> {
        non_blank(&self.settlement_date)
    }

    /// PnL, zero when absent or not a finite number
    pub fn pnl(&self) -> f64 {
        self.pnl_calculated.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Notional amount if present and finite
    pub fn notional(&self) -> Option<f64> {
        self.notional_amount.filter(|v| v.is_finite())
    }

    pub fn notional_or(&self, fallback: f64) -> f64 {
        self.notional().unwrap_or(fallback)
    }

    pub fn confirmation(&self) -> ProcessStatus {
        status_or_pending(&self.confirmation_status)
    }

    pub fn expense_approval(&self) -> ProcessStatus {
        status_or_pending(&self.expense_approval_status)
    }

    pub fn cost_allocation(&self) -> ProcessStatus {
        status_or_pending(&self.cost_allocation_status)
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn status_or_pending(v: &Option<String>) -> ProcessStatus {
    non_blank(v).map(ProcessStatus::parse).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_empty_record() {
        let r = TradeRecord::default();
        assert_eq!(r.trade_id(), "UNKNOWN-TRADE");
        assert!(!r.has_trade_id());
        assert_eq!(r.counterparty(), "Unknown");
        assert_eq!(r.pnl(), 0.0);
        assert_eq!(r.notional_or(DEFAULT_FALLBACK_NOTIONAL), 1_000_000.0);
        assert_eq!(r.confirmation(), ProcessStatus::Pending);
        assert_eq!(r.expense_approval(), ProcessStatus::Pending);
        assert_eq!(r.cost_allocation(), ProcessStatus::Pending);
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let r = TradeRecord::new("   ")
            .with_confirmation("")
            .with_value_date(" ");
        assert_eq!(r.trade_id(), "UNKNOWN-TRADE");
        assert_eq!(r.confirmation(), ProcessStatus::Pending);
        assert!(r.value_date_raw().is_none());
    }

    #[test]
    fn test_non_finite_numbers_fall_back() {
        let r = TradeRecord::new("T9").with_pnl(f64::NAN).with_notional(f64::INFINITY);
        assert_eq!(r.pnl(), 0.0);
        assert_eq!(r.notional_or(42.0), 42.0);
    }

    #[test]
    fn test_deserialize_camel_case_with_missing_fields() {
        let json = r#"{"tradeId":"T1","pnlCalculated":25000.0,"confirmationStatus":"Failed"}"#;
        let r: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.trade_id(), "T1");
        assert_eq!(r.pnl(), 25000.0);
        assert_eq!(r.confirmation(), ProcessStatus::Failed);
        assert!(r.settlement_date.is_none());
    }
}
