//! Assemble a `TradeRecord` from mapped cells.

use claimdesk_core::TradeRecord;
use tracing::warn;

use crate::amount::parse_amount;
use crate::mapping::CanonicalField;

/// Id given to rows that carry no trade id: `ROW-0001` for the first data row
pub fn synthesized_trade_id(row: usize) -> String {
    format!("ROW-{:04}", row)
}

#[derive(Debug, Default)]
pub(crate) struct RecordBuilder {
    record: TradeRecord,
}

impl RecordBuilder {
    /// Set a field from its text form. The first non-blank value for a field
    /// wins; blank cells are ignored.
    pub(crate) fn set_text(&mut self, field: CanonicalField, raw: &str, row: usize) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }

        if field.is_numeric() {
            match parse_amount(value) {
                Some(v) => self.set_number(field, v),
                None => warn!(row, field = %field, value, "unparseable amount; leaving empty"),
            }
            return;
        }

        let slot = match field {
            CanonicalField::TradeId => &mut self.record.trade_id,
            CanonicalField::Counterparty => &mut self.record.counterparty,
            CanonicalField::TradeDate => &mut self.record.trade_date,
            CanonicalField::ValueDate => &mut self.record.value_date,
            CanonicalField::SettlementDate => &mut self.record.settlement_date,
            CanonicalField::ConfirmationStatus => &mut self.record.confirmation_status,
            CanonicalField::ExpenseApprovalStatus => &mut self.record.expense_approval_status,
            CanonicalField::CostAllocationStatus => &mut self.record.cost_allocation_status,
            CanonicalField::NotionalAmount | CanonicalField::PnlCalculated => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    pub(crate) fn set_number(&mut self, field: CanonicalField, value: f64) {
        if !value.is_finite() {
            return;
        }
        let slot = match field {
            CanonicalField::NotionalAmount => &mut self.record.notional_amount,
            CanonicalField::PnlCalculated => &mut self.record.pnl_calculated,
            // Numbers in text columns (ids, Excel date serials) keep their text form
            other => {
                let text = if value.fract() == 0.0 {
                    format!("{value:.0}")
                } else {
                    value.to_string()
                };
                self.set_text(other, &text, 0);
                return;
            }
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.record == TradeRecord::default()
    }

    pub(crate) fn finish(mut self, row: usize) -> TradeRecord {
        if !self.record.has_trade_id() {
            self.record.trade_id = Some(synthesized_trade_id(row));
        }
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins_and_blanks_ignored() {
        let mut b = RecordBuilder::default();
        b.set_text(CanonicalField::Counterparty, "  ", 1);
        b.set_text(CanonicalField::Counterparty, "Acme Bank", 1);
        b.set_text(CanonicalField::Counterparty, "Other", 1);
        let r = b.finish(1);
        assert_eq!(r.counterparty(), "Acme Bank");
    }

    #[test]
    fn test_numeric_text_is_parsed() {
        let mut b = RecordBuilder::default();
        b.set_text(CanonicalField::NotionalAmount, "$1,500,000", 1);
        b.set_text(CanonicalField::PnlCalculated, "(300.50)", 1);
        let r = b.finish(1);
        assert_eq!(r.notional_amount, Some(1_500_000.0));
        assert_eq!(r.pnl_calculated, Some(-300.5));
    }

    #[test]
    fn test_numbers_in_text_fields_keep_text_form() {
        let mut b = RecordBuilder::default();
        b.set_number(CanonicalField::TradeId, 1042.0);
        b.set_number(CanonicalField::ValueDate, 45308.0);
        let r = b.finish(7);
        assert_eq!(r.trade_id(), "1042");
        assert_eq!(r.value_date.as_deref(), Some("45308"));
    }

    #[test]
    fn test_large_integral_ids_are_not_truncated() {
        let mut b = RecordBuilder::default();
        b.set_number(CanonicalField::TradeId, 1e19);
        assert_eq!(b.finish(1).trade_id(), "10000000000000000000");
    }

    #[test]
    fn test_missing_trade_id_is_synthesized() {
        let mut b = RecordBuilder::default();
        assert!(b.is_empty());
        b.set_text(CanonicalField::ConfirmationStatus, "Failed", 3);
        assert!(!b.is_empty());
        assert_eq!(b.finish(3).trade_id(), "ROW-0003");
    }
}
