//! Header auto-mapping: one declarative synonym table from export headers
//! to canonical trade fields.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    TradeId,
    Counterparty,
    TradeDate,
    ValueDate,
    SettlementDate,
    NotionalAmount,
    PnlCalculated,
    ConfirmationStatus,
    ExpenseApprovalStatus,
    CostAllocationStatus,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 10] = [
        CanonicalField::TradeId,
        CanonicalField::Counterparty,
        CanonicalField::TradeDate,
        CanonicalField::ValueDate,
        CanonicalField::SettlementDate,
        CanonicalField::NotionalAmount,
        CanonicalField::PnlCalculated,
        CanonicalField::ConfirmationStatus,
        CanonicalField::ExpenseApprovalStatus,
        CanonicalField::CostAllocationStatus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::TradeId => "tradeId",
            CanonicalField::Counterparty => "counterparty",
            CanonicalField::TradeDate => "tradeDate",
            CanonicalField::ValueDate => "valueDate",
            CanonicalField::SettlementDate => "settlementDate",
            CanonicalField::NotionalAmount => "notionalAmount",
            CanonicalField::PnlCalculated => "pnlCalculated",
            CanonicalField::ConfirmationStatus => "confirmationStatus",
            CanonicalField::ExpenseApprovalStatus => "expenseApprovalStatus",
            CanonicalField::CostAllocationStatus => "costAllocationStatus",
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(
            self,
            CanonicalField::ConfirmationStatus
                | CanonicalField::ExpenseApprovalStatus
                | CanonicalField::CostAllocationStatus
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CanonicalField::NotionalAmount | CanonicalField::PnlCalculated)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized header synonyms, checked in table order.
/// Headers are compared after `normalize_header`.
pub const SYNONYMS: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::TradeId,
        &["tradeid", "traderef", "tradereference", "tradeno", "tradenumber", "dealid", "dealref", "id"],
    ),
    (
        CanonicalField::Counterparty,
        &["counterparty", "counterpartyname", "cpty", "client", "clientname", "broker"],
    ),
    (
        CanonicalField::TradeDate,
        &["tradedate", "dealdate", "executiondate", "tdate"],
    ),
    (
        CanonicalField::ValueDate,
        &["valuedate", "valdate", "expectedsettlementdate", "vdate"],
    ),
    (
        CanonicalField::SettlementDate,
        &["settlementdate", "actualsettlementdate", "settledate", "settleddate", "settlement", "sdate"],
    ),
    (
        CanonicalField::NotionalAmount,
        &["notionalamount", "notional", "principal", "nominal", "tradeamount", "amount"],
    ),
    (
        CanonicalField::PnlCalculated,
        &["pnlcalculated", "pnl", "calculatedpnl", "profitloss", "profitandloss", "pandl", "pl"],
    ),
    (
        CanonicalField::ConfirmationStatus,
        &["confirmationstatus", "confirmstatus", "confirmation", "tradeconfirmation"],
    ),
    (
        CanonicalField::ExpenseApprovalStatus,
        &["expenseapprovalstatus", "expenseapproval", "expensestatus", "approvalstatus"],
    ),
    (
        CanonicalField::CostAllocationStatus,
        &["costallocationstatus", "costallocation", "allocationstatus"],
    ),
];

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex"))
}

/// "Trade Ref #" -> "traderef", "P&L" -> "pl"
pub fn normalize_header(header: &str) -> String {
    non_alnum()
        .replace_all(&header.trim().to_lowercase(), "")
        .into_owned()
}

/// Which canonical field a single header maps to, if any
pub fn match_header(header: &str) -> Option<CanonicalField> {
    match_header_ranked(header).map(|(field, _)| field)
}

/// Like `match_header`, plus the synonym's position in its field's list.
/// Rank 0 is the canonical name; lower ranks are the more specific names.
pub fn match_header_ranked(header: &str) -> Option<(CanonicalField, usize)> {
    let norm = normalize_header(header);
    if norm.is_empty() {
        return None;
    }
    SYNONYMS.iter().find_map(|(field, names)| {
        names
            .iter()
            .position(|n| *n == norm)
            .map(|rank| (*field, rank))
    })
}

/// Column assignment for one header row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldMapping {
    columns: HashMap<CanonicalField, usize>,
    headers: Vec<String>,
}

impl FieldMapping {
    /// Map each canonical field to the first header that names it.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut columns = HashMap::new();
        for (idx, h) in headers.iter().enumerate() {
            if let Some(field) = match_header(h.as_ref()) {
                columns.entry(field).or_insert(idx);
            }
        }
        Self {
            columns,
            headers: headers.iter().map(|h| h.as_ref().trim().to_string()).collect(),
        }
    }

    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn header(&self, field: CanonicalField) -> Option<&str> {
        self.column(field).map(|i| self.headers[i].as_str())
    }

    pub fn mapped_count(&self) -> usize {
        self.columns.len()
    }

    /// A header row worth reading: names a trade id or any status column
    pub fn looks_like_trade_header(&self) -> bool {
        self.columns.contains_key(&CanonicalField::TradeId)
            || self.columns.keys().any(|f| f.is_status())
    }

    /// Headers no canonical field consumed, in source order
    pub fn unmapped(&self) -> Vec<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(i, h)| !h.is_empty() && !self.columns.values().any(|c| c == i))
            .map(|(_, h)| h.as_str())
            .collect()
    }

    /// Canonical fields with no source column
    pub fn missing(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|f| !self.columns.contains_key(f))
            .collect()
    }
}
