//! Claim classification output types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim direction from the firm's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    /// The firm is owed money
    Receivable,
    /// The firm owes money
    Payable,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Receivable => "Receivable",
            ClaimType::Payable => "Payable",
            ClaimType::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Rule hits attached to a record. Declaration order is the tagging order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryTag {
    #[serde(rename = "Failed Confirmation")]
    FailedConfirmation,
    #[serde(rename = "Expense Rejected")]
    ExpenseRejected,
    #[serde(rename = "Cost Allocation Failed")]
    CostAllocationFailed,
    #[serde(rename = "Settlement Delay")]
    SettlementDelay,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    #[serde(rename = "No Issues")]
    NoIssues,
}

impl CategoryTag {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTag::FailedConfirmation => "Failed Confirmation",
            CategoryTag::ExpenseRejected => "Expense Rejected",
            CategoryTag::CostAllocationFailed => "Cost Allocation Failed",
            CategoryTag::SettlementDelay => "Settlement Delay",
            CategoryTag::PendingApproval => "Pending Approval",
            CategoryTag::NoIssues => "No Issues",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Join tags for display: "Failed Confirmation, Settlement Delay"
pub fn join_labels(tags: &[CategoryTag]) -> String {
    tags.iter().map(CategoryTag::label).collect::<Vec<_>>().join(", ")
}

/// Which of the three workflow status columns a warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusField {
    Confirmation,
    ExpenseApproval,
    CostAllocation,
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusField::Confirmation => "confirmation status",
            StatusField::ExpenseApproval => "expense approval status",
            StatusField::CostAllocation => "cost allocation status",
        })
    }
}

/// Data-quality diagnostics. A warning never changes the classification
/// rules; it records where a default was substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    MissingTradeId,
    MissingValueDate,
    MissingSettlementDate,
    UnparseableValueDate { raw: String },
    UnparseableSettlementDate { raw: String },
    NotionalFallback { used: f64 },
    UnrecognizedStatus { field: StatusField, value: String },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::MissingTradeId => write!(f, "trade id missing"),
            DataWarning::MissingValueDate => write!(f, "value date missing; SLA breach set to 0"),
            DataWarning::MissingSettlementDate => {
                write!(f, "settlement date missing; SLA breach set to 0")
            }
            DataWarning::UnparseableValueDate { raw } => {
                write!(f, "value date '{raw}' not recognized; SLA breach set to 0")
            }
            DataWarning::UnparseableSettlementDate { raw } => {
                write!(f, "settlement date '{raw}' not recognized; SLA breach set to 0")
            }
            DataWarning::NotionalFallback { used } => {
                write!(f, "notional missing; using fallback {used:.2}")
            }
            DataWarning::UnrecognizedStatus { field, value } => {
                write!(f, "{field} '{value}' not recognized")
            }
        }
    }
}

/// Result of classifying one trade record. Derived on demand; never the
/// source of truth for anything persisted downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub claim_id: String,
    pub trade_id: String,
    pub counterparty: String,
    pub claim_type: ClaimType,
    /// Never empty; `[NoIssues]` when no rule fired
    pub category_labels: Vec<CategoryTag>,
    /// Settlement date minus value date, in days (may be negative)
    pub sla_breach_days: i64,
    /// Annual rate applied to the breach, as a fraction
    pub interest_rate: f64,
    pub interest_amount: f64,
    pub notional_amount: f64,
    pub pnl: f64,
    #[serde(default)]
    pub warnings: Vec<DataWarning>,
}

impl ClassificationResult {
    /// True for Receivable or Payable
    pub fn is_claim(&self) -> bool {
        self.claim_type != ClaimType::NotApplicable
    }

    pub fn category_label(&self) -> String {
        join_labels(&self.category_labels)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_tag(&self, tag: CategoryTag) -> bool {
        self.category_labels.contains(&tag)
    }
}
