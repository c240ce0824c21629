//! Deterministic claim rules: category tagging and claim direction.
//!
//! Both depend only on the three workflow statuses, the PnL sign, and the
//! SLA breach. Statuses compare case-insensitively via `ProcessStatus`.

use claimdesk_core::{CategoryTag, ClaimType, ProcessStatus, TradeRecord};

/// The three workflow statuses of a record, with missing values as Pending
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub confirmation: ProcessStatus,
    pub expense_approval: ProcessStatus,
    pub cost_allocation: ProcessStatus,
}

impl StatusSnapshot {
    pub fn of(trade: &TradeRecord) -> Self {
        Self {
            confirmation: trade.confirmation(),
            expense_approval: trade.expense_approval(),
            cost_allocation: trade.cost_allocation(),
        }
    }

    fn all(&self) -> [&ProcessStatus; 3] {
        [&self.confirmation, &self.expense_approval, &self.cost_allocation]
    }

    /// Any status Failed or Rejected
    pub fn has_issues(&self) -> bool {
        self.all().iter().any(|s| s.is_failure())
    }

    pub fn has_pending(&self) -> bool {
        self.all().iter().any(|s| s.is_pending())
    }
}

/// Tag a record. Every rule is evaluated independently and hits keep rule
/// order. Never empty: no hits yields `[NoIssues]`.
pub fn category_tags(status: &StatusSnapshot, sla_breach_days: i64, grace_days: i64) -> Vec<CategoryTag> {
    let mut tags = Vec::new();

    if status.confirmation == ProcessStatus::Failed {
        tags.push(CategoryTag::FailedConfirmation);
    }
    if status.expense_approval == ProcessStatus::Rejected {
        tags.push(CategoryTag::ExpenseRejected);
    }
    if status.cost_allocation == ProcessStatus::Failed {
        tags.push(CategoryTag::CostAllocationFailed);
    }
    if sla_breach_days > grace_days {
        tags.push(CategoryTag::SettlementDelay);
    }
    if status.has_pending() {
        tags.push(CategoryTag::PendingApproval);
    }

    if tags.is_empty() {
        tags.push(CategoryTag::NoIssues);
    }
    tags
}

/// Claim direction. First matching branch wins:
/// profit blocked by an issue or pending step is owed to the firm; a loss
/// with a failed or rejected cost allocation is owed by the firm.
pub fn claim_type(status: &StatusSnapshot, pnl: f64) -> ClaimType {
    if pnl > 0.0 && (status.has_issues() || status.has_pending()) {
        ClaimType::Receivable
    } else if pnl < 0.0 && status.cost_allocation.is_failure() {
        ClaimType::Payable
    } else {
        ClaimType::NotApplicable
    }
}
