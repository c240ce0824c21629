//! Claim KPIs: totals per claim direction, per category, and per counterparty.

use claimdesk_core::{CategoryTag, ClaimType, ClassificationResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Count and totals for one claim direction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimBucket {
    pub count: usize,
    pub total_interest: f64,
    pub total_pnl: f64,
}

impl ClaimBucket {
    fn add(&mut self, r: &ClassificationResult) {
        self.count += 1;
        self.total_interest += r.interest_amount;
        self.total_pnl += r.pnl;
    }
}

/// Interest accrued against one counterparty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartyExposure {
    pub counterparty: String,
    pub claims: usize,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSummary {
    pub total_records: usize,
    pub receivable: ClaimBucket,
    pub payable: ClaimBucket,
    pub not_applicable: usize,
    /// Tag counts in rule order
    pub by_category: BTreeMap<CategoryTag, usize>,
    /// Sorted by total interest, largest first
    pub by_counterparty: Vec<CounterpartyExposure>,
    pub total_interest: f64,
    pub records_with_warnings: usize,
    pub max_sla_breach_days: i64,
}

impl ClaimSummary {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let mut summary = ClaimSummary {
            total_records: results.len(),
            ..Self::default()
        };
        let mut exposure: HashMap<&str, (usize, f64)> = HashMap::new();

        for r in results {
            match r.claim_type {
                ClaimType::Receivable => summary.receivable.add(r),
                ClaimType::Payable => summary.payable.add(r),
                ClaimType::NotApplicable => summary.not_applicable += 1,
            }

            for tag in &r.category_labels {
                *summary.by_category.entry(*tag).or_insert(0) += 1;
            }

            if r.is_claim() {
                let e = exposure.entry(r.counterparty.as_str()).or_insert((0, 0.0));
                e.0 += 1;
                e.1 += r.interest_amount;
            }

            summary.total_interest += r.interest_amount;
            if r.has_warnings() {
                summary.records_with_warnings += 1;
            }
            summary.max_sla_breach_days = summary.max_sla_breach_days.max(r.sla_breach_days);
        }

        let mut by_counterparty: Vec<CounterpartyExposure> = exposure
            .into_iter()
            .map(|(cpty, (claims, total_interest))| CounterpartyExposure {
                counterparty: cpty.to_string(),
                claims,
                total_interest,
            })
            .collect();
        by_counterparty.sort_by(|a, b| {
            b.total_interest
                .total_cmp(&a.total_interest)
                .then_with(|| a.counterparty.cmp(&b.counterparty))
        });
        summary.by_counterparty = by_counterparty;

        summary
    }

    pub fn claim_count(&self) -> usize {
        self.receivable.count + self.payable.count
    }

    /// Receivable minus payable interest
    pub fn net_interest(&self) -> f64 {
        self.receivable.total_interest - self.payable.total_interest
    }

    pub fn category_count(&self, tag: CategoryTag) -> usize {
        self.by_category.get(&tag).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ClaimEngine;
    use crate::interest::FlatRate;
    use claimdesk_core::TradeRecord;

    fn sample() -> Vec<ClassificationResult> {
        let trades = vec![
            TradeRecord::new("R1")
                .with_counterparty("Acme")
                .with_pnl(1000.0)
                .with_confirmation("Failed")
                .with_expense_approval("Approved")
                .with_cost_allocation("Allocated")
                .with_value_date("2024-01-17")
                .with_settlement_date("2024-01-22")
                .with_notional(1_000_000.0),
            TradeRecord::new("R2")
                .with_counterparty("Beta")
                .with_pnl(50.0)
                .with_confirmation("Confirmed")
                .with_expense_approval("Pending")
                .with_cost_allocation("Allocated")
                .with_value_date("2024-01-17")
                .with_settlement_date("2024-01-20")
                .with_notional(2_000_000.0),
            TradeRecord::new("P1")
                .with_counterparty("Acme")
                .with_pnl(-300.0)
                .with_confirmation("Confirmed")
                .with_expense_approval("Approved")
                .with_cost_allocation("Failed")
                .with_value_date("2024-01-17")
                .with_settlement_date("2024-01-17")
                .with_notional(500_000.0),
            TradeRecord::new("N1")
                .with_counterparty("Gamma")
                .with_pnl(10.0)
                .with_confirmation("Confirmed")
                .with_expense_approval("Approved")
                .with_cost_allocation("Allocated"),
        ];
        ClaimEngine::new(Default::default(), FlatRate(0.05)).classify_all(&trades)
    }

    #[test]
    fn test_buckets_add_up() {
        let s = ClaimSummary::from_results(&sample());
        assert_eq!(s.total_records, 4);
        assert_eq!(s.receivable.count, 2);
        assert_eq!(s.payable.count, 1);
        assert_eq!(s.not_applicable, 1);
        assert_eq!(s.claim_count() + s.not_applicable, s.total_records);
        assert_eq!(s.payable.total_pnl, -300.0);
    }

    #[test]
    fn test_category_counts() {
        let s = ClaimSummary::from_results(&sample());
        assert_eq!(s.category_count(CategoryTag::FailedConfirmation), 1);
        assert_eq!(s.category_count(CategoryTag::SettlementDelay), 2);
        assert_eq!(s.category_count(CategoryTag::PendingApproval), 1);
        assert_eq!(s.category_count(CategoryTag::CostAllocationFailed), 1);
        assert_eq!(s.category_count(CategoryTag::NoIssues), 1);
        assert_eq!(s.category_count(CategoryTag::ExpenseRejected), 0);
    }

    #[test]
    fn test_interest_totals_and_exposure_order() {
        let results = sample();
        let s = ClaimSummary::from_results(&results);
        let sum: f64 = results.iter().map(|r| r.interest_amount).sum();
        assert!((s.total_interest - sum).abs() < 1e-9);
        assert_eq!(s.max_sla_breach_days, 5);

        // Beta: 2m * 3d accrues more than Acme: 1m * 5d
        assert_eq!(s.by_counterparty[0].counterparty, "Beta");
        assert_eq!(s.by_counterparty[1].counterparty, "Acme");
        assert_eq!(s.by_counterparty[1].claims, 2);
        assert!(s.by_counterparty.iter().all(|e| e.counterparty != "Gamma"));
        assert!(s.net_interest() > 0.0);
    }

    #[test]
    fn test_warnings_counted() {
        let s = ClaimSummary::from_results(&sample());
        // N1 has no dates and no notional
        assert_eq!(s.records_with_warnings, 1);
    }

    #[test]
    fn test_empty_summary() {
        let s = ClaimSummary::from_results(&[]);
        assert_eq!(s.total_records, 0);
        assert_eq!(s.total_interest, 0.0);
        assert!(s.by_counterparty.is_empty());
    }
}
