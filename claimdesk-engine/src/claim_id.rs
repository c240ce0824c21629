//! Content-derived claim identifiers.
//!
//! The id hashes the trade's identifying content (trade id, counterparty,
//! dates, notional) together with the category tags, so it does not move when
//! a batch is filtered, re-sorted, or re-fetched. Records without a trade id
//! still get distinct ids as long as any of that content differs. Rows that are
//! identical in every hashed field share an id.

use claimdesk_core::{CategoryTag, TradeRecord, join_labels};
use sha2::{Digest, Sha256};

const PREFIX: &str = "CLM-";
const HEX_LEN: usize = 12;

pub fn claim_id(trade: &TradeRecord, tags: &[CategoryTag]) -> String {
    let notional = trade.notional().map(|n| n.to_string()).unwrap_or_default();
    let parts = [
        trade.trade_id(),
        trade.counterparty(),
        trade.trade_date.as_deref().unwrap_or_default(),
        trade.value_date_raw().unwrap_or_default(),
        trade.settlement_date_raw().unwrap_or_default(),
        notional.as_str(),
    ];

    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"|");
    }
    hasher.update(join_labels(tags).as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{PREFIX}{}", &digest[..HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t1() -> TradeRecord {
        TradeRecord::new("T1")
            .with_counterparty("Acme Bank")
            .with_value_date("2024-01-17")
            .with_settlement_date("2024-01-20")
            .with_notional(1_500_000.0)
    }

    #[test]
    fn test_stable_and_prefixed() {
        let a = claim_id(&t1(), &[CategoryTag::FailedConfirmation]);
        let b = claim_id(&t1(), &[CategoryTag::FailedConfirmation]);
        assert_eq!(a, b);
        assert!(a.starts_with("CLM-"));
        assert_eq!(a.len(), 4 + 12);
        assert!(a[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_differs_by_trade_and_tags() {
        let base = claim_id(&t1(), &[CategoryTag::FailedConfirmation]);
        let t2 = TradeRecord { trade_id: Some("T2".into()), ..t1() };
        assert_ne!(base, claim_id(&t2, &[CategoryTag::FailedConfirmation]));
        assert_ne!(base, claim_id(&t1(), &[CategoryTag::NoIssues]));
    }

    #[test]
    fn test_records_without_trade_id_stay_distinct() {
        let tags = [CategoryTag::SettlementDelay];
        let a = TradeRecord::default()
            .with_counterparty("Acme Bank")
            .with_value_date("2024-01-17")
            .with_notional(500_000.0);
        let b = a.clone().with_notional(750_000.0);
        let c = TradeRecord { value_date: Some("2024-01-18".into()), ..a.clone() };
        let d = TradeRecord { counterparty: Some("Beta Corp".into()), ..a.clone() };

        let ids = [&a, &b, &c, &d].map(|t| claim_id(t, &tags));
        for (i, x) in ids.iter().enumerate() {
            for y in &ids[i + 1..] {
                assert_ne!(x, y);
            }
        }
        assert_eq!(claim_id(&a, &tags), ids[0]);
    }
}
