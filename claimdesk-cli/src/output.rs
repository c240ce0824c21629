//! Rendering of classification results and summaries.

use anyhow::{Context, Result};
use claimdesk_core::ClassificationResult;
use claimdesk_engine::ClaimSummary;
use claimdesk_ingest::{CanonicalField, FieldMapping};
use serde::Serialize;
use std::io::Write;

/// Flat CSV row for a classification result
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    claim_id: &'a str,
    trade_id: &'a str,
    counterparty: &'a str,
    claim_type: &'static str,
    categories: String,
    sla_breach_days: i64,
    interest_rate: f64,
    interest_amount: String,
    notional_amount: f64,
    pnl: f64,
    warnings: String,
}

impl<'a> From<&'a ClassificationResult> for ResultRow<'a> {
    fn from(r: &'a ClassificationResult) -> Self {
        Self {
            claim_id: &r.claim_id,
            trade_id: &r.trade_id,
            counterparty: &r.counterparty,
            claim_type: r.claim_type.as_str(),
            categories: r.category_label(),
            sla_breach_days: r.sla_breach_days,
            interest_rate: r.interest_rate,
            interest_amount: format!("{:.2}", r.interest_amount),
            notional_amount: r.notional_amount,
            pnl: r.pnl,
            warnings: r
                .warnings
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

pub fn write_csv(results: &[ClassificationResult], out: impl Write) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for r in results {
        wtr.serialize(ResultRow::from(r)).context("write CSV row")?;
    }
    wtr.flush().context("flush CSV")?;
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, mut out: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value).context("serialize JSON")?;
    writeln!(out)?;
    out.flush().context("flush JSON")?;
    Ok(())
}

pub fn write_table(results: &[ClassificationResult], mut out: impl Write) -> Result<()> {
    writeln!(
        out,
        "{:<16} {:<12} {:<20} {:<10} {:>6} {:>14}  categories",
        "claim", "trade", "counterparty", "type", "sla", "interest"
    )?;
    for r in results {
        writeln!(
            out,
            "{:<16} {:<12} {:<20} {:<10} {:>5}d {:>14.2}  {}{}",
            r.claim_id,
            truncate(&r.trade_id, 12),
            truncate(&r.counterparty, 20),
            r.claim_type,
            r.sla_breach_days,
            r.interest_amount,
            r.category_label(),
            if r.has_warnings() { "  (!)" } else { "" }
        )?;
    }

    let flagged: Vec<_> = results.iter().filter(|r| r.has_warnings()).collect();
    if !flagged.is_empty() {
        writeln!(out, "\nData warnings:")?;
        for r in flagged {
            for w in &r.warnings {
                writeln!(out, "- {}: {}", r.trade_id, w)?;
            }
        }
    }
    out.flush().context("flush table")?;
    Ok(())
}

pub fn write_summary(s: &ClaimSummary, mut out: impl Write) -> Result<()> {
    writeln!(out, "Records: {} (claims: {}, n/a: {})", s.total_records, s.claim_count(), s.not_applicable)?;
    writeln!(
        out,
        "Receivable: {} | interest=${:.2} | pnl=${:.2}",
        s.receivable.count, s.receivable.total_interest, s.receivable.total_pnl
    )?;
    writeln!(
        out,
        "Payable:    {} | interest=${:.2} | pnl=${:.2}",
        s.payable.count, s.payable.total_interest, s.payable.total_pnl
    )?;
    writeln!(out, "Total interest: ${:.2} (net ${:.2})", s.total_interest, s.net_interest())?;
    writeln!(out, "Max SLA breach: {} days", s.max_sla_breach_days)?;
    writeln!(out, "Records with data warnings: {}", s.records_with_warnings)?;

    writeln!(out, "\nBy category:")?;
    for (tag, count) in &s.by_category {
        writeln!(out, "- {tag}: {count}")?;
    }

    if !s.by_counterparty.is_empty() {
        writeln!(out, "\nBy counterparty:")?;
        for e in &s.by_counterparty {
            writeln!(out, "- {} | claims={} | interest=${:.2}", e.counterparty, e.claims, e.total_interest)?;
        }
    }
    Ok(())
}

pub fn write_mapping(m: &FieldMapping, mut out: impl Write) -> Result<()> {
    writeln!(out, "Mapped fields:")?;
    for field in CanonicalField::ALL {
        if let Some(header) = m.header(field) {
            writeln!(out, "- {field} <- \"{header}\"")?;
        }
    }

    let missing = m.missing();
    if !missing.is_empty() {
        writeln!(out, "\nMissing fields (defaults apply):")?;
        for field in missing {
            writeln!(out, "- {field}")?;
        }
    }

    let unmapped = m.unmapped();
    if !unmapped.is_empty() {
        writeln!(out, "\nIgnored columns:")?;
        for h in unmapped {
            writeln!(out, "- {h}")?;
        }
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('~');
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdesk_core::TradeRecord;
    use std::io;

    /// Accepts writes but fails on flush, like a full disk behind a BufWriter
    struct FlushFails(Vec<u8>);

    impl Write for FlushFails {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    fn sample() -> Vec<ClassificationResult> {
        let trades = vec![
            TradeRecord::new("T1")
                .with_counterparty("Acme Bank")
                .with_pnl(25000.0)
                .with_confirmation("Failed")
                .with_expense_approval("Approved")
                .with_cost_allocation("Allocated")
                .with_value_date("2024-01-17")
                .with_settlement_date("2024-01-20")
                .with_notional(1_500_000.0),
            TradeRecord::new("T2").with_pnl(-10.0).with_cost_allocation("Rejected"),
        ];
        claimdesk_engine::classify_all(&trades)
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("claim_id,trade_id,counterparty,claim_type,categories"));
        assert!(lines[1].contains("Receivable"));
        assert!(lines[1].contains("\"Failed Confirmation, Settlement Delay\""));
        assert!(lines[1].contains("616.44"));
        assert!(lines[2].contains("Payable"));
        assert!(lines[2].contains("value date missing"));
    }

    #[test]
    fn test_table_lists_warnings() {
        let mut buf = Vec::new();
        write_table(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Data warnings:"));
        assert!(text.contains("- T2: value date missing"));
        assert!(!text.contains("- T1:"));
    }

    #[test]
    fn test_summary_mentions_buckets() {
        let mut buf = Vec::new();
        write_summary(&ClaimSummary::from_results(&sample()), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Records: 2 (claims: 2, n/a: 0)"));
        assert!(text.contains("- Failed Confirmation: 1"));
        assert!(text.contains("- Acme Bank | claims=1"));
    }

    #[test]
    fn test_mapping_report() {
        let m = FieldMapping::detect(&["Trade ID", "Desk", "PnL"]);
        let mut buf = Vec::new();
        write_mapping(&m, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("- tradeId <- \"Trade ID\""));
        assert!(text.contains("- pnlCalculated <- \"PnL\""));
        assert!(text.contains("- valueDate"));
        assert!(text.contains("Ignored columns:\n- Desk"));
    }

    #[test]
    fn test_flush_errors_are_reported() {
        let results = sample();
        assert!(write_table(&results, FlushFails(Vec::new())).is_err());
        assert!(write_json(&results, FlushFails(Vec::new())).is_err());
        assert!(write_csv(&results, FlushFails(Vec::new())).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 12), "short");
        assert_eq!(truncate("Delta Partners International", 10), "Delta Par~");
    }
}
