//! Parse trade blotter CSV exports into `TradeRecord`s.
//!
//! Exports often carry a title block before the real header, so the header
//! is the first row whose cells map a trade id or a status column.

use anyhow::{Context, Result, bail};
use claimdesk_core::TradeRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::builder::RecordBuilder;
use crate::mapping::{CanonicalField, FieldMapping};

/// Parse a CSV file from disk.
pub fn parse_trades_csv(path: impl AsRef<Path>) -> Result<Vec<TradeRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_trades_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse CSV from any reader.
pub fn read_trades_csv<R: Read>(reader: R) -> Result<Vec<TradeRecord>> {
    let (mapping, rows) = read_rows(reader)?;
    let Some(mapping) = mapping else {
        bail!("no trade header row found (expected a trade id or status column)");
    };

    let mut trades = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row_no = i + 1;
        let mut builder = RecordBuilder::default();
        for field in CanonicalField::ALL {
            if let Some(cell) = mapping.column(field).and_then(|c| row.get(c)) {
                builder.set_text(field, cell, row_no);
            }
        }
        trades.push(builder.finish(row_no));
    }

    info!(count = trades.len(), "parsed trades from CSV");
    Ok(trades)
}

/// Detect the header mapping of a CSV file without building records.
pub fn detect_csv_mapping(path: impl AsRef<Path>) -> Result<FieldMapping> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let (mapping, _) = read_rows(file).with_context(|| format!("parsing {}", path.display()))?;
    mapping.with_context(|| format!("no trade header row found in {}", path.display()))
}

/// Header mapping plus the non-blank data rows after it
fn read_rows<R: Read>(reader: R) -> Result<(Option<FieldMapping>, Vec<csv::StringRecord>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut mapping: Option<FieldMapping> = None;
    let mut rows = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {}", line + 1))?;
        if record.iter().all(|c| c.is_empty()) {
            continue;
        }

        if mapping.is_none() {
            let candidate = FieldMapping::detect(&record.iter().collect::<Vec<_>>());
            if candidate.looks_like_trade_header() {
                debug!(line = line + 1, mapped = candidate.mapped_count(), "header row found");
                mapping = Some(candidate);
            } else {
                debug!(line = line + 1, "skipping preamble row");
            }
            continue;
        }

        rows.push(record);
    }

    Ok((mapping, rows))
}
