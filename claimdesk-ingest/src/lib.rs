//! claimdesk-ingest: CSV/JSON trade ingestion through a single header-synonym table.

pub mod amount;
mod builder;
pub mod mapping;
pub mod trades_csv;
pub mod trades_json;

pub use amount::parse_amount;
pub use builder::synthesized_trade_id;
pub use mapping::{
    CanonicalField, FieldMapping, SYNONYMS, match_header, match_header_ranked, normalize_header,
};
pub use trades_csv::{detect_csv_mapping, parse_trades_csv, read_trades_csv};
pub use trades_json::{parse_trades_json, read_trades_json};

use anyhow::Result;
use claimdesk_core::TradeRecord;
use std::path::Path;

/// Load trades from a `.json` file, or CSV for any other extension.
pub fn load_trades(path: impl AsRef<Path>) -> Result<Vec<TradeRecord>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        parse_trades_json(path)
    } else {
        parse_trades_csv(path)
    }
}
