//! Parse JSON document dumps into `TradeRecord`s.
//!
//! Accepted shapes:
//! - an array of flat objects
//! - an object wrapping that array under `trades`, `records`, or `data`
//! - an object keyed by document id (the key becomes the trade id when the
//!   document has none)

use anyhow::{Context, Result, bail};
use claimdesk_core::TradeRecord;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::builder::RecordBuilder;
use crate::mapping::{CanonicalField, match_header_ranked};

const WRAPPER_KEYS: &[&str] = &["trades", "records", "data"];

pub fn parse_trades_json(path: impl AsRef<Path>) -> Result<Vec<TradeRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_trades_json(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_trades_json<R: Read>(reader: R) -> Result<Vec<TradeRecord>> {
    let root: Value = serde_json::from_reader(reader).context("invalid JSON")?;

    let docs: Vec<(Option<String>, &Map<String, Value>)> = match &root {
        Value::Array(items) => objects(items.iter().map(|v| (None, v)))?,
        Value::Object(obj) => match WRAPPER_KEYS.iter().find_map(|k| obj.get(*k)) {
            Some(Value::Array(items)) => objects(items.iter().map(|v| (None, v)))?,
            Some(_) => bail!("expected an array under the wrapper key"),
            None => objects(obj.iter().map(|(k, v)| (Some(k.clone()), v)))?,
        },
        _ => bail!("expected a JSON array or object of trade documents"),
    };

    let trades: Vec<TradeRecord> = docs
        .into_iter()
        .enumerate()
        .map(|(i, (doc_id, obj))| record_from_object(obj, doc_id.as_deref(), i + 1))
        .collect();

    info!(count = trades.len(), "parsed trades from JSON");
    Ok(trades)
}

fn objects<'a>(
    items: impl Iterator<Item = (Option<String>, &'a Value)>,
) -> Result<Vec<(Option<String>, &'a Map<String, Value>)>> {
    items
        .enumerate()
        .map(|(i, (id, v))| match v {
            Value::Object(obj) => Ok((id, obj)),
            other => bail!("document {} is not an object: {}", i + 1, type_name(other)),
        })
        .collect()
}

/// Object keys carry no column order, so when several keys map to one field
/// the most specific synonym is offered first: `tradeId` beats `id`.
fn record_from_object(obj: &Map<String, Value>, doc_id: Option<&str>, row: usize) -> TradeRecord {
    let mut keys: Vec<(CanonicalField, usize, &Value)> = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        match match_header_ranked(key) {
            Some((field, rank)) => keys.push((field, rank, value)),
            None => debug!(row, key = key.as_str(), "ignoring unmapped key"),
        }
    }
    keys.sort_by_key(|&(_, rank, _)| rank);

    let mut builder = RecordBuilder::default();
    for (field, _, value) in keys {
        match value {
            Value::String(s) => builder.set_text(field, s, row),
            Value::Number(n) => {
                if let Some(v) = n.as_f64() {
                    builder.set_number(field, v);
                }
            }
            _ => {}
        }
    }
    if let Some(id) = doc_id {
        builder.set_text(CanonicalField::TradeId, id, row);
    }
    builder.finish(row)
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
