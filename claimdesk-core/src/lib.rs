//! claimdesk-core: trade records, claim classification types, and date handling

pub mod claim;
pub mod dates;
pub mod status;
pub mod trade;

pub use claim::{CategoryTag, ClaimType, ClassificationResult, DataWarning, StatusField, join_labels};
pub use dates::{days_between_ceil, parse_trade_date};
pub use status::ProcessStatus;
pub use trade::{DEFAULT_FALLBACK_NOTIONAL, TradeRecord};
