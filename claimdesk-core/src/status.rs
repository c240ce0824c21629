//! Processing status vocabulary shared by confirmation, expense approval,
//! and cost allocation fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A workflow status, parsed case-insensitively.
///
/// Free text that matches none of the known labels is kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    Confirmed,
    Approved,
    Allocated,
    #[default]
    Pending,
    UnderReview,
    Failed,
    Rejected,
    Other(String),
}

impl ProcessStatus {
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        match s.to_ascii_lowercase().as_str() {
            "confirmed" => ProcessStatus::Confirmed,
            "approved" => ProcessStatus::Approved,
            "allocated" => ProcessStatus::Allocated,
            "pending" => ProcessStatus::Pending,
            "under review" | "under_review" | "underreview" => ProcessStatus::UnderReview,
            "failed" => ProcessStatus::Failed,
            "rejected" => ProcessStatus::Rejected,
            _ => ProcessStatus::Other(s.to_string()),
        }
    }

    /// Failed or Rejected
    pub fn is_failure(&self) -> bool {
        matches!(self, ProcessStatus::Failed | ProcessStatus::Rejected)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ProcessStatus::Pending)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ProcessStatus::Other(_))
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProcessStatus::Confirmed => "Confirmed",
            ProcessStatus::Approved => "Approved",
            ProcessStatus::Allocated => "Allocated",
            ProcessStatus::Pending => "Pending",
            ProcessStatus::UnderReview => "Under Review",
            ProcessStatus::Failed => "Failed",
            ProcessStatus::Rejected => "Rejected",
            ProcessStatus::Other(s) => s.as_str(),
        };
        f.pad(label)
    }
}
