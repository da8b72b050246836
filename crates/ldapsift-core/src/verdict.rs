//! Success/failure verdict from detected milestones.

use std::fmt;

use serde::Serialize;

use crate::detectors::{Milestone, SignalSet};

/// Milestones that must all be present for a successful search.
///
/// `SearchDone` is reported but not required.
pub const REQUIRED_MILESTONES: [Milestone; 3] = [
    Milestone::SearchRequest,
    Milestone::TcpResponse,
    Milestone::SearchEntry,
];

/// Overall classification of a capture log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Success,
    Failure,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Success => "success",
            Verdict::Failure => "failure",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Verdict::Success)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Verdict {
    fn from(success: bool) -> Self {
        if success {
            Verdict::Success
        } else {
            Verdict::Failure
        }
    }
}

/// Resolve the verdict from independent, order-insensitive signals
pub fn resolve(signals: &SignalSet) -> Verdict {
    REQUIRED_MILESTONES
        .iter()
        .all(|milestone| signals.get(*milestone))
        .into()
}
