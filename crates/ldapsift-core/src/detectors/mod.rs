//! Milestone probes for LDAP search sessions.
//!
//! Each probe is a named regex scanned once over the whole capture log.
//! Only the existence of a match matters, not its count or position.

mod common;

pub(crate) use common::{line_of, truncate_snippet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

/// Protocol milestone a probe detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Milestone {
    /// Client issued a search request
    SearchRequest,
    /// Transport-layer evidence that a response was received or reassembled
    TcpResponse,
    /// Server returned at least one result entry
    SearchEntry,
    /// Server signalled completion, successful or not
    SearchDone,
}

impl Milestone {
    /// All milestones in protocol (and report) order
    pub const ALL: [Milestone; 4] = [
        Milestone::SearchRequest,
        Milestone::TcpResponse,
        Milestone::SearchEntry,
        Milestone::SearchDone,
    ];

    /// Probe name used as the report key
    pub fn name(self) -> &'static str {
        self.probe().name
    }

    /// The probe declared for this milestone
    pub fn probe(self) -> &'static Probe {
        &PROBES[self as usize]
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named pattern rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub milestone: Milestone,
    /// Unique, non-empty key in the report
    pub name: &'static str,
    /// Regex source, compiled with dot-matches-newline
    pub pattern: &'static str,
}

/// Probe table, in declaration order (which is also report field order)
pub static PROBES: [Probe; 4] = [
    Probe {
        milestone: Milestone::SearchRequest,
        name: "search_request",
        pattern: r"LDAPMessage searchRequest",
    },
    Probe {
        milestone: Milestone::TcpResponse,
        name: "tcp_response",
        // Bounded digit count keeps the length probe cheap on long numeric runs
        pattern: r"Reassembled TCP Segments|Len: \d{3,6}",
    },
    Probe {
        milestone: Milestone::SearchEntry,
        name: "search_entry",
        pattern: r"LDAPMessage searchResEntry",
    },
    Probe {
        milestone: Milestone::SearchDone,
        name: "search_done",
        pattern: r"searchResDone|resultCode",
    },
];

static COMPILED: Lazy<Vec<Regex>> = Lazy::new(|| {
    PROBES
        .iter()
        .map(|probe| Regex::new(&format!("(?s){}", probe.pattern)).unwrap())
        .collect()
});

/// Compiled regex for a milestone's probe
pub(crate) fn probe_regex(milestone: Milestone) -> &'static Regex {
    &COMPILED[milestone as usize]
}

/// Result of every declared probe for one capture log
///
/// Always holds exactly one boolean per entry in [`PROBES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SignalSet {
    hits: [bool; 4],
}

impl SignalSet {
    /// Build a signal set from a per-milestone predicate
    pub fn from_fn(mut f: impl FnMut(Milestone) -> bool) -> Self {
        let mut hits = [false; 4];
        for milestone in Milestone::ALL {
            hits[milestone as usize] = f(milestone);
        }
        Self { hits }
    }

    /// Whether the given milestone was detected
    pub fn get(&self, milestone: Milestone) -> bool {
        self.hits[milestone as usize]
    }

    /// Iterate `(probe, detected)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static Probe, bool)> + '_ {
        PROBES.iter().map(|probe| (probe, self.get(probe.milestone)))
    }

    /// Number of detected milestones
    pub fn count(&self) -> usize {
        self.hits.iter().filter(|hit| **hit).count()
    }
}

/// Evaluate every probe against the full capture log
pub fn detect_signals(text: &str) -> SignalSet {
    SignalSet::from_fn(|milestone| {
        let probe = milestone.probe();
        match probe_regex(milestone).find(text) {
            Some(m) => {
                debug!(
                    probe = probe.name,
                    line = line_of(text, m.start()),
                    matched = %truncate_snippet(m.as_str(), 80),
                    "Probe matched"
                );
                true
            }
            None => {
                trace!(probe = probe.name, "Probe did not match");
                false
            }
        }
    })
}
