//! Ordered milestone tracking.
//!
//! The default verdict treats milestones as independent flags. This module
//! checks that they also occur in protocol order: request, then transport
//! response, then entry, then done. It changes which logs count as a success
//! and is only used when strict ordering is requested.

use tracing::trace;

use crate::detectors::{probe_regex, Milestone};
use crate::verdict::Verdict;

/// Progress through a search exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SequenceState {
    Idle,
    RequestSeen,
    ResponseSeen,
    EntrySeen,
    Done,
}

impl SequenceState {
    /// Milestone that moves this state forward, if any
    pub fn next_milestone(self) -> Option<Milestone> {
        match self {
            SequenceState::Idle => Some(Milestone::SearchRequest),
            SequenceState::RequestSeen => Some(Milestone::TcpResponse),
            SequenceState::ResponseSeen => Some(Milestone::SearchEntry),
            SequenceState::EntrySeen => Some(Milestone::SearchDone),
            SequenceState::Done => None,
        }
    }

    fn advance(self) -> Self {
        match self {
            SequenceState::Idle => SequenceState::RequestSeen,
            SequenceState::RequestSeen => SequenceState::ResponseSeen,
            SequenceState::ResponseSeen => SequenceState::EntrySeen,
            SequenceState::EntrySeen | SequenceState::Done => SequenceState::Done,
        }
    }

    /// An entry reached in order is a success; done stays informational
    pub fn verdict(self) -> Verdict {
        (self >= SequenceState::EntrySeen).into()
    }
}

/// Walk the log, requiring each milestone after the end of the previous one
pub fn track_sequence(text: &str) -> SequenceState {
    let mut state = SequenceState::Idle;
    let mut pos = 0;

    while let Some(milestone) = state.next_milestone() {
        let Some(m) = probe_regex(milestone).find_at(text, pos) else {
            break;
        };
        trace!(milestone = %milestone, offset = m.start(), "Sequence advanced");
        pos = m.end();
        state = state.advance();
    }

    state
}
