//! LDAP search session classifier.
//!
//! Text in, [`VerdictReport`] out. Every call is independent and holds no
//! state, so the same log always produces the same report.


use tracing::debug;

use crate::detectors::detect_signals;
use crate::entries::extract_entries;
use crate::report::VerdictReport;
use crate::sequence::track_sequence;
use crate::verdict::resolve;

/// Options for a classification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Require milestones in protocol order instead of anywhere in the log.
    ///
    /// Changes the verdict for logs whose markers are out of order.
    pub strict_order: bool,
}

/// Classify a capture log with default (order-insensitive) rules
pub fn classify(log_text: &str) -> VerdictReport {
    classify_with(log_text, ClassifyOptions::default())
}

/// Classify a capture log
pub fn classify_with(log_text: &str, options: ClassifyOptions) -> VerdictReport {
    let _span = tracing::debug_span!("classify", bytes = log_text.len()).entered();

    let signals = detect_signals(log_text);
    let entries = extract_entries(log_text);

    let result = if options.strict_order {
        let state = track_sequence(log_text);
        debug!(state = ?state, "Strict order check");
        state.verdict()
    } else {
        resolve(&signals)
    };

    debug!(
        result = %result,
        signals = signals.count(),
        entries = entries.len(),
        "Session classified"
    );

    VerdictReport {
        signals,
        entries,
        result,
    }
}
