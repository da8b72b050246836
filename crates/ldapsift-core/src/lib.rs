//! Core library for ldapsift.
//!
//! Detects whether an LDAP search completed in a dissector text log
//! (for example `tshark -V` output) and renders the verdict as a stable report.

pub mod classifier;
pub mod detectors;
pub mod entries;
pub mod error;
pub mod report;
pub mod sequence;
pub mod source;
pub mod verdict;

pub use classifier::{classify, classify_with, ClassifyOptions};
pub use detectors::{Milestone, Probe, SignalSet, PROBES};
pub use error::SourceError;
pub use report::VerdictReport;
pub use sequence::SequenceState;
pub use verdict::Verdict;
