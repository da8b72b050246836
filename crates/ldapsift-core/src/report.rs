//! Verdict report and its stable renderings.
//!
//! The JSON document lists every probe in declaration order, then
//! `entries`, then `result`. Non-ASCII entry names are written as-is.

use std::fmt::Write as _;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::detectors::{SignalSet, PROBES};
use crate::verdict::Verdict;

const JSON_INDENT: &[u8] = b"    ";

/// Complete classification of one capture log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictReport {
    pub signals: SignalSet,
    pub entries: Vec<String>,
    pub result: Verdict,
}

impl Serialize for VerdictReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PROBES.len() + 2))?;
        for (probe, detected) in self.signals.iter() {
            map.serialize_entry(probe.name, &detected)?;
        }
        map.serialize_entry("entries", &self.entries)?;
        map.serialize_entry("result", &self.result)?;
        map.end()
    }
}

impl VerdictReport {
    /// Four-space indented JSON, one key per line
    pub fn to_json_pretty(&self) -> String {
        let mut buf = Vec::with_capacity(256);
        let mut ser = serde_json::Serializer::with_formatter(
            &mut buf,
            PrettyFormatter::with_indent(JSON_INDENT),
        );
        // String keys and in-memory output leave no failure path
        self.serialize(&mut ser)
            .expect("report serialization into memory is infallible");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Single-line JSON
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).expect("report serialization into memory is infallible")
    }

    /// Aligned human-readable summary
    pub fn to_summary(&self) -> String {
        let width = PROBES
            .iter()
            .map(|p| p.name.len())
            .max()
            .unwrap_or(0)
            .max("entries".len());

        let mut out = String::new();
        for (probe, detected) in self.signals.iter() {
            let mark = if detected { "yes" } else { "no" };
            let _ = writeln!(out, "{:<width$}  {}", probe.name, mark);
        }
        let _ = writeln!(out, "{:<width$}  {}", "entries", self.entries.len());
        for entry in &self.entries {
            let _ = writeln!(out, "  - {}", entry);
        }
        let _ = writeln!(out, "{:<width$}  {}", "result", self.result);
        out
    }
}
