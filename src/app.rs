use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use ldapsift_core::source::{read_log, read_log_from, STDIN_LABEL};
use ldapsift_core::{classify_with, ClassifyOptions, Verdict, VerdictReport};

use crate::config::{OutputFormat, Settings};

/// Main application
pub struct App {
    settings: Settings,
}

impl App {
    /// Create a new application
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Classifier options derived from settings
    pub fn options(&self) -> ClassifyOptions {
        ClassifyOptions {
            strict_order: self.settings.verdict.strict_order,
        }
    }

    /// Read the capture log, classify it and write the report to `out`
    ///
    /// `None` reads stdin.
    pub fn run<W: Write>(&self, input: Option<&Path>, out: &mut W) -> Result<Verdict> {
        let max_bytes = self.settings.input.max_bytes;
        let text = match input {
            Some(path) => read_log(path, max_bytes)?,
            None => read_log_from(io::stdin().lock(), STDIN_LABEL, max_bytes)?,
        };

        let report = classify_with(&text, self.options());
        tracing::info!(
            source = %input.map_or(STDIN_LABEL.into(), |p| p.display().to_string()),
            result = %report.result,
            entries = report.entries.len(),
            "Capture log classified"
        );

        out.write_all(self.render(&report).as_bytes())
            .and_then(|_| out.flush())
            .context("Failed to write report")?;

        Ok(report.result)
    }

    /// Render a report in the configured format
    pub fn render(&self, report: &VerdictReport) -> String {
        match self.settings.output.format {
            OutputFormat::Json if self.settings.output.pretty => {
                format!("{}\n", report.to_json_pretty())
            }
            OutputFormat::Json => format!("{}\n", report.to_json_compact()),
            OutputFormat::Summary => report.to_summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOG: &str = "LDAPMessage searchResEntry(2) \"cn=alice,dc=example,dc=com\"\n\
                       [2 Reassembled TCP Segments (1603 bytes)]\n\
                       LDAPMessage searchRequest(2) \"dc=example,dc=com\"\n";

    fn write_log(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("ldap_log.txt");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn run(settings: Settings, content: &str) -> (Verdict, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(&dir, content);
        let mut out = Vec::new();
        let verdict = App::new(settings).run(Some(&path), &mut out).unwrap();
        (verdict, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_writes_pretty_json() {
        let (verdict, out) = run(Settings::default(), LOG);
        assert_eq!(verdict, Verdict::Success);
        assert!(out.starts_with("{\n    \"search_request\": true,\n"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_run_compact_json() {
        let mut settings = Settings::default();
        settings.output.pretty = false;
        let (_, out) = run(settings, "");
        assert_eq!(
            out,
            "{\"search_request\":false,\"tcp_response\":false,\"search_entry\":false,\"search_done\":false,\"entries\":[],\"result\":\"failure\"}\n"
        );
    }

    #[test]
    fn test_run_summary() {
        let mut settings = Settings::default();
        settings.output.format = OutputFormat::Summary;
        let (_, out) = run(settings, LOG);
        assert!(out.contains("  - cn=alice,dc=example,dc=com\n"));
        assert!(out.ends_with("result          success\n"));
    }

    #[test]
    fn test_strict_order_setting_changes_verdict() {
        let mut settings = Settings::default();
        settings.verdict.strict_order = true;
        let (verdict, _) = run(settings, LOG);
        assert_eq!(verdict, Verdict::Failure);
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = App::new(Settings::default())
            .run(Some(&dir.path().join("absent.txt")), &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_large_log_classifies_without_limit() {
        let filler = "    Frame 99: 60 bytes on wire (480 bits)\n".repeat(65 * 1024 * 1024 / 40);
        let log = format!(
            "LDAPMessage searchRequest(2) \"dc=example,dc=com\"\n{}\
             Transmission Control Protocol, Len: 1448\n\
             LDAPMessage searchResEntry(2) \"cn=alice,dc=example,dc=com\"\n",
            filler
        );
        assert!(log.len() > 64 * 1024 * 1024);

        let (verdict, out) = run(Settings::default(), &log);
        assert_eq!(verdict, Verdict::Success);
        assert!(out.contains("\"cn=alice,dc=example,dc=com\""));
    }

    #[test]
    fn test_input_over_limit_is_error() {
        let mut settings = Settings::default();
        settings.input.max_bytes = Some(8);
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(&dir, LOG);
        let mut out = Vec::new();
        assert!(App::new(settings).run(Some(&path), &mut out).is_err());
    }
}
