//! Line-oriented ingestion of node records.
//!
//! The pipeline resolves a source (file or bundled resource), walks it line by
//! line, and hands each line to `line::parse_line`. Lines that fail to parse
//! are recorded with their reason and skipped; only a missing or unreadable
//! source fails the whole ingest.

pub mod blocks;
pub mod line;
pub mod source;

pub use blocks::{InvalidUri, UriField, parse_capabilities, parse_legal_entity};
pub use line::{FIELDS_PER_LINE, SkipReason, parse_line};
pub use source::{SourceOrigin, SourceText, resolve_source};

use crate::node::Node;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source not found: {0} (no file and no bundled resource)")]
    SourceNotFound(String),
    #[error("reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A line that contributed no node, with its 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line_number: usize,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: SkipReason,
}

fn serialize_reason<S>(reason: &SkipReason, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(reason)
}

/// Everything one ingest pass produced: nodes in file order plus rejects.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IngestReport {
    pub nodes: Vec<Node>,
    pub skipped: Vec<SkippedLine>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Load nodes from `identifier`, discarding the skip details.
pub fn ingest(identifier: &str) -> Result<Vec<Node>, IngestError> {
    Ok(ingest_report(identifier)?.nodes)
}

/// Load nodes from `identifier` and keep the per-line skip reasons.
pub fn ingest_report(identifier: &str) -> Result<IngestReport, IngestError> {
    let source = resolve_source(identifier)?;
    info!(origin = %source.origin, "reading node details");
    Ok(ingest_str(&source.contents))
}

/// Parse an in-memory blob of node lines.
///
/// Blank lines are ignored and are not counted as rejects.
pub fn ingest_str(contents: &str) -> IngestReport {
    let mut report = IngestReport::default();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = idx + 1;
        match parse_line(line) {
            Ok(node) => report.nodes.push(node),
            Err(reason) => {
                warn!(line = line_number, %reason, "skipping node line");
                report.skipped.push(SkippedLine {
                    line_number,
                    reason,
                });
            }
        }
    }
    info!(
        nodes = report.nodes.len(),
        skipped = report.skipped.len(),
        "node list loaded"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_NODES: &str = "1,Test Node,http://example.com/logo.png,PID123,[Example Entity;http://example.com/ror],http://example.com/node,[Compute;http://example.com/cap;v1]\n2,Another Node,http://example.com/logo2.png,PID456,[Another Entity;http://example.com/ror2],http://example.com/node2,[Storage;http://example.com/storage;v2]";

    #[test]
    fn ingest_str_keeps_file_order() {
        let report = ingest_str(TWO_NODES);
        assert!(report.is_clean());
        let ids: Vec<_> = report.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn malformed_lines_are_skipped_without_aborting() {
        let contents = format!(
            "header,line\n{TWO_NODES}\n3,Bad,not a url,P,[E;http://r],http://e,[A;http://a;1]\n\n"
        );
        let report = ingest_str(&contents);
        assert_eq!(report.nodes.len(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line_number, 1);
        assert_eq!(report.skipped[0].reason, SkipReason::FieldCount { found: 2 });
        assert_eq!(report.skipped[1].line_number, 4);
        assert!(matches!(report.skipped[1].reason, SkipReason::InvalidUri(_)));
    }

    #[test]
    fn empty_source_yields_empty_report() {
        let report = ingest_str("");
        assert!(report.nodes.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn skipped_lines_serialize_reason_as_text() {
        let report = ingest_str("only,three,fields");
        let value = serde_json::to_value(&report.skipped).unwrap();
        assert_eq!(value[0]["line_number"], 1);
        assert_eq!(
            value[0]["reason"],
            "expected 7 comma-separated fields, found 3"
        );
    }

    #[test]
    fn bundled_node_list_parses_cleanly() {
        let report = ingest_report("nodes.csv").expect("bundled list resolves");
        assert!(report.is_clean(), "bundled rejects: {:?}", report.skipped);
        assert!(!report.nodes.is_empty());
    }
}
