//! Navigation tree rewriting.
//!
//! Walks an mkdocs-style `nav` sequence and replaces each leaf path
//! reference with its corrected location from the [`FileIndex`]. The
//! rewrite is non-destructive: a fresh tree with identical shape is
//! produced, and every problem degrades to passthrough plus a
//! diagnostic in the [`RewriteReport`] rather than an error.

use serde_yaml::{Mapping, Sequence, Value};
use tracing::debug;

use crate::index::FileIndex;

/// Diagnostics collected during a nav rewrite.
///
/// The rewriter never fails; everything an operator should hear about
/// ends up here, for the CLI to render as warning lines.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// References with no matching filename in the index, preserved
    /// verbatim in the output.
    pub unresolved: Vec<String>,
    /// References that matched several files and could not be narrowed
    /// to one; the first candidate in sorted order was used.
    pub ambiguous: Vec<String>,
    /// Display form of entries whose shape is neither a single-key
    /// mapping, a nested sequence, nor a string. Preserved verbatim.
    pub malformed: Vec<String>,
    /// Number of leaf references replaced with a corrected path.
    pub corrected: usize,
}

impl RewriteReport {
    /// True when the rewrite produced no diagnostics.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.ambiguous.is_empty() && self.malformed.is_empty()
    }
}

/// Rewrite a navigation sequence against the file index.
///
/// Returns a new sequence with identical entry count, ordering, keys,
/// and nesting; only leaf path-reference strings change. See
/// [`FileIndex::resolve`] for the matching rules.
#[must_use]
pub fn rewrite_nav(nav: &Sequence, index: &FileIndex) -> (Sequence, RewriteReport) {
    let mut report = RewriteReport::default();
    let fixed = rewrite_entries(nav, index, &mut report);
    (fixed, report)
}

/// Recursive descent over one nesting level, in order.
fn rewrite_entries(entries: &Sequence, index: &FileIndex, report: &mut RewriteReport) -> Sequence {
    entries
        .iter()
        .map(|entry| match entry {
            Value::Mapping(mapping) => Value::Mapping(rewrite_mapping(mapping, index, report)),
            Value::String(reference) => Value::String(rewrite_reference(reference, index, report)),
            other => {
                report.malformed.push(display_value(other));
                other.clone()
            }
        })
        .collect()
}

/// Rewrite a titled entry: `Title: path` leaves and `Section: [...]`
/// groups. Values of any other shape are preserved verbatim and
/// reported as malformed.
fn rewrite_mapping(mapping: &Mapping, index: &FileIndex, report: &mut RewriteReport) -> Mapping {
    mapping
        .iter()
        .map(|(key, value)| {
            let fixed = match value {
                Value::Sequence(children) => {
                    Value::Sequence(rewrite_entries(children, index, report))
                }
                Value::String(reference) => {
                    Value::String(rewrite_reference(reference, index, report))
                }
                other => {
                    report.malformed.push(display_value(other));
                    other.clone()
                }
            };
            (key.clone(), fixed)
        })
        .collect()
}

/// Resolve one path reference, falling back to the original string when
/// the index has no match.
fn rewrite_reference(reference: &str, index: &FileIndex, report: &mut RewriteReport) -> String {
    match index.resolve(reference) {
        Some(lookup) => {
            if lookup.ambiguous {
                report.ambiguous.push(reference.to_owned());
            }
            if lookup.path != reference {
                debug!(from = reference, to = lookup.path.as_str(), "corrected nav reference");
                report.corrected += 1;
            }
            lookup.path
        }
        None => {
            report.unresolved.push(reference.to_owned());
            reference.to_owned()
        }
    }
}

/// One-line display form of a malformed entry for diagnostics.
fn display_value(value: &Value) -> String {
    serde_yaml::to_string(value).map_or_else(
        |_| "<unprintable entry>".to_owned(),
        |s| s.trim_end().to_owned(),
    )
}
