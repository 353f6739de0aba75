//! Equivalence policy for one original/saved document pair.
//!
//! The diff is always taken as `diff <saved> <original>`, so removed lines
//! belong to the saved (regenerated) file and added lines to the original.

use std::path::Path;

use crate::diff::{DiffError, DiffOutput, DiffPrimitive, DiffTag, UnifiedDiff, only_name_changes};
use crate::document::Document;
use crate::normalize::{Normalizer, is_identifier_or_version};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnorableReason {
    /// Only lines mentioning `name` changed.
    OnlyNameChanges,
    /// The canonical forms match.
    NormalizedEqual,
}

/// A line quoted in a divergence report, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedLine {
    pub line: usize,
    pub text: String,
}

/// First actionable line on each side of a divergent diff.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FirstDifference {
    pub saved: Option<ReportedLine>,
    pub original: Option<ReportedLine>,
}

impl FirstDifference {
    /// Skips blank changes and lines that only touch a name or version field.
    pub fn from_diff(diff: &UnifiedDiff) -> Self {
        let mut first = Self::default();
        for entry in diff.changes() {
            let payload = entry.payload();
            if payload.is_empty() || is_identifier_or_version(payload) {
                continue;
            }
            match entry.tag {
                DiffTag::Removed if first.saved.is_none() => {
                    first.saved = entry.old_line.map(|line| ReportedLine {
                        line,
                        text: payload.to_string(),
                    });
                }
                DiffTag::Added if first.original.is_none() => {
                    first.original = entry.new_line.map(|line| ReportedLine {
                        line,
                        text: payload.to_string(),
                    });
                }
                _ => {}
            }
            if first.saved.is_some() && first.original.is_some() {
                break;
            }
        }
        first
    }
}

/// Diagnostics for a pair that differs beyond the allowed variations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub first: FirstDifference,
    /// Full diff text, as produced by the diff tool.
    pub diff: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    Equivalent,
    EquivalentWithIgnorableDifferences(IgnorableReason),
    Divergent(Divergence),
}

impl ComparisonOutcome {
    pub fn is_acceptable(&self) -> bool {
        !matches!(self, Self::Divergent(_))
    }
}

/// Pure decision given both documents and the diff between them.
pub fn decide(
    original: &Document,
    saved: &Document,
    diff: &DiffOutput,
    normalizer: &Normalizer,
) -> ComparisonOutcome {
    resolve(diff, || Some(normalizer.equivalent(original, saved)))
}

/// Runs the diff tool, then reads both files only if the fast path cannot
/// decide. A read failure is treated as a divergence, never as equivalence.
pub fn compare_files(
    original: &Path,
    saved: &Path,
    differ: &dyn DiffPrimitive,
    normalizer: &Normalizer,
) -> Result<ComparisonOutcome, DiffError> {
    let diff = differ.diff(saved, original)?;
    Ok(resolve(&diff, || {
        let documents = Document::read(original).and_then(|o| Ok((o, Document::read(saved)?)));
        match documents {
            Ok((original, saved)) => Some(normalizer.equivalent(&original, &saved)),
            Err(err) => {
                log::warn!("Failed to read files for secondary comparison: {err}");
                None
            }
        }
    }))
}

/// `secondary` returns whether the canonical forms match, or `None` when
/// they could not be computed.
fn resolve(diff: &DiffOutput, secondary: impl FnOnce() -> Option<bool>) -> ComparisonOutcome {
    let text = match diff {
        DiffOutput::Identical => return ComparisonOutcome::Equivalent,
        DiffOutput::Differences(text) => text,
    };

    let parsed = UnifiedDiff::parse(text);
    if only_name_changes(&parsed) {
        return ComparisonOutcome::EquivalentWithIgnorableDifferences(
            IgnorableReason::OnlyNameChanges,
        );
    }

    if secondary() == Some(true) {
        return ComparisonOutcome::EquivalentWithIgnorableDifferences(
            IgnorableReason::NormalizedEqual,
        );
    }

    ComparisonOutcome::Divergent(Divergence {
        first: FirstDifference::from_diff(&parsed),
        diff: text.clone(),
    })
}
