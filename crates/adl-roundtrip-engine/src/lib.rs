//! # adl-roundtrip-engine
//!
//! Decides whether a regenerated ADL display file is semantically the same
//! document as the one it was loaded from.
//!
//! A writer is allowed to introduce a known set of harmless changes when it
//! saves a file back out: regenerated default values, renamed identifiers,
//! a format version line, re-padded quoted strings. Everything else is a
//! round-trip defect.
//!
//! ## Pipeline
//!
//! ```text
//! diff(saved, original) ─┬─ identical ──────────────────────► Equivalent
//!                        ├─ only "name" lines changed ──────► Ignorable
//!                        └─ otherwise ─► Normalizer(both) ─┬► Ignorable
//!                                                          └► Divergent
//! ```
//!
//! ## Modules
//!
//! - **`document`**: immutable line sequence read from disk
//! - **`scanning`**: brace-depth block scanner over raw lines (no grammar)
//! - **`rules`**: field stripper rules expressed as data, plus the ordered `RuleSet`
//! - **`trim`**: trailing-whitespace trimming inside quoted values
//! - **`normalize`**: rules + trimming + identifier/version drop = canonical form
//! - **`diff`**: unified diff model, the name-only classifier and the external diff seam
//! - **`decision`**: the equivalence policy tying it all together
//!
//! ## Quick Start
//!
//! ```
//! use adl_roundtrip_engine::{decide, ComparisonOutcome, DiffOutput, Document, Normalizer};
//!
//! let doc = Document::from_text("rectangle {\n  \"basic attribute\" {\n    width=1\n  }\n}\n");
//! let normalizer = Normalizer::default();
//!
//! let outcome = decide(&doc, &doc, &DiffOutput::Identical, &normalizer);
//! assert_eq!(outcome, ComparisonOutcome::Equivalent);
//! ```

pub mod decision;
pub mod diff;
pub mod document;
pub mod normalize;
pub mod rules;
pub mod scanning;
pub mod trim;

pub use decision::{
    ComparisonOutcome, Divergence, FirstDifference, IgnorableReason, ReportedLine, compare_files,
    decide,
};
pub use diff::{
    DiffClass, DiffEntry, DiffError, DiffOutput, DiffPrimitive, DiffTag, ExternalDiff, Hunk,
    HunkHeader, UnifiedDiff, classify,
};
pub use document::{Document, DocumentError};
pub use normalize::{Normalizer, NormalizerOptions};
pub use rules::{FieldMatch, Rule, RuleSet, RuleShape};
pub use scanning::{BlockScanner, BlockSpan, Opener};
