//! # Diffs
//!
//! The line diff itself comes from an external tool. This module only models
//! its unified output and decides whether a diff is trivially acceptable.
//!
//! - **`unified`**: `HunkHeader`, `DiffEntry` with reconstructed line numbers
//! - **`classify`**: name-only fast path
//! - **`external`**: `DiffPrimitive` seam and the `diff` process backend

pub mod classify;
pub mod external;
pub mod unified;

pub use classify::{DiffClass, classify, only_name_changes};
pub use external::{DiffError, DiffOutput, DiffPrimitive, ExternalDiff};
pub use unified::{DiffEntry, DiffTag, Hunk, HunkHeader, UnifiedDiff};
