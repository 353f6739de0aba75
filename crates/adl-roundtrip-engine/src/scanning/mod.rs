//! # Block Scanning
//!
//! ADL files are never parsed here. A block is found purely by brace balance:
//! an opening line that matches an [`Opener`] starts it, and the block ends on
//! the line where the running `{`/`}` count returns to zero.
//!
//! ## Modules
//!
//! - **`braces`**: per-line brace delta
//! - **`opener`**: `Opener` predicates for block opening lines
//! - **`scanner`**: `BlockScanner` state machine (`Outside` / `InBlock`) plus
//!   helpers for walking the direct children of a block
//!
//! ## Key Invariants
//!
//! - Scanning is iterative; nesting depth never costs stack
//! - An opening line whose own braces already balance is a one-line block
//! - A block that never closes (malformed input) is not yielded

pub mod braces;
pub mod opener;
pub mod scanner;

pub use braces::brace_delta;
pub use opener::Opener;
pub use scanner::{BlockScanner, BlockSpan, child_blocks, direct_lines};
