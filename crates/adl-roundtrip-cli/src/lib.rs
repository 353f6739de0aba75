//! # adl-roundtrip-cli
//!
//! Batch harness around the engine: regenerate every ADL file in a directory
//! with the display editor's test-save mode, diff the result against the
//! original and stop at the first file that changed beyond the allowed
//! variations.
//!
//! ## Modules
//!
//! - **`args`**: command-line flags
//! - **`settings`**: config file merged with flag overrides
//! - **`producer`**: the document producer process
//! - **`batch`**: directory discovery and the per-file loop
//! - **`report`**: what gets printed for divergent files
//! - **`error`**: `BatchError` and its exit-status mapping

pub mod args;
pub mod batch;
pub mod error;
pub mod producer;
pub mod report;
pub mod settings;

pub use batch::{Batch, BatchSummary};
pub use error::BatchError;
