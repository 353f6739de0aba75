use std::path::PathBuf;

use adl_roundtrip_config::ConfigError;
use adl_roundtrip_engine::DiffError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Provided path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Document producer not found at {}", .0.display())]
    ProducerNotFound(PathBuf),

    #[error("Failed to start {}: {source}", program.display())]
    ProducerSpawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "{} failed for {}\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}",
        program.display(),
        input.display()
    )]
    ProducerFailed {
        program: PathBuf,
        input: PathBuf,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Expected output file not found: {}", .0.display())]
    MissingOutput(PathBuf),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error("Unexpected differences in {count} file(s)")]
    Divergent { count: usize },

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid file pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl BatchError {
    /// Process exit status for this failure. A failing producer or diff tool
    /// passes its own status through; everything else is 1.
    pub fn exit_code(&self) -> u8 {
        let status = match self {
            Self::ProducerFailed { status, .. } => *status,
            Self::Diff(err) => err.status(),
            _ => None,
        };
        status
            .and_then(|code| u8::try_from(code).ok())
            .filter(|&code| code != 0)
            .unwrap_or(1)
    }
}
