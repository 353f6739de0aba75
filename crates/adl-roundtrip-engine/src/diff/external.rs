use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of a successful diff run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutput {
    Identical,
    /// Raw unified diff text.
    Differences(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} failed comparing {} and {}: {stderr}", saved.display(), original.display())]
    ToolFailed {
        program: String,
        saved: PathBuf,
        original: PathBuf,
        status: Option<i32>,
        stderr: String,
    },
}

impl DiffError {
    /// Exit status the diff tool reported, when there was one.
    pub fn status(&self) -> Option<i32> {
        match self {
            Self::Spawn { .. } => None,
            Self::ToolFailed { status, .. } => *status,
        }
    }
}

/// Line diff between the regenerated file and the original.
pub trait DiffPrimitive {
    fn diff(&self, saved: &Path, original: &Path) -> Result<DiffOutput, DiffError>;
}

/// Runs an external `diff`-compatible program: status 0 means identical,
/// 1 means differences on stdout, anything else is a tool failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDiff {
    program: String,
    args: Vec<String>,
}

impl ExternalDiff {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ExternalDiff {
    /// Unified output, whitespace-insensitive.
    fn default() -> Self {
        Self::new("diff", vec!["-u".into(), "-w".into()])
    }
}

impl DiffPrimitive for ExternalDiff {
    fn diff(&self, saved: &Path, original: &Path) -> Result<DiffOutput, DiffError> {
        log::debug!(
            "running {} {:?} {} {}",
            self.program,
            self.args,
            saved.display(),
            original.display()
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(saved)
            .arg(original)
            .output()
            .map_err(|source| DiffError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(0) => Ok(DiffOutput::Identical),
            Some(1) => Ok(DiffOutput::Differences(
                String::from_utf8_lossy(&output.stdout).into_owned(),
            )),
            status => Err(DiffError::ToolFailed {
                program: self.program.clone(),
                saved: saved.to_path_buf(),
                original: original.to_path_buf(),
                status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
        }
    }
}
