use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::BatchError;

/// Loads a document and writes it back out.
pub trait Producer {
    /// Runs once before any file is processed.
    fn check(&self) -> Result<(), BatchError> {
        Ok(())
    }

    /// Regenerates `input` and returns the path of the saved copy.
    fn regenerate(&self, input: &Path) -> Result<PathBuf, BatchError>;
}

/// External executable invoked as `<program> <args..> <input>`, writing its
/// result to a fixed output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessProducer {
    program: PathBuf,
    args: Vec<String>,
    output: PathBuf,
}

impl ProcessProducer {
    pub fn new(program: PathBuf, args: Vec<String>, output: PathBuf) -> Self {
        Self {
            program,
            args,
            output,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    fn remove_stale_output(&self) -> Result<(), BatchError> {
        match std::fs::remove_file(&self.output) {
            Ok(()) => {
                log::trace!("removed stale {}", self.output.display());
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BatchError::Output(err)),
        }
    }
}

impl Producer for ProcessProducer {
    fn check(&self) -> Result<(), BatchError> {
        if self.program.is_file() {
            Ok(())
        } else {
            Err(BatchError::ProducerNotFound(self.program.clone()))
        }
    }

    fn regenerate(&self, input: &Path) -> Result<PathBuf, BatchError> {
        self.remove_stale_output()?;

        log::debug!(
            "running {} {:?} {}",
            self.program.display(),
            self.args,
            input.display()
        );
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(input)
            .output()
            .map_err(|source| BatchError::ProducerSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BatchError::ProducerFailed {
                program: self.program.clone(),
                input: input.to_path_buf(),
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if !self.output.is_file() {
            return Err(BatchError::MissingOutput(self.output.clone()));
        }

        Ok(self.output.clone())
    }
}
