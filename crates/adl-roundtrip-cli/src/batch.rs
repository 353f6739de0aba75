use std::io::Write;
use std::path::{Path, PathBuf};

use adl_roundtrip_engine::{ComparisonOutcome, DiffPrimitive, Normalizer, compare_files};
use glob::{Pattern, glob};

use crate::error::BatchError;
use crate::producer::Producer;
use crate::report;

/// Expands `~`, canonicalizes and requires a directory.
pub fn resolve_directory(path: &Path) -> Result<PathBuf, BatchError> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let expanded = PathBuf::from(expanded);
    let resolved = expanded.canonicalize().unwrap_or(expanded);
    if resolved.is_dir() {
        Ok(resolved)
    } else {
        Err(BatchError::NotADirectory(resolved))
    }
}

/// Files directly inside `dir` ending in `.<extension>`, sorted by path.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BatchError> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );
    let entries = glob(&pattern).map_err(|source| BatchError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("Skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Counts for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub checked: usize,
    pub identical: usize,
    pub ignorable: usize,
    pub divergent: Vec<PathBuf>,
}

/// Regenerates and compares every matching file in one directory.
pub struct Batch<'a> {
    directory: PathBuf,
    extension: String,
    producer: &'a dyn Producer,
    differ: &'a dyn DiffPrimitive,
    normalizer: Normalizer,
    keep_going: bool,
}

impl<'a> Batch<'a> {
    pub fn new(
        directory: PathBuf,
        extension: impl Into<String>,
        producer: &'a dyn Producer,
        differ: &'a dyn DiffPrimitive,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            directory,
            extension: extension.into(),
            producer,
            differ,
            normalizer,
            keep_going: false,
        }
    }

    /// Continue past divergent files and fail once at the end.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn run<W: Write>(&self, out: &mut W) -> Result<BatchSummary, BatchError> {
        let directory = resolve_directory(&self.directory)?;
        self.producer.check()?;

        let files = discover(&directory, &self.extension)?;
        let mut summary = BatchSummary::default();
        if files.is_empty() {
            writeln!(
                out,
                "No {} files found in {}",
                self.extension.to_uppercase(),
                directory.display()
            )?;
            return Ok(summary);
        }

        log::info!("Checking {} files in {}", files.len(), directory.display());
        for original in &files {
            let saved = self.producer.regenerate(original)?;
            let outcome = compare_files(original, &saved, self.differ, &self.normalizer)?;
            summary.checked += 1;

            match outcome {
                ComparisonOutcome::Equivalent => {
                    log::info!("{}: identical", original.display());
                    summary.identical += 1;
                }
                ComparisonOutcome::EquivalentWithIgnorableDifferences(reason) => {
                    log::info!("{}: ignorable differences ({reason:?})", original.display());
                    summary.ignorable += 1;
                }
                ComparisonOutcome::Divergent(divergence) => {
                    let file_name = original
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| original.display().to_string());
                    report::divergence(out, &file_name, &divergence)?;
                    summary.divergent.push(original.clone());
                    if !self.keep_going {
                        return Err(BatchError::Divergent { count: 1 });
                    }
                }
            }
        }

        if !summary.divergent.is_empty() {
            report::divergent_summary(out, summary.checked, &summary.divergent)?;
            return Err(BatchError::Divergent {
                count: summary.divergent.len(),
            });
        }

        writeln!(
            out,
            "All {} files processed successfully.",
            self.extension.to_uppercase()
        )?;
        Ok(summary)
    }
}
