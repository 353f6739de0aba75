use std::io::Write;
use std::path::PathBuf;

use adl_roundtrip_engine::{Divergence, ReportedLine};

/// Header, first actionable line from each side, then the full diff.
pub fn divergence<W: Write>(
    out: &mut W,
    file_name: &str,
    divergence: &Divergence,
) -> std::io::Result<()> {
    writeln!(out, "Unexpected differences found in {file_name}:")?;
    side(out, "saved", divergence.first.saved.as_ref())?;
    side(out, "original", divergence.first.original.as_ref())?;
    writeln!(out, "{}", divergence.diff.trim_end())
}

fn side<W: Write>(out: &mut W, label: &str, line: Option<&ReportedLine>) -> std::io::Result<()> {
    match line {
        Some(line) => writeln!(out, "  first {label} difference, line {}: {}", line.line, line.text),
        None => writeln!(out, "  first {label} difference: none"),
    }
}

/// Trailing list printed when the batch kept going past divergent files.
pub fn divergent_summary<W: Write>(
    out: &mut W,
    checked: usize,
    divergent: &[PathBuf],
) -> std::io::Result<()> {
    writeln!(out, "{} of {checked} files diverged:", divergent.len())?;
    for path in divergent {
        writeln!(out, "  {}", path.display())?;
    }
    Ok(())
}
