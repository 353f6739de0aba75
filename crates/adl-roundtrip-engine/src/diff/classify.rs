use super::external::DiffOutput;
use super::unified::UnifiedDiff;

/// First-pass verdict on a raw diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffClass {
    Identical,
    /// Every changed line mentions `name`: only identifiers were regenerated.
    OnlyNameChanges,
    NeedsSecondaryCheck,
}

pub fn classify(output: &DiffOutput) -> DiffClass {
    match output {
        DiffOutput::Identical => DiffClass::Identical,
        DiffOutput::Differences(text) => {
            if only_name_changes(&UnifiedDiff::parse(text)) {
                DiffClass::OnlyNameChanges
            } else {
                DiffClass::NeedsSecondaryCheck
            }
        }
    }
}

/// True when there is at least one added or removed line and every one of
/// them is blank or contains `name` (case-insensitive). Output with no
/// readable change lines, such as a non-unified diff, never qualifies.
pub fn only_name_changes(diff: &UnifiedDiff) -> bool {
    let mut changes = diff.changes().peekable();
    changes.peek().is_some()
        && changes.all(|entry| {
            let payload = entry.payload();
            payload.is_empty() || payload.to_lowercase().contains("name")
        })
}
