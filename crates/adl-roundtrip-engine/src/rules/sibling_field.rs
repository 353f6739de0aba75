use std::collections::BTreeSet;

use crate::scanning::{BlockScanner, Opener, direct_lines};

/// Direct fields starting with `field`, in blocks where some direct line
/// contains `trigger`. Both are matched case-insensitively.
pub(crate) fn doomed_lines(
    lines: &[String],
    block: &Opener,
    trigger: &str,
    field: &str,
) -> BTreeSet<usize> {
    let mut doomed = BTreeSet::new();

    for span in BlockScanner::new(lines, block) {
        let direct = direct_lines(lines, span);
        let triggered = direct
            .iter()
            .any(|&idx| lines[idx].to_lowercase().contains(trigger));
        if !triggered {
            continue;
        }
        doomed.extend(
            direct
                .into_iter()
                .filter(|&idx| lines[idx].trim().to_lowercase().starts_with(field)),
        );
    }

    doomed
}
