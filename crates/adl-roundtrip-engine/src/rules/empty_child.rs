use std::collections::BTreeSet;

use crate::scanning::{BlockScanner, Opener, child_blocks};

/// Every line of each `block` whose direct `child` block holds no `(`.
///
/// A `points` block without a single `(x,y)` tuple describes nothing the
/// writer can round-trip, so the whole owning widget is dropped.
pub(crate) fn doomed_lines(lines: &[String], block: &Opener, child: &Opener) -> BTreeSet<usize> {
    let mut doomed = BTreeSet::new();

    for span in BlockScanner::new(lines, block) {
        let empty = child_blocks(lines, span, child)
            .into_iter()
            .any(|child_span| !lines[child_span.lines()].iter().any(|l| l.contains('(')));
        if empty {
            doomed.extend(span.lines());
        }
    }

    doomed
}
