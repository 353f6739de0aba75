use std::collections::BTreeSet;

use crate::scanning::{BlockScanner, Opener, child_blocks};

use super::FieldMatch;

/// Lines matching `field` inside every `child` block directly under a
/// `block` block. The child's own opening and closing lines always stay.
pub(crate) fn doomed_lines(
    lines: &[String],
    block: &Opener,
    child: &Opener,
    field: &FieldMatch,
) -> BTreeSet<usize> {
    BlockScanner::new(lines, block)
        .flat_map(|span| child_blocks(lines, span, child))
        .flat_map(|child_span| child_span.body())
        .filter(|&idx| field.matches(&lines[idx]))
        .collect()
}
