use std::ops::Range;

use super::{braces::brace_delta, opener::Opener};

/// Inclusive line range `[start, end]` of one block, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockSpan {
    /// Index of the opening line.
    pub start: usize,
    /// Index of the line that brought the depth back to zero.
    pub end: usize,
}

impl BlockSpan {
    #[must_use]
    pub fn lines(self) -> Range<usize> {
        self.start..self.end + 1
    }

    /// Lines strictly between the opening and closing lines.
    #[must_use]
    pub fn body(self) -> Range<usize> {
        if self.start == self.end {
            self.start..self.start
        } else {
            self.start + 1..self.end
        }
    }

    #[must_use]
    pub fn is_single_line(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn contains(self, idx: usize) -> bool {
        self.start <= idx && idx <= self.end
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    InBlock { start: usize, depth: isize },
}

/// Yields the span of every outermost block whose opening line matches an
/// [`Opener`].
///
/// Matches found while already inside a block are ignored; a scanner only
/// ever tracks one block at a time.
pub struct BlockScanner<'a> {
    lines: &'a [String],
    opener: &'a Opener,
    pos: usize,
    state: ScanState,
}

impl<'a> BlockScanner<'a> {
    pub fn new(lines: &'a [String], opener: &'a Opener) -> Self {
        Self {
            lines,
            opener,
            pos: 0,
            state: ScanState::Outside,
        }
    }
}

impl Iterator for BlockScanner<'_> {
    type Item = BlockSpan;

    fn next(&mut self) -> Option<BlockSpan> {
        while let Some(line) = self.lines.get(self.pos) {
            let idx = self.pos;
            self.pos += 1;

            match self.state {
                ScanState::Outside => {
                    if !self.opener.matches(line) {
                        continue;
                    }
                    let depth = brace_delta(line);
                    if depth <= 0 {
                        return Some(BlockSpan {
                            start: idx,
                            end: idx,
                        });
                    }
                    self.state = ScanState::InBlock { start: idx, depth };
                }
                ScanState::InBlock { start, depth } => {
                    let depth = depth + brace_delta(line);
                    if depth <= 0 {
                        self.state = ScanState::Outside;
                        return Some(BlockSpan { start, end: idx });
                    }
                    self.state = ScanState::InBlock { start, depth };
                }
            }
        }

        if let ScanState::InBlock { start, .. } = self.state {
            log::trace!("dropping unterminated block opened at line {}", start + 1);
        }
        self.state = ScanState::Outside;
        None
    }
}

/// Indices of the lines sitting directly inside `span` (depth one): field
/// lines and the opening lines of child blocks.
pub fn direct_lines(lines: &[String], span: BlockSpan) -> Vec<usize> {
    let mut depth = brace_delta(&lines[span.start]);
    let mut out = Vec::new();
    for idx in span.body() {
        if depth == 1 {
            out.push(idx);
        }
        depth += brace_delta(&lines[idx]);
    }
    out
}

/// Spans of the child blocks opened at depth one inside `span`.
pub fn child_blocks(lines: &[String], span: BlockSpan, opener: &Opener) -> Vec<BlockSpan> {
    let mut depth = brace_delta(&lines[span.start]);
    let mut open: Option<(usize, isize)> = None;
    let mut out = Vec::new();

    for idx in span.body() {
        let line = &lines[idx];
        let delta = brace_delta(line);

        match open {
            Some((start, child_depth)) => {
                let child_depth = child_depth + delta;
                if child_depth <= 0 {
                    out.push(BlockSpan { start, end: idx });
                    open = None;
                } else {
                    open = Some((start, child_depth));
                }
            }
            None if depth == 1 && opener.matches(line) => {
                if delta <= 0 {
                    out.push(BlockSpan {
                        start: idx,
                        end: idx,
                    });
                } else {
                    open = Some((idx, delta));
                }
            }
            None => {}
        }

        depth += delta;
    }

    out
}
