/// Parsed `@@ -old_start,old_len +new_start,new_len @@` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
}

impl HunkHeader {
    /// Returns `None` for anything that is not a hunk header. An omitted
    /// length means one line.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("@@ ")?;
        let (ranges, _) = rest.split_once(" @@")?;
        let mut parts = ranges.split_whitespace();
        let (old_start, old_len) = parse_range(parts.next()?.strip_prefix('-')?)?;
        let (new_start, new_len) = parse_range(parts.next()?.strip_prefix('+')?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            old_start,
            old_len,
            new_start,
            new_len,
        })
    }
}

fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, len)) => Some((start.parse().ok()?, len.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Context,
    Removed,
    Added,
}

/// One body line of a hunk, marker stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub tag: DiffTag,
    pub text: String,
    /// 1-based line in the old file; `None` for added lines.
    pub old_line: Option<usize>,
    /// 1-based line in the new file; `None` for removed lines.
    pub new_line: Option<usize>,
}

impl DiffEntry {
    /// Text with surrounding whitespace removed.
    pub fn payload(&self) -> &str {
        self.text.trim()
    }

    pub fn is_change(&self) -> bool {
        self.tag != DiffTag::Context
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub header: HunkHeader,
    pub entries: Vec<DiffEntry>,
}

/// A unified diff between two files.
///
/// Everything before the first hunk header is the file header (`---`/`+++`
/// and any tool preamble) and is skipped, so a removed line that happens to
/// start with `--` is never mistaken for a header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnifiedDiff {
    pub hunks: Vec<Hunk>,
}

impl UnifiedDiff {
    pub fn parse(text: &str) -> Self {
        let mut hunks: Vec<Hunk> = Vec::new();
        let mut old_line = 0;
        let mut new_line = 0;

        for raw in text.lines() {
            if let Some(header) = HunkHeader::parse(raw) {
                old_line = header.old_start;
                new_line = header.new_start;
                hunks.push(Hunk {
                    header,
                    entries: Vec::new(),
                });
                continue;
            }

            let Some(hunk) = hunks.last_mut() else {
                continue;
            };

            let (tag, text) = match raw.chars().next() {
                Some('+') => (DiffTag::Added, &raw[1..]),
                Some('-') => (DiffTag::Removed, &raw[1..]),
                Some(' ') => (DiffTag::Context, &raw[1..]),
                // Some tools emit an empty context line without its marker
                None => (DiffTag::Context, ""),
                // "\ No newline at end of file" and anything unknown
                Some(_) => continue,
            };

            let entry = match tag {
                DiffTag::Context => {
                    let entry = DiffEntry {
                        tag,
                        text: text.to_string(),
                        old_line: Some(old_line),
                        new_line: Some(new_line),
                    };
                    old_line += 1;
                    new_line += 1;
                    entry
                }
                DiffTag::Removed => {
                    let entry = DiffEntry {
                        tag,
                        text: text.to_string(),
                        old_line: Some(old_line),
                        new_line: None,
                    };
                    old_line += 1;
                    entry
                }
                DiffTag::Added => {
                    let entry = DiffEntry {
                        tag,
                        text: text.to_string(),
                        old_line: None,
                        new_line: Some(new_line),
                    };
                    new_line += 1;
                    entry
                }
            };
            hunk.entries.push(entry);
        }

        Self { hunks }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.hunks.iter().flat_map(|hunk| hunk.entries.iter())
    }

    /// Added and removed entries only.
    pub fn changes(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries().filter(|entry| entry.is_change())
    }

    pub fn is_empty(&self) -> bool {
        self.changes().next().is_none()
    }
}
