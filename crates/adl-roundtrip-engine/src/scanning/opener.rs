/// Predicate deciding whether a line opens a block of interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opener {
    /// Trimmed line starts with a bare keyword, e.g. `rectangle {`.
    Keyword(String),
    /// Like `Keyword`, for any of several keywords.
    AnyKeyword(Vec<String>),
    /// Line contains a double-quoted tag, e.g. `"cartesian plot" {`.
    QuotedTag(String),
}

impl Opener {
    pub fn keyword(name: impl Into<String>) -> Self {
        Self::Keyword(name.into())
    }

    pub fn any_keyword<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyKeyword(names.into_iter().map(Into::into).collect())
    }

    pub fn quoted(tag: impl Into<String>) -> Self {
        Self::QuotedTag(tag.into())
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Keyword(name) => starts_with_keyword(line, name),
            Self::AnyKeyword(names) => names.iter().any(|name| starts_with_keyword(line, name)),
            Self::QuotedTag(tag) => {
                let quoted = format!("\"{tag}\"");
                line.contains(&quoted)
            }
        }
    }
}

/// The keyword must be the whole first token: `text {` opens a text block,
/// `textix="..."` and `text=...` do not.
fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    match line.trim_start().strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '{'),
        None => false,
    }
}
