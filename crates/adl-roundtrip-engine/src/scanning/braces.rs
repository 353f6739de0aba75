/// Count of `{` minus count of `}` on a single line.
///
/// Braces inside quoted strings are counted too; the format never relies on
/// them being skipped.
pub fn brace_delta(line: &str) -> isize {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}
