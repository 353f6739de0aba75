/// Trims trailing whitespace inside the span between the first and last `"`
/// of a line. Text outside the quotes is left alone, and lines with fewer
/// than two quotes pass through unchanged.
pub fn trim_quoted_value(line: &str) -> String {
    let (Some(first), Some(last)) = (line.find('"'), line.rfind('"')) else {
        return line.to_string();
    };
    if first == last {
        return line.to_string();
    }

    let inner = &line[first + 1..last];
    let trimmed = inner.trim_end();
    if trimmed.len() == inner.len() {
        return line.to_string();
    }

    format!("{}{}{}", &line[..=first], trimmed, &line[last..])
}

pub fn trim_quoted_values(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| trim_quoted_value(line)).collect()
}
