use crate::document::Document;
use crate::rules::RuleSet;
use crate::trim::trim_quoted_values;

/// Knobs for the standard normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerOptions {
    /// Widget keywords whose `"basic attribute"` may gain a default `width=1`.
    pub width_widgets: Vec<String>,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            width_widgets: vec!["rectangle".into(), "polyline".into()],
        }
    }
}

/// Produces the canonical form of a document: field stripper rules, quoted
/// value trimming, then the identifier/version drop and blank-line drop.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: RuleSet,
}

impl Normalizer {
    pub fn new(options: &NormalizerOptions) -> Self {
        Self::with_rules(RuleSet::standard(options.width_widgets.iter().cloned()))
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn normalize_lines(&self, lines: &[String]) -> Vec<String> {
        let stripped = self.rules.apply(lines);
        trim_quoted_values(&stripped)
            .into_iter()
            .filter(|line| !is_identifier_or_version(line))
            .filter(|line| !line.trim().is_empty())
            .collect()
    }

    pub fn canonical(&self, doc: &Document) -> Vec<String> {
        self.normalize_lines(doc.lines())
    }

    /// Order-sensitive, exact comparison of the two canonical forms.
    pub fn equivalent(&self, a: &Document, b: &Document) -> bool {
        self.canonical(a) == self.canonical(b)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizerOptions::default())
    }
}

/// Lines a writer may regenerate wholesale: anything mentioning a name
/// field, and the format version declaration.
pub(crate) fn is_identifier_or_version(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    lower.contains("name") || lower.starts_with("version=")
}
