use crate::scanning::Opener;

use super::{FieldMatch, Rule, RuleShape};

/// Ordered list of rules, applied strictly left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The full set of allowed save differences, in application order:
    /// count, width, precision, text fill, polyline outline fill, empty
    /// polyline.
    pub fn standard<I, S>(width_widgets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(vec![
            count_with_count_pv(),
            default_width(width_widgets),
            default_precision(),
            text_fill(),
            polyline_outline_fill(),
            empty_polyline(),
        ])
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn apply(&self, lines: &[String]) -> Vec<String> {
        self.rules
            .iter()
            .fold(lines.to_vec(), |acc, rule| rule.apply(&acc))
    }
}

/// Cartesian plots with a `countPvName` get their `count=` regenerated.
pub fn count_with_count_pv() -> Rule {
    Rule::new(
        "cartesian-count",
        RuleShape::SiblingField {
            block: Opener::quoted("cartesian plot"),
            trigger: "countpvname".into(),
            field: "count=".into(),
        },
    )
}

pub fn default_width<I, S>(widgets: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Rule::new(
        "default-width",
        RuleShape::ChildField {
            block: Opener::any_keyword(widgets),
            child: Opener::quoted("basic attribute"),
            field: FieldMatch::exact("width=1"),
        },
    )
}

pub fn default_precision() -> Rule {
    Rule::new(
        "indicator-precision",
        RuleShape::ChildField {
            block: Opener::keyword("indicator"),
            child: Opener::keyword("limits"),
            field: FieldMatch::exact("precDefault=1"),
        },
    )
}

/// Text widgets ignore fill and width; writers may add or drop them freely.
pub fn text_fill() -> Rule {
    Rule::new(
        "text-fill",
        RuleShape::ChildField {
            block: Opener::keyword("text"),
            child: Opener::quoted("basic attribute"),
            field: FieldMatch::name_prefix(["fill=", "width="]),
        },
    )
}

pub fn polyline_outline_fill() -> Rule {
    Rule::new(
        "polyline-outline-fill",
        RuleShape::ChildField {
            block: Opener::keyword("polyline"),
            child: Opener::quoted("basic attribute"),
            field: FieldMatch::exact("fill=\"outline\""),
        },
    )
}

pub fn empty_polyline() -> Rule {
    Rule::new(
        "empty-polyline",
        RuleShape::EmptyChild {
            block: Opener::keyword("polyline"),
            child: Opener::keyword("points"),
        },
    )
}
