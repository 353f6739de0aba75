//! # Field Stripper Rules
//!
//! Each rule removes lines a writer is allowed to add or drop on save, and
//! nothing else. Rules are plain data: a [`Rule`] is a name plus one of three
//! structural shapes, so every rule family runs through the same scanner code.
//!
//! ## Shapes
//!
//! - **`SiblingField`**: inside a block, drop direct fields with a given
//!   prefix, but only when a trigger field is also present at the same level
//! - **`ChildField`**: inside a block, inside a direct child block, drop every
//!   line matching a [`FieldMatch`]
//! - **`EmptyChild`**: drop a whole block when one of its direct child
//!   blocks holds no coordinate tuple
//!
//! The standard order lives in [`RuleSet::standard`].

pub mod child_field;
pub mod empty_child;
pub mod registry;
pub mod sibling_field;

use std::collections::BTreeSet;

use crate::scanning::Opener;

pub use registry::RuleSet;

/// How a field line is recognised inside a child block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMatch {
    /// Trimmed line equals the text, e.g. `width=1`.
    Exact(String),
    /// Lowercased line with all whitespace removed starts with one of the
    /// prefixes, e.g. `fill=`.
    NamePrefix(Vec<String>),
}

impl FieldMatch {
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    pub fn name_prefix<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::NamePrefix(prefixes.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Exact(text) => line.trim() == text,
            Self::NamePrefix(prefixes) => {
                let squashed: String = line
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_lowercase();
                prefixes.iter().any(|prefix| squashed.starts_with(prefix.as_str()))
            }
        }
    }
}

/// Structural shape of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleShape {
    SiblingField {
        block: Opener,
        /// Lowercase substring that must appear on some direct line.
        trigger: String,
        /// Lowercase prefix of the direct lines to drop.
        field: String,
    },
    ChildField {
        block: Opener,
        child: Opener,
        field: FieldMatch,
    },
    EmptyChild {
        block: Opener,
        child: Opener,
    },
}

/// A named, pure line-sequence transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: &'static str,
    shape: RuleShape,
}

impl Rule {
    pub fn new(name: &'static str, shape: RuleShape) -> Self {
        Self { name, shape }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> &RuleShape {
        &self.shape
    }

    /// Returns the input with this rule's lines removed. Never mutates `lines`.
    pub fn apply(&self, lines: &[String]) -> Vec<String> {
        let doomed = match &self.shape {
            RuleShape::SiblingField {
                block,
                trigger,
                field,
            } => sibling_field::doomed_lines(lines, block, trigger, field),
            RuleShape::ChildField {
                block,
                child,
                field,
            } => child_field::doomed_lines(lines, block, child, field),
            RuleShape::EmptyChild { block, child } => {
                empty_child::doomed_lines(lines, block, child)
            }
        };

        if !doomed.is_empty() {
            log::trace!("rule {} removed {} line(s)", self.name, doomed.len());
        }
        without(lines, &doomed)
    }
}

fn without(lines: &[String], doomed: &BTreeSet<usize>) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| !doomed.contains(idx))
        .map(|(_, line)| line.clone())
        .collect()
}

#[cfg(test)]
pub(crate) fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
