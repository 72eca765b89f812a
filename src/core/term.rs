use std::fmt;

use serde::{Deserialize, Serialize};

/// Term represents the value that the token can take.
///
/// A term is a `(field, text)` pair. Terms are ordered by field first,
/// then by text, which makes the terms of a field contiguous in a
/// term dictionary.
#[derive(Clone, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    field: String,
    text: String,
}

impl Term {
    /// Builds a term given a field name and its text.
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Term {
        Term {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Returns the field name of the term.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the text of the term.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term(field={:?}, text={:?})", self.field, self.text)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text)
    }
}
