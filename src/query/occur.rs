use std::fmt;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Defines whether a clause of a [`BooleanQuery`](crate::query::BooleanQuery)
/// must be present, should be present or must not be present in a matching document.
#[derive(Debug, Clone, Hash, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Occur {
    /// For a given document to be considered for scoring,
    /// at least one of the queries with the Should or the Must
    /// Occur constraint must be within the document.
    ///
    /// With a minimum number of should match `K > 0`, at least `K`
    /// of the Should queries must be within the document.
    Should,
    /// Document without the queries are excluded from the search.
    Must,
    /// Document that contain the query are excluded from the
    /// search.
    MustNot,
}

impl Occur {
    /// Returns a char representation of the `Occur` object,
    /// using the same convention as a query string:
    /// `+` for `Must`, `-` for `MustNot`, nothing for `Should`.
    fn to_char(self) -> Option<char> {
        match self {
            Occur::Should => None,
            Occur::Must => Some('+'),
            Occur::MustNot => Some('-'),
        }
    }

    /// Compose two occur values.
    pub fn compose(left: Occur, right: Occur) -> Occur {
        match (left, right) {
            (Occur::Should, _) => right,
            (Occur::Must, Occur::MustNot) => Occur::MustNot,
            (Occur::Must, _) => Occur::Must,
            (Occur::MustNot, Occur::MustNot) => Occur::Must,
            (Occur::MustNot, _) => Occur::MustNot,
        }
    }
}

impl fmt::Display for Occur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occur_char) = self.to_char() {
            f.write_char(occur_char)?;
        }
        Ok(())
    }
}
