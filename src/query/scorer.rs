use std::ops::DerefMut;

use crate::docset::DocSet;
use crate::Score;

/// Scored set of documents matching a query within a specific segment.
///
/// See [`Query`](crate::query::Query).
pub trait Scorer: DocSet + 'static {
    /// Returns the score.
    ///
    /// This method will perform a bit of computation and is not cached.
    fn score(&mut self) -> Score;

    /// Returns the match frequency of the current document.
    ///
    /// For a leaf, this is the number of occurrences of the term in the
    /// document. For a composite scorer, this is the number of its direct
    /// clauses matching the document.
    fn freq(&mut self) -> u32 {
        1
    }
}

impl Scorer for Box<dyn Scorer> {
    #[inline]
    fn score(&mut self) -> Score {
        self.deref_mut().score()
    }

    #[inline]
    fn freq(&mut self) -> u32 {
        self.deref_mut().freq()
    }
}
