use std::fmt;

use super::term_weight::TermWeight;
use crate::query::{EnableScoring, Query, Weight};
use crate::Term;

/// A Term query matches all of the documents
/// containing a specific term.
///
/// The score associated is defined as
/// `tf(term_freq) * idf(doc_freq, num_docs) * boost`
/// in which `tf` and `idf` are given by the searcher's
/// [`Similarity`](crate::query::Similarity).
///
/// ```rust
/// use occur::collector::Count;
/// use occur::query::TermQuery;
/// use occur::{Searcher, SegmentReader, Term};
///
/// # fn main() -> occur::Result<()> {
/// let segment = SegmentReader::for_texts(
///     "title",
///     &[
///         "The Name of the Wind",
///         "The Diary of Muadib",
///         "A Dairy Cow",
///         "The Diary of a Young Girl",
///     ],
/// );
/// let searcher = Searcher::new(vec![segment]);
/// let query = TermQuery::new(Term::new("title", "Diary"));
/// let count = searcher.search(&query, &Count)?;
/// assert_eq!(count, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TermQuery {
    term: Term,
}

impl fmt::Debug for TermQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermQuery({})", self.term)
    }
}

impl TermQuery {
    /// Creates a new term query.
    pub fn new(term: Term) -> TermQuery {
        TermQuery { term }
    }

    /// The `Term` this query is built out of.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Returns a weight object.
    ///
    /// While `.weight(...)` returns a boxed trait object,
    /// this method return a specific implementation.
    /// This is useful for optimization purpose.
    pub fn specialized_weight(&self, enable_scoring: EnableScoring<'_>) -> TermWeight {
        let searcher = enable_scoring.searcher();
        TermWeight::new(
            self.term.clone(),
            searcher.doc_freq(&self.term),
            searcher.num_docs(),
            searcher.similarity().clone(),
        )
    }
}

impl Query for TermQuery {
    fn weight(&self, enable_scoring: EnableScoring<'_>) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(self.specialized_weight(enable_scoring)))
    }

    fn query_terms<'a>(&'a self, visitor: &mut dyn FnMut(&'a Term)) {
        visitor(&self.term);
    }
}
