use std::collections::BTreeSet;
use std::fmt;
use std::ops::Bound;

use crate::common::BitSet;
use crate::core::{Searcher, SegmentReader};
use crate::docset::{DocSet, TERMINATED};
use crate::query::explanation::does_not_match;
use crate::query::{
    BitSetDocSet, BooleanQuery, ConstScoreQuery, ConstScorer, EnableScoring, Explanation, Query,
    ScorerNode, Weight,
};
use crate::{DocId, Score, Term};

/// Above this number of terms, [`RewriteMethod::ConstantScoreAuto`] uses a filter.
pub const DEFAULT_TERM_COUNT_CUTOFF: usize = 350;

/// Above this percentage of the documents visited through the postings of the
/// terms, [`RewriteMethod::ConstantScoreAuto`] uses a filter.
pub const DEFAULT_DOC_COUNT_PERCENT: f64 = 0.1;

/// How a [`TermRangeQuery`] turns the terms of its range into a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RewriteMethod {
    /// A boolean query with one scored `Should` clause per term, without
    /// coordination factor.
    ///
    /// Fails with [`QueryError::TooManyClauses`](crate::QueryError) when
    /// the range holds more terms than `max_clause_count`.
    ScoringBoolean,
    /// Same as `ScoringBoolean`, with a constant score.
    ConstantScoreBoolean,
    /// The matching documents of the terms are gathered in a bitset, and
    /// scored with a constant score. Counts as a single clause.
    ConstantScoreFilter,
    /// `ConstantScoreBoolean` when the range holds few terms matching few
    /// documents, `ConstantScoreFilter` otherwise.
    #[default]
    ConstantScoreAuto,
}

/// Matches the documents containing a term of `field` within a range of
/// texts.
///
/// ```rust
/// use std::ops::Bound;
///
/// use occur::collector::Count;
/// use occur::query::{RewriteMethod, TermRangeQuery};
/// use occur::{Searcher, SegmentReader};
///
/// # fn main() -> occur::Result<()> {
/// let segment = SegmentReader::for_texts("year", &["1999", "2003", "2011", "2022"]);
/// let searcher = Searcher::new(vec![segment]);
/// let query = TermRangeQuery::new(
///     "year",
///     Bound::Included("2000".to_string()),
///     Bound::Excluded("2022".to_string()),
/// )
/// .with_rewrite_method(RewriteMethod::ScoringBoolean);
/// assert_eq!(searcher.search(&query, &Count)?, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TermRangeQuery {
    field: String,
    lower_bound: Bound<String>,
    upper_bound: Bound<String>,
    rewrite_method: RewriteMethod,
}

fn as_str_bound(bound: &Bound<String>) -> Bound<&str> {
    match bound {
        Bound::Included(text) => Bound::Included(text.as_str()),
        Bound::Excluded(text) => Bound::Excluded(text.as_str()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

impl TermRangeQuery {
    /// Creates a new range query over the texts of `field`.
    pub fn new(
        field: impl Into<String>,
        lower_bound: Bound<String>,
        upper_bound: Bound<String>,
    ) -> TermRangeQuery {
        TermRangeQuery {
            field: field.into(),
            lower_bound,
            upper_bound,
            rewrite_method: RewriteMethod::default(),
        }
    }

    /// Sets the rewrite method.
    #[must_use]
    pub fn with_rewrite_method(mut self, rewrite_method: RewriteMethod) -> TermRangeQuery {
        self.rewrite_method = rewrite_method;
        self
    }

    /// Returns the rewrite method.
    pub fn rewrite_method(&self) -> RewriteMethod {
        self.rewrite_method
    }

    /// Returns the field of the range.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Terms of the range, over all of the segments of the searcher.
    fn collect_terms(&self, searcher: &Searcher) -> BTreeSet<Term> {
        let lower = as_str_bound(&self.lower_bound);
        let upper = as_str_bound(&self.upper_bound);
        searcher
            .segment_readers()
            .iter()
            .flat_map(|reader| reader.terms_in_range(&self.field, lower, upper))
            .cloned()
            .collect()
    }

    fn boolean_query(terms: BTreeSet<Term>) -> BooleanQuery {
        let mut boolean_query = BooleanQuery::new_multiterms_query(terms.into_iter().collect());
        boolean_query.set_disable_coord(true);
        boolean_query
    }

    fn filter_weight(&self) -> Box<dyn Weight> {
        Box::new(TermRangeFilterWeight {
            query: self.clone(),
        })
    }

    /// `ConstantScoreAuto` rewrites to a boolean query only when both the
    /// number of terms and the number of postings to visit are small.
    fn use_boolean_rewrite(&self, searcher: &Searcher, terms: &BTreeSet<Term>) -> bool {
        let term_count_limit = DEFAULT_TERM_COUNT_CUTOFF.min(searcher.settings().max_clause_count);
        if terms.len() >= term_count_limit {
            return false;
        }
        let doc_count_cutoff = DEFAULT_DOC_COUNT_PERCENT / 100.0 * searcher.num_docs() as f64;
        let doc_visit_count: u64 = terms.iter().map(|term| searcher.doc_freq(term)).sum();
        (doc_visit_count as f64) < doc_count_cutoff
    }
}

impl fmt::Display for TermRangeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.field)?;
        match &self.lower_bound {
            Bound::Included(text) => write!(f, "[{text}")?,
            Bound::Excluded(text) => write!(f, "{{{text}")?,
            Bound::Unbounded => write!(f, "[*")?,
        }
        write!(f, " TO ")?;
        match &self.upper_bound {
            Bound::Included(text) => write!(f, "{text}]"),
            Bound::Excluded(text) => write!(f, "{text}}}"),
            Bound::Unbounded => write!(f, "*]"),
        }
    }
}

impl Query for TermRangeQuery {
    fn weight(&self, enable_scoring: EnableScoring<'_>) -> crate::Result<Box<dyn Weight>> {
        let searcher = enable_scoring.searcher();
        match self.rewrite_method {
            RewriteMethod::ScoringBoolean => {
                let terms = self.collect_terms(searcher);
                TermRangeQuery::boolean_query(terms).weight(enable_scoring)
            }
            RewriteMethod::ConstantScoreBoolean => {
                let terms = self.collect_terms(searcher);
                let boolean_query = TermRangeQuery::boolean_query(terms);
                ConstScoreQuery::new(Box::new(boolean_query), 1.0).weight(enable_scoring)
            }
            RewriteMethod::ConstantScoreFilter => Ok(self.filter_weight()),
            RewriteMethod::ConstantScoreAuto => {
                let terms = self.collect_terms(searcher);
                if self.use_boolean_rewrite(searcher, &terms) {
                    let boolean_query = TermRangeQuery::boolean_query(terms);
                    ConstScoreQuery::new(Box::new(boolean_query), 1.0).weight(enable_scoring)
                } else {
                    debug!("{self}: {} terms, rewriting to a filter", terms.len());
                    Ok(self.filter_weight())
                }
            }
        }
    }
}

/// Gathers the documents of the terms of the range in a bitset.
struct TermRangeFilterWeight {
    query: TermRangeQuery,
}

impl TermRangeFilterWeight {
    fn bitset(&self, reader: &SegmentReader) -> BitSet {
        let mut doc_bitset = BitSet::with_max_value(reader.max_doc());
        let terms = reader.terms_in_range(
            &self.query.field,
            as_str_bound(&self.query.lower_bound),
            as_str_bound(&self.query.upper_bound),
        );
        for term in terms {
            if let Some(mut postings) = reader.read_postings(term) {
                let mut doc = postings.doc();
                while doc != TERMINATED {
                    doc_bitset.insert(doc);
                    doc = postings.advance();
                }
            }
        }
        doc_bitset
    }
}

impl Weight for TermRangeFilterWeight {
    fn scorer(&self, reader: &SegmentReader, boost: Score) -> crate::Result<Option<ScorerNode>> {
        let doc_bitset = self.bitset(reader);
        if doc_bitset.len() == 0 {
            return Ok(None);
        }
        let docset = BitSetDocSet::from(doc_bitset);
        Ok(Some(ScorerNode::leaf(ConstScorer::new(docset, boost))))
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        if !self.bitset(reader).contains(doc) {
            return Err(does_not_match(doc));
        }
        Ok(Explanation::new(format!("ConstantScore({})", self.query), 1.0))
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        Ok(self.bitset(reader).len() as u32)
    }
}
