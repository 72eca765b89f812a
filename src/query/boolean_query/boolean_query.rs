use std::fmt;

use super::boolean_weight::BooleanWeight;
use crate::query::coord::coord_table;
use crate::query::{EnableScoring, Occur, Query, TermQuery, Weight};
use crate::{QueryError, Term};

/// The boolean query returns a set of documents
/// that matches the Boolean combination of constituent subqueries.
///
/// The documents matched by the boolean query are those which
/// - match all of the sub queries associated with the `Must` occurrence
/// - match none of the sub queries associated with the `MustNot` occurrence.
/// - match at least `minimum_number_should_match` of the sub queries associated with the
///   `Should` occurrence. If this number is `0`, a document matching no `Should` sub query
///   still needs to match at least one `Must` sub query.
///
/// A query made only of `MustNot` clauses matches nothing.
///
/// The score of a matching document is the sum of the scores of its matching
/// non-prohibited clauses, multiplied by a coordination factor. The factor is
/// given by the searcher's [`CoordinationPolicy`](crate::query::CoordinationPolicy)
/// from the number of matching clauses and the number of non-prohibited clauses.
///
/// You can combine other query types and their `Occur`ances into one `BooleanQuery`
///
/// ```rust
/// use occur::collector::Count;
/// use occur::query::{BooleanQuery, Occur, Query, TermQuery};
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
/// let term_query = |text: &str| -> Box<dyn Query> {
///     Box::new(TermQuery::new(Term::new("title", text)))
/// };
///
/// // "Diary" but not "Girl".
/// let query = BooleanQuery::new(vec![
///     (Occur::Must, term_query("Diary")),
///     (Occur::MustNot, term_query("Girl")),
/// ]);
/// assert_eq!(searcher.search(&query, &Count)?, 1);
///
/// // At least two of "The", "Diary" and "Cow".
/// let query = BooleanQuery::with_minimum_required_clauses(
///     vec![
///         (Occur::Should, term_query("The")),
///         (Occur::Should, term_query("Diary")),
///         (Occur::Should, term_query("Cow")),
///     ],
///     2,
/// );
/// assert_eq!(searcher.search(&query, &Count)?, 2);
/// # Ok(())
/// # }
/// ```
pub struct BooleanQuery {
    subqueries: Vec<(Occur, Box<dyn Query>)>,
    minimum_number_should_match: usize,
    disable_coord: bool,
}

impl Clone for BooleanQuery {
    fn clone(&self) -> Self {
        let subqueries = self
            .subqueries
            .iter()
            .map(|(occur, subquery)| (*occur, subquery.box_clone()))
            .collect::<Vec<_>>();
        BooleanQuery {
            subqueries,
            minimum_number_should_match: self.minimum_number_should_match,
            disable_coord: self.disable_coord,
        }
    }
}

impl fmt::Debug for BooleanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BooleanQuery(")?;
        for (i, (occur, subquery)) in self.subqueries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{occur}{subquery:?}")?;
        }
        write!(f, ")")?;
        if self.minimum_number_should_match > 0 {
            write!(f, "~{}", self.minimum_number_should_match)?;
        }
        Ok(())
    }
}

impl From<Vec<(Occur, Box<dyn Query>)>> for BooleanQuery {
    fn from(subqueries: Vec<(Occur, Box<dyn Query>)>) -> BooleanQuery {
        BooleanQuery::new(subqueries)
    }
}

impl Query for BooleanQuery {
    fn weight(&self, enable_scoring: EnableScoring<'_>) -> crate::Result<Box<dyn Weight>> {
        if let Some(subquery) = self.single_clause() {
            return subquery.weight(enable_scoring);
        }
        let searcher = enable_scoring.searcher();
        let settings = searcher.settings();
        let sub_weights = self
            .subqueries
            .iter()
            .map(|(occur, subquery)| Ok((*occur, subquery.weight(enable_scoring)?)))
            .collect::<crate::Result<Vec<(Occur, Box<dyn Weight>)>>>()?;
        let num_clauses: usize = sub_weights
            .iter()
            .map(|(_, weight)| weight.num_clauses())
            .sum();
        if num_clauses > settings.max_clause_count {
            warn!(
                "Rejecting boolean query with {num_clauses} clauses (max_clause_count={})",
                settings.max_clause_count
            );
            return Err(QueryError::TooManyClauses {
                num_clauses,
                max_clause_count: settings.max_clause_count,
            });
        }
        let max_coord = sub_weights
            .iter()
            .filter(|(occur, _)| *occur != Occur::MustNot)
            .count() as u32;
        let coords = coord_table(
            searcher.coordination_policy(),
            max_coord,
            self.disable_coord,
        );
        Ok(Box::new(BooleanWeight::new(
            sub_weights,
            self.minimum_number_should_match,
            coords,
            num_clauses,
            settings.bucketed_clause_threshold,
        )))
    }

    fn query_terms<'a>(&'a self, visitor: &mut dyn FnMut(&'a Term)) {
        for (_occur, subquery) in &self.subqueries {
            subquery.query_terms(visitor);
        }
    }
}

impl BooleanQuery {
    /// Creates a new boolean query.
    pub fn new(subqueries: Vec<(Occur, Box<dyn Query>)>) -> BooleanQuery {
        BooleanQuery {
            subqueries,
            minimum_number_should_match: 0,
            disable_coord: false,
        }
    }

    /// Create a new boolean query with minimum number of required should clauses specified.
    pub fn with_minimum_required_clauses(
        subqueries: Vec<(Occur, Box<dyn Query>)>,
        minimum_number_should_match: usize,
    ) -> BooleanQuery {
        let mut query = BooleanQuery::new(subqueries);
        query.set_minimum_number_should_match(minimum_number_should_match);
        query
    }

    /// Getter for `minimum_number_should_match`
    pub fn get_minimum_number_should_match(&self) -> usize {
        self.minimum_number_should_match
    }

    /// Setter for `minimum_number_should_match`
    ///
    /// A value greater than the number of `Should` clauses is legal: the
    /// query then matches nothing.
    pub fn set_minimum_number_should_match(&mut self, minimum_number_should_match: usize) {
        self.minimum_number_should_match = minimum_number_should_match;
    }

    /// When set, the coordination factor is always `1.0`.
    pub fn set_disable_coord(&mut self, disable_coord: bool) {
        self.disable_coord = disable_coord;
    }

    /// Returns true if the coordination factor is disabled.
    pub fn is_coord_disabled(&self) -> bool {
        self.disable_coord
    }

    /// Returns the intersection of the queries.
    pub fn intersection(queries: Vec<Box<dyn Query>>) -> BooleanQuery {
        let subqueries = queries.into_iter().map(|sub| (Occur::Must, sub)).collect();
        BooleanQuery::new(subqueries)
    }

    /// Returns the union of the queries.
    pub fn union(queries: Vec<Box<dyn Query>>) -> BooleanQuery {
        let subqueries = queries.into_iter().map(|sub| (Occur::Should, sub)).collect();
        BooleanQuery::new(subqueries)
    }

    /// Helper method to create a boolean query matching a given list of terms.
    /// The resulting query is a disjunction of the terms.
    pub fn new_multiterms_query(terms: Vec<Term>) -> BooleanQuery {
        let occur_term_queries: Vec<(Occur, Box<dyn Query>)> = terms
            .into_iter()
            .map(|term| {
                let term_query: Box<dyn Query> = Box::new(TermQuery::new(term));
                (Occur::Should, term_query)
            })
            .collect();
        BooleanQuery::new(occur_term_queries)
    }

    /// Deconstructed view of the clauses making up this query.
    pub fn clauses(&self) -> &[(Occur, Box<dyn Query>)] {
        &self.subqueries[..]
    }

    /// A query made of a single non-prohibited clause, without minimum
    /// number of should clauses, behaves exactly as its clause.
    fn single_clause(&self) -> Option<&dyn Query> {
        match &self.subqueries[..] {
            [(occur, subquery)]
                if *occur != Occur::MustNot && self.minimum_number_should_match == 0 =>
            {
                Some(&**subquery)
            }
            _ => None,
        }
    }
}
