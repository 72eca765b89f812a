use crate::core::SegmentReader;
use crate::query::{BulkScorer, DefaultBulkScorer, Explanation, ScorerNode};
use crate::{DocId, DocSet, Score};

/// A Weight is the specialization of a Query
/// for a given set of segments.
///
/// See [`Query`](crate::query::Query).
pub trait Weight: Send + Sync + 'static {
    /// Returns the scorer for the given segment, or `None` if no document
    /// of the segment can match.
    ///
    /// `boost` is a multiplier to apply to the score.
    ///
    /// See [`Query`](crate::query::Query).
    fn scorer(&self, reader: &SegmentReader, boost: Score) -> crate::Result<Option<ScorerNode>>;

    /// Returns a bulk scorer for the given segment.
    ///
    /// If `in_order` is true, the documents have to be delivered in
    /// increasing doc id order. Otherwise the weight is free to pick a
    /// strategy delivering the documents of a window in any order.
    fn bulk_scorer(
        &self,
        reader: &SegmentReader,
        boost: Score,
        _in_order: bool,
    ) -> crate::Result<Option<Box<dyn BulkScorer>>> {
        Ok(self
            .scorer(reader, boost)?
            .map(|scorer| Box::new(DefaultBulkScorer::new(scorer)) as Box<dyn BulkScorer>))
    }

    /// Number of leaf clauses this weight expands to.
    ///
    /// This is what `max_clause_count` is checked against.
    fn num_clauses(&self) -> usize {
        1
    }

    /// Returns an `Explanation` for the given document.
    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation>;

    /// Returns the number documents within the given `SegmentReader`.
    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        Ok(self
            .scorer(reader, 1.0)?
            .map(|mut scorer| scorer.count())
            .unwrap_or(0))
    }
}
