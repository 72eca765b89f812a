//! # Collectors
//!
//! Collectors define the information you want to extract from the documents matching the queries.
//! In `occur` jargon, we call this information your search "fruit".
//!
//! The crate ships with a few collectors:
//! - [`Count`]: counts the matching documents.
//! - [`TopDocs`]: the best scored documents.
//! - [`DocSetCollector`]: the set of matching [`DocAddress`](crate::DocAddress)es.
//!
//! Every collector tells the searcher whether it needs scores, and whether it
//! can receive the documents of a segment out of doc id order. The latter
//! allows a boolean query without required clauses to use its bucketed scorer.

use crate::query::{HitView, Weight};
use crate::{DocId, Score, SegmentOrdinal, SegmentReader};

mod count_collector;
pub use self::count_collector::Count;

mod docset_collector;
pub use self::docset_collector::DocSetCollector;

mod top_score_collector;
pub use self::top_score_collector::TopDocs;


/// `Fruit` is the type for the result of our collection.
/// e.g. `usize` for the `Count` collector.
pub trait Fruit: Send + 'static {}

impl<T> Fruit for T where T: Send + 'static {}

/// Collectors are in charge of collecting and retaining relevant
/// information from the document found and scored by the query.
///
/// For instance,
///
/// - keeping track of the top 10 best documents
/// - computing the number of documents matching the query
///
/// Our search index is in fact a collection of segments, so
/// a `Collector` trait is actually more of a factory to instance
/// `SegmentCollector`s for each segments.
///
/// The collection logic itself is in the `SegmentCollector`.
///
/// Segments are not guaranteed to be visited in any specific order.
pub trait Collector: Sync + Send {
    /// `Fruit` is the type for the result of our collection.
    /// e.g. `usize` for the `Count` collector.
    type Fruit: Fruit;

    /// Type of the `SegmentCollector` associated with this collector.
    type Child: SegmentCollector;

    /// `set_segment` is called before beginning to enumerate
    /// on this segment.
    fn for_segment(
        &self,
        segment_local_id: SegmentOrdinal,
        segment: &SegmentReader,
    ) -> crate::Result<Self::Child>;

    /// Returns true iff the collector requires to compute scores for documents.
    fn requires_scoring(&self) -> bool;

    /// Returns true iff the segment collector does not need to receive
    /// the documents in increasing doc id order.
    fn accepts_docs_out_of_order(&self) -> bool {
        false
    }

    /// Combines the fruit associated to the collection of each segments
    /// into one fruit.
    fn merge_fruits(
        &self,
        segment_fruits: Vec<<Self::Child as SegmentCollector>::Fruit>,
    ) -> crate::Result<Self::Fruit>;

    /// Creates a segment collector and feeds it with the hits of the weight
    /// on the given segment.
    fn collect_segment(
        &self,
        weight: &dyn Weight,
        segment_ord: u32,
        reader: &SegmentReader,
    ) -> crate::Result<<Self::Child as SegmentCollector>::Fruit> {
        let mut segment_collector = self.for_segment(segment_ord, reader)?;
        let in_order = !self.accepts_docs_out_of_order();
        if let Some(mut bulk_scorer) = weight.bulk_scorer(reader, 1.0, in_order)? {
            bulk_scorer.score_all(&mut |hit: &HitView| {
                segment_collector.collect(hit.doc, hit.score);
            });
        }
        Ok(segment_collector.harvest())
    }
}

/// The `SegmentCollector` is the trait in charge of defining the
/// collect operation at the scale of the segment.
///
/// `.collect(doc, score)` is called for each document matching
/// the query.
pub trait SegmentCollector: 'static {
    /// `Fruit` is the type for the result of our collection.
    /// e.g. `usize` for the `Count` collector.
    type Fruit: Fruit;

    /// The query pushes the scored document to the collector via this method.
    fn collect(&mut self, doc: DocId, score: Score);

    /// Extract the fruit of the collection from the `SegmentCollector`.
    fn harvest(self) -> Self::Fruit;
}
