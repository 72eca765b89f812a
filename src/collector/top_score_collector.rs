use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use super::{Collector, SegmentCollector};
use crate::{DocAddress, DocId, Score, SegmentOrdinal, SegmentReader};

/// Contains a feature (score) and a document address.
///
/// The ordering is reversed: a "greater" `ComparableDoc` is a worse hit.
/// This makes the top of a `BinaryHeap` the hit to evict, and sorting
/// ascending yields the best hits first. Ties are broken by doc address,
/// which makes the result stable.
#[derive(Clone, Copy, Debug)]
struct ComparableDoc {
    score: Score,
    doc: DocAddress,
}

impl PartialOrd for ComparableDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComparableDoc {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.doc.cmp(&other.doc))
    }
}

impl PartialEq for ComparableDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableDoc {}

/// The `TopDocs` collector keeps track of the top `K` documents
/// sorted by their score.
///
/// The implementation is based on a `BinaryHeap`.
/// The theoretical complexity for collecting the top `K` out of `n` documents
/// is `O(n log K)`.
///
/// This collector guarantees a stable sorting in case of a tie on the
/// document score. As such, it is suitable to implement pagination.
///
/// ```rust
/// use occur::collector::TopDocs;
/// use occur::query::TermQuery;
/// use occur::{DocAddress, Searcher, SegmentReader, Term};
///
/// let segment = SegmentReader::for_texts(
///     "title",
///     &["The Name of the Wind", "The Diary of Muadib", "A Dairy Cow", "The Diary Diary"],
/// );
/// let searcher = Searcher::new(vec![segment]);
/// let query = TermQuery::new(Term::new("title", "Diary"));
/// let top_docs = searcher.search(&query, &TopDocs::with_limit(2)).unwrap();
///
/// assert_eq!(top_docs[0].1, DocAddress::new(0, 3));
/// assert_eq!(top_docs[1].1, DocAddress::new(0, 1));
/// ```
pub struct TopDocs {
    limit: usize,
}

impl fmt::Debug for TopDocs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopDocs(limit={})", self.limit)
    }
}

impl TopDocs {
    /// Creates a top score collector, with a number of documents equal to "limit".
    ///
    /// # Panics
    /// The method panics if limit is 0
    pub fn with_limit(limit: usize) -> TopDocs {
        assert!(limit >= 1, "Limit must be strictly greater than 0.");
        TopDocs { limit }
    }
}

impl Collector for TopDocs {
    type Fruit = Vec<(Score, DocAddress)>;

    type Child = TopScoreSegmentCollector;

    fn for_segment(
        &self,
        segment_local_id: SegmentOrdinal,
        _reader: &SegmentReader,
    ) -> crate::Result<Self::Child> {
        Ok(TopScoreSegmentCollector {
            limit: self.limit,
            segment_ord: segment_local_id,
            heap: BinaryHeap::with_capacity(self.limit),
        })
    }

    fn requires_scoring(&self) -> bool {
        true
    }

    fn accepts_docs_out_of_order(&self) -> bool {
        true
    }

    fn merge_fruits(
        &self,
        child_fruits: Vec<Vec<(Score, DocAddress)>>,
    ) -> crate::Result<Self::Fruit> {
        let mut hits: Vec<ComparableDoc> = child_fruits
            .into_iter()
            .flatten()
            .map(|(score, doc)| ComparableDoc { score, doc })
            .collect();
        hits.sort();
        hits.truncate(self.limit);
        Ok(hits.into_iter().map(|hit| (hit.score, hit.doc)).collect())
    }
}

/// Segment Collector associated to `TopDocs`.
pub struct TopScoreSegmentCollector {
    limit: usize,
    segment_ord: SegmentOrdinal,
    heap: BinaryHeap<ComparableDoc>,
}

impl SegmentCollector for TopScoreSegmentCollector {
    type Fruit = Vec<(Score, DocAddress)>;

    fn collect(&mut self, doc: DocId, score: Score) {
        let hit = ComparableDoc {
            score,
            doc: DocAddress::new(self.segment_ord, doc),
        };
        if self.heap.len() < self.limit {
            self.heap.push(hit);
        } else if let Some(mut worst) = self.heap.peek_mut() {
            if hit < *worst {
                *worst = hit;
            }
        }
    }

    fn harvest(self) -> Vec<(Score, DocAddress)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|hit| (hit.score, hit.doc))
            .collect()
    }
}
