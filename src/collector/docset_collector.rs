use std::collections::HashSet;

use super::{Collector, SegmentCollector};
use crate::{DocAddress, DocId, Score, SegmentOrdinal, SegmentReader};

/// Set of the addresses of the matching documents.
///
/// Documents may be delivered in any order, which lets boolean queries
/// use their bucketed scorer.
pub struct DocSetCollector;

impl Collector for DocSetCollector {
    type Fruit = HashSet<DocAddress>;
    type Child = DocSetSegmentCollector;

    fn for_segment(
        &self,
        segment_ord: SegmentOrdinal,
        _reader: &SegmentReader,
    ) -> crate::Result<DocSetSegmentCollector> {
        Ok(DocSetSegmentCollector {
            segment_ord,
            docs: Vec::new(),
        })
    }

    fn requires_scoring(&self) -> bool {
        false
    }

    fn accepts_docs_out_of_order(&self) -> bool {
        true
    }

    fn merge_fruits(&self, segment_fruits: Vec<Vec<DocAddress>>) -> crate::Result<Self::Fruit> {
        Ok(segment_fruits.into_iter().flatten().collect())
    }
}

/// Segment collector associated to `DocSetCollector`.
pub struct DocSetSegmentCollector {
    segment_ord: SegmentOrdinal,
    docs: Vec<DocAddress>,
}

impl SegmentCollector for DocSetSegmentCollector {
    type Fruit = Vec<DocAddress>;

    fn collect(&mut self, doc: DocId, _score: Score) {
        self.docs.push(DocAddress::new(self.segment_ord, doc));
    }

    fn harvest(self) -> Vec<DocAddress> {
        self.docs
    }
}
