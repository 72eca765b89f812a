#![allow(dead_code)]

use occur::collector::{Collector, SegmentCollector};
use occur::query::Scorer;
use occur::{DocAddress, DocId, DocSet, Score, SegmentOrdinal, SegmentReader, TERMINATED};

/// Collects every hit with its score, sorted by doc address once merged.
///
/// `out_of_order` decides whether boolean queries may use their bucketed
/// scorer.
pub struct HitsCollector {
    pub out_of_order: bool,
}

pub const IN_ORDER: HitsCollector = HitsCollector {
    out_of_order: false,
};

pub const OUT_OF_ORDER: HitsCollector = HitsCollector { out_of_order: true };

pub struct HitsSegmentCollector {
    segment_ord: SegmentOrdinal,
    hits: Vec<(DocAddress, Score)>,
}

impl Collector for HitsCollector {
    type Fruit = Vec<(DocAddress, Score)>;
    type Child = HitsSegmentCollector;

    fn for_segment(
        &self,
        segment_ord: SegmentOrdinal,
        _reader: &SegmentReader,
    ) -> occur::Result<HitsSegmentCollector> {
        Ok(HitsSegmentCollector {
            segment_ord,
            hits: Vec::new(),
        })
    }

    fn requires_scoring(&self) -> bool {
        true
    }

    fn accepts_docs_out_of_order(&self) -> bool {
        self.out_of_order
    }

    fn merge_fruits(
        &self,
        segment_fruits: Vec<Vec<(DocAddress, Score)>>,
    ) -> occur::Result<Vec<(DocAddress, Score)>> {
        let mut hits: Vec<(DocAddress, Score)> = segment_fruits.into_iter().flatten().collect();
        hits.sort_by_key(|(doc_address, _)| *doc_address);
        Ok(hits)
    }
}

impl SegmentCollector for HitsSegmentCollector {
    type Fruit = Vec<(DocAddress, Score)>;

    fn collect(&mut self, doc: DocId, score: Score) {
        self.hits.push((DocAddress::new(self.segment_ord, doc), score));
    }

    fn harvest(self) -> Vec<(DocAddress, Score)> {
        self.hits
    }
}

/// Doc ids of the hits, for single segment searchers.
pub fn doc_ids(hits: &[(DocAddress, Score)]) -> Vec<DocId> {
    hits.iter().map(|(doc_address, _)| doc_address.doc_id).collect()
}

/// Asserts two hit lists hold the same docs with nearly equal scores.
pub fn assert_same_hits(left: &[(DocAddress, Score)], right: &[(DocAddress, Score)]) {
    assert_eq!(
        left.iter().map(|(doc, _)| *doc).collect::<Vec<_>>(),
        right.iter().map(|(doc, _)| *doc).collect::<Vec<_>>()
    );
    for ((_, left_score), (_, right_score)) in left.iter().zip(right) {
        occur::assert_nearly_equals!(*left_score, *right_score, 0.0001);
    }
}

/// Exhaustive minimum-should-match scorer: every doc of `[0, max_doc)` is
/// checked against every posting list.
///
/// Each matching sub-scorer contributes `1.0`, and the score is multiplied
/// by `coords[num_matches]`.
pub struct SlowMinShouldMatchScorer {
    postings: Vec<Vec<DocId>>,
    minimum_matches_required: usize,
    coords: Vec<Score>,
    max_doc: DocId,
    doc: DocId,
    freq: u32,
}

impl SlowMinShouldMatchScorer {
    pub fn new(
        postings: Vec<Vec<DocId>>,
        minimum_matches_required: usize,
        coords: Vec<Score>,
        max_doc: DocId,
    ) -> SlowMinShouldMatchScorer {
        let mut scorer = SlowMinShouldMatchScorer {
            postings,
            minimum_matches_required: minimum_matches_required.max(1),
            coords,
            max_doc,
            doc: 0,
            freq: 0,
        };
        scorer.go_to_match_from(0);
        scorer
    }

    fn num_matches(&self, doc: DocId) -> usize {
        self.postings
            .iter()
            .filter(|docs| docs.binary_search(&doc).is_ok())
            .count()
    }

    fn go_to_match_from(&mut self, mut doc: DocId) -> DocId {
        while doc < self.max_doc {
            let num_matches = self.num_matches(doc);
            if num_matches >= self.minimum_matches_required {
                self.doc = doc;
                self.freq = num_matches as u32;
                return doc;
            }
            doc += 1;
        }
        self.doc = TERMINATED;
        self.freq = 0;
        TERMINATED
    }
}

impl DocSet for SlowMinShouldMatchScorer {
    fn advance(&mut self) -> DocId {
        if self.doc == TERMINATED {
            return TERMINATED;
        }
        let next = self.doc + 1;
        self.go_to_match_from(next)
    }

    fn seek(&mut self, target: DocId) -> DocId {
        if self.doc >= target {
            return self.doc;
        }
        self.go_to_match_from(target)
    }

    fn doc(&self) -> DocId {
        self.doc
    }

    fn size_hint(&self) -> u32 {
        self.max_doc
    }
}

impl Scorer for SlowMinShouldMatchScorer {
    fn score(&mut self) -> Score {
        self.freq as Score * self.coords[self.freq as usize]
    }

    fn freq(&mut self) -> u32 {
        self.freq
    }
}
