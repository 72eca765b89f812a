use crate::docset::{DocSet, TERMINATED};
use crate::query::{Scorer, ScorerNode};
use crate::{DocId, Score};

pub(crate) const HORIZON_NUM_TINYBITSETS: usize = 64;
/// Width of the doc id windows scored at once by bulk scorers.
pub(crate) const HORIZON: u32 = 64u32 * HORIZON_NUM_TINYBITSETS as u32;

/// A matching document, as delivered by a [`BulkScorer`].
///
/// The same `HitView` is reused for all of the hits of a window:
/// callbacks must copy what they need to keep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitView {
    /// The matching document.
    pub doc: DocId,
    /// Its score.
    pub score: Score,
    /// Its match frequency.
    pub freq: u32,
}

/// Pushes the matching documents of a segment to a callback.
///
/// Contrary to a [`Scorer`], a bulk scorer is free to deliver the documents
/// of a window in any order.
pub trait BulkScorer: Send {
    /// Scores the documents lower than `max` that have not been scored yet.
    ///
    /// Returns `false` if the bulk scorer is exhausted, `true` if more
    /// documents may remain. Successive calls must use increasing `max`.
    fn score_until(&mut self, callback: &mut dyn FnMut(&HitView), max: DocId) -> bool;

    /// Scores all of the remaining documents.
    fn score_all(&mut self, callback: &mut dyn FnMut(&HitView)) {
        self.score_until(callback, TERMINATED);
    }
}

/// Bulk scorer driving a pull scorer, delivering documents in order.
pub struct DefaultBulkScorer<TScorer = ScorerNode> {
    scorer: TScorer,
}

impl<TScorer: Scorer> DefaultBulkScorer<TScorer> {
    /// Wraps a scorer.
    pub fn new(scorer: TScorer) -> DefaultBulkScorer<TScorer> {
        DefaultBulkScorer { scorer }
    }
}

impl<TScorer: Scorer> BulkScorer for DefaultBulkScorer<TScorer> {
    fn score_until(&mut self, callback: &mut dyn FnMut(&HitView), max: DocId) -> bool {
        let mut hit = HitView::default();
        let mut doc = self.scorer.doc();
        while doc < max {
            hit.doc = doc;
            hit.score = self.scorer.score();
            hit.freq = self.scorer.freq();
            callback(&hit);
            doc = self.scorer.advance();
        }
        doc != TERMINATED
    }
}

/// Pull view over a [`BulkScorer`].
///
/// The hits are buffered one window at a time, and sorted by doc id.
pub struct BulkScorerDocSet {
    bulk_scorer: Box<dyn BulkScorer>,
    buffer: Vec<HitView>,
    cursor: usize,
    // Every document lower than `scored_until` has been pushed by the bulk scorer.
    scored_until: DocId,
    has_more: bool,
}

impl BulkScorerDocSet {
    /// Creates a docset positioned on the first hit of the bulk scorer.
    pub fn new(bulk_scorer: Box<dyn BulkScorer>) -> BulkScorerDocSet {
        let mut docset = BulkScorerDocSet {
            bulk_scorer,
            buffer: Vec::new(),
            cursor: 0,
            scored_until: 0,
            has_more: true,
        };
        docset.refill();
        docset
    }

    fn current(&self) -> Option<&HitView> {
        self.buffer.get(self.cursor)
    }

    /// Scores windows until at least one hit is buffered or the bulk
    /// scorer is exhausted.
    fn refill(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        while self.buffer.is_empty() && self.has_more {
            let window_end = self.scored_until.saturating_add(HORIZON).min(TERMINATED);
            let buffer = &mut self.buffer;
            self.has_more = self
                .bulk_scorer
                .score_until(&mut |hit: &HitView| buffer.push(*hit), window_end);
            self.scored_until = window_end;
            if window_end == TERMINATED {
                self.has_more = false;
            }
        }
        self.buffer.sort_unstable_by_key(|hit| hit.doc);
    }
}

impl DocSet for BulkScorerDocSet {
    fn advance(&mut self) -> DocId {
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
        if self.cursor == self.buffer.len() {
            self.refill();
        }
        self.doc()
    }

    fn seek(&mut self, target: DocId) -> DocId {
        let doc = self.doc();
        if doc >= target {
            return doc;
        }
        if self.buffer.last().map(|hit| hit.doc >= target).unwrap_or(false) {
            self.cursor += self.buffer[self.cursor..].partition_point(|hit| hit.doc < target);
            return self.doc();
        }
        if self.has_more && self.scored_until < target {
            // Documents before the target are scored and dropped.
            self.has_more = self.bulk_scorer.score_until(&mut |_| {}, target);
            self.scored_until = target;
        }
        self.refill();
        self.doc()
    }

    fn doc(&self) -> DocId {
        self.current().map(|hit| hit.doc).unwrap_or(TERMINATED)
    }

    fn size_hint(&self) -> u32 {
        (self.buffer.len() - self.cursor.min(self.buffer.len())) as u32
    }
}

impl Scorer for BulkScorerDocSet {
    fn score(&mut self) -> Score {
        self.current().map(|hit| hit.score).unwrap_or(0.0)
    }

    fn freq(&mut self) -> u32 {
        self.current().map(|hit| hit.freq).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::{BulkScorer, BulkScorerDocSet, DefaultBulkScorer, HitView, HORIZON};
    use crate::docset::{DocSet, TERMINATED};
    use crate::query::{ConstScorer, Scorer, VecDocSet};
    use crate::tests::{sample_with_seed, test_seek_against_unoptimized};
    use crate::DocId;

    /// Delivers the docs of each window in decreasing order.
    struct ReversedBulkScorer {
        docs: Vec<DocId>,
        cursor: usize,
    }

    impl BulkScorer for ReversedBulkScorer {
        fn score_until(&mut self, callback: &mut dyn FnMut(&HitView), max: DocId) -> bool {
            let start = self.cursor;
            while self.cursor < self.docs.len() && self.docs[self.cursor] < max {
                self.cursor += 1;
            }
            for &doc in self.docs[start..self.cursor].iter().rev() {
                callback(&HitView {
                    doc,
                    score: doc as f32,
                    freq: 1,
                });
            }
            self.cursor < self.docs.len()
        }
    }

    fn bulk_docs(bulk_scorer: &mut dyn BulkScorer) -> Vec<DocId> {
        let mut docs = Vec::new();
        bulk_scorer.score_all(&mut |hit| docs.push(hit.doc));
        docs
    }

    #[test]
    fn test_default_bulk_scorer() {
        let mut bulk_scorer =
            DefaultBulkScorer::new(ConstScorer::new(VecDocSet::from(vec![1, 5, 8, 100]), 2.0));
        let mut docs = Vec::new();
        assert!(bulk_scorer.score_until(&mut |hit| docs.push((hit.doc, hit.score)), 8));
        assert_eq!(docs, vec![(1, 2.0), (5, 2.0)]);
        assert_eq!(bulk_docs(&mut bulk_scorer), vec![8, 100]);
        assert!(!bulk_scorer.score_until(&mut |_| {}, TERMINATED));
    }

    #[test]
    fn test_bulk_scorer_docset_sorts_windows() {
        let docs = vec![0, 3, 7, HORIZON - 1, HORIZON, 3 * HORIZON + 2];
        let mut docset = BulkScorerDocSet::new(Box::new(ReversedBulkScorer {
            docs: docs.clone(),
            cursor: 0,
        }));
        let mut found = Vec::new();
        while docset.doc() != TERMINATED {
            assert_eq!(docset.score(), docset.doc() as f32);
            assert_eq!(docset.freq(), 1);
            found.push(docset.doc());
            docset.advance();
        }
        assert_eq!(found, docs);
    }

    #[test]
    fn test_bulk_scorer_docset_empty() {
        let mut docset = BulkScorerDocSet::new(Box::new(ReversedBulkScorer {
            docs: vec![],
            cursor: 0,
        }));
        assert_eq!(docset.doc(), TERMINATED);
        assert_eq!(docset.advance(), TERMINATED);
        assert_eq!(docset.seek(10), TERMINATED);
    }

    #[test]
    fn test_bulk_scorer_docset_seek_against_unoptimized() {
        let docs = sample_with_seed(20_000, 0.02, 7);
        let targets = sample_with_seed(20_000, 0.005, 8);
        test_seek_against_unoptimized(
            || {
                Box::new(BulkScorerDocSet::new(Box::new(ReversedBulkScorer {
                    docs: docs.clone(),
                    cursor: 0,
                })))
            },
            targets,
        );
    }
}
