use std::sync::Arc;

use crate::common::TinySet;
use crate::query::bulk_scorer::{HORIZON, HORIZON_NUM_TINYBITSETS};
use crate::query::{BulkScorer, HitView};
use crate::{DocId, Score};

/// Accumulated state of a document within the current window.
#[derive(Clone, Copy, Default)]
struct Bucket {
    score: Score,
    // Number of optional clauses matching the document.
    coord: u32,
    prohibited: bool,
}

struct SubScorer {
    bulk_scorer: Box<dyn BulkScorer>,
    more: bool,
}

impl SubScorer {
    fn new(bulk_scorer: Box<dyn BulkScorer>) -> SubScorer {
        SubScorer {
            bulk_scorer,
            more: true,
        }
    }
}

/// Scores the sub bulk scorers of a window, accumulating their hits in the buckets.
fn fill_window(
    sub_scorers: &mut [SubScorer],
    buckets: &mut [Bucket; HORIZON as usize],
    live: &mut [TinySet; HORIZON_NUM_TINYBITSETS],
    window_start: DocId,
    window_end: DocId,
    prohibited: bool,
) {
    for sub_scorer in sub_scorers.iter_mut().filter(|sub_scorer| sub_scorer.more) {
        sub_scorer.more = sub_scorer.bulk_scorer.score_until(
            &mut |hit: &HitView| {
                debug_assert!(hit.doc >= window_start && hit.doc < window_end);
                let delta = hit.doc - window_start;
                live[(delta / 64) as usize].insert_mut(delta % 64u32);
                let bucket = &mut buckets[delta as usize];
                if prohibited {
                    bucket.prohibited = true;
                } else {
                    bucket.score += hit.score;
                    bucket.coord += 1;
                }
            },
            window_end,
        );
    }
}

/// Bucketed bulk scorer of a boolean query without required clauses.
///
/// The doc id space is scanned one window of `HORIZON` documents at a time.
/// Every sub-scorer pushes its hits of the window into a table of buckets,
/// which is then flushed in doc id order: a document is emitted if no
/// prohibited clause matched it and if enough optional clauses did.
pub(crate) struct BooleanScorer {
    optional: Vec<SubScorer>,
    prohibited: Vec<SubScorer>,
    minimum_matches_required: u32,
    coords: Arc<[Score]>,
    buckets: Box<[Bucket; HORIZON as usize]>,
    live: Box<[TinySet; HORIZON_NUM_TINYBITSETS]>,
    window_start: DocId,
}

impl BooleanScorer {
    /// `coords` must hold at least `optional.len() + 1` factors.
    pub fn new(
        optional: Vec<Box<dyn BulkScorer>>,
        prohibited: Vec<Box<dyn BulkScorer>>,
        minimum_matches_required: usize,
        coords: Arc<[Score]>,
    ) -> BooleanScorer {
        debug_assert!(coords.len() > optional.len());
        BooleanScorer {
            optional: optional.into_iter().map(SubScorer::new).collect(),
            prohibited: prohibited.into_iter().map(SubScorer::new).collect(),
            minimum_matches_required: minimum_matches_required.max(1) as u32,
            coords,
            buckets: Box::new([Bucket::default(); HORIZON as usize]),
            live: Box::new([TinySet::empty(); HORIZON_NUM_TINYBITSETS]),
            window_start: 0,
        }
    }

    fn has_more(&self) -> bool {
        self.optional.iter().any(|sub_scorer| sub_scorer.more)
    }

    /// Emits the matching documents of the window, and clears the buckets.
    fn flush_window(&mut self, callback: &mut dyn FnMut(&HitView)) {
        let mut hit = HitView::default();
        for (bucket_id, tinyset) in self.live.iter_mut().enumerate() {
            while let Some(lower) = tinyset.pop_lowest() {
                let delta = bucket_id as u32 * 64 + lower;
                let bucket = std::mem::take(&mut self.buckets[delta as usize]);
                if bucket.prohibited || bucket.coord < self.minimum_matches_required {
                    continue;
                }
                hit.doc = self.window_start + delta;
                hit.score = bucket.score * self.coords[bucket.coord as usize];
                hit.freq = bucket.coord;
                callback(&hit);
            }
        }
    }
}

impl BulkScorer for BooleanScorer {
    fn score_until(&mut self, callback: &mut dyn FnMut(&HitView), max: DocId) -> bool {
        while self.window_start < max && self.has_more() {
            let window_end = self.window_start.saturating_add(HORIZON).min(max);
            fill_window(
                &mut self.optional,
                &mut self.buckets,
                &mut self.live,
                self.window_start,
                window_end,
                false,
            );
            fill_window(
                &mut self.prohibited,
                &mut self.buckets,
                &mut self.live,
                self.window_start,
                window_end,
                true,
            );
            self.flush_window(callback);
            self.window_start = window_end;
        }
        self.has_more()
    }
}
