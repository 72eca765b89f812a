use std::sync::Arc;

use crate::docset::{DocSet, TERMINATED};
use crate::query::{Scorer, ScorerNode};
use crate::{DocId, Score};

/// Given a required scorer and an optional scorer
/// matches all document from the required scorer
/// and complements the score using the optional scorer.
///
/// When `optional_required` is set, a document must also be matched by the
/// optional scorer. This is how a minimum number of optional clauses is
/// enforced next to required clauses.
///
/// The score is `(required score + optional score) * coords[freq]`, where
/// `freq` is the sum of the match frequencies of both parts.
pub struct RequiredOptionalScorer<TReqScorer = ScorerNode, TOptScorer = ScorerNode> {
    req_scorer: TReqScorer,
    opt_scorer: TOptScorer,
    optional_required: bool,
    coords: Arc<[Score]>,
    score_cache: Option<(Score, u32)>,
}

impl<TReqScorer, TOptScorer> RequiredOptionalScorer<TReqScorer, TOptScorer>
where
    TReqScorer: Scorer,
    TOptScorer: Scorer,
{
    /// Creates a new `RequiredOptionalScorer`.
    pub fn new(
        req_scorer: TReqScorer,
        opt_scorer: TOptScorer,
        optional_required: bool,
        coords: Arc<[Score]>,
    ) -> RequiredOptionalScorer<TReqScorer, TOptScorer> {
        let mut scorer = RequiredOptionalScorer {
            req_scorer,
            opt_scorer,
            optional_required,
            coords,
            score_cache: None,
        };
        if optional_required {
            scorer.align();
        }
        scorer
    }

    /// Leapfrogs the required and the optional scorers until they agree.
    fn align(&mut self) -> DocId {
        let mut candidate = self.req_scorer.doc();
        loop {
            let mut opt_doc = self.opt_scorer.doc();
            if opt_doc < candidate {
                opt_doc = self.opt_scorer.seek(candidate);
            }
            if opt_doc == candidate {
                return candidate;
            }
            candidate = self.req_scorer.seek(opt_doc);
        }
    }

    fn score_and_freq(&mut self) -> (Score, u32) {
        if let Some(score_and_freq) = self.score_cache {
            return score_and_freq;
        }
        let doc = self.doc();
        let mut score = self.req_scorer.score();
        let mut freq = self.req_scorer.freq();
        let mut opt_doc = self.opt_scorer.doc();
        if opt_doc < doc {
            opt_doc = self.opt_scorer.seek(doc);
        }
        if opt_doc == doc {
            score += self.opt_scorer.score();
            freq += self.opt_scorer.freq();
        }
        let score_and_freq = (score * self.coords[freq as usize], freq);
        self.score_cache = Some(score_and_freq);
        score_and_freq
    }
}

impl<TReqScorer, TOptScorer> DocSet for RequiredOptionalScorer<TReqScorer, TOptScorer>
where
    TReqScorer: Scorer,
    TOptScorer: Scorer,
{
    fn advance(&mut self) -> DocId {
        self.score_cache = None;
        self.req_scorer.advance();
        if self.optional_required {
            self.align()
        } else {
            self.req_scorer.doc()
        }
    }

    fn seek(&mut self, target: DocId) -> DocId {
        let doc = self.doc();
        if doc >= target {
            return doc;
        }
        self.score_cache = None;
        self.req_scorer.seek(target);
        if self.optional_required {
            self.align()
        } else {
            self.req_scorer.doc()
        }
    }

    fn doc(&self) -> DocId {
        self.req_scorer.doc()
    }

    fn size_hint(&self) -> u32 {
        self.req_scorer.size_hint()
    }
}

impl<TReqScorer, TOptScorer> Scorer for RequiredOptionalScorer<TReqScorer, TOptScorer>
where
    TReqScorer: Scorer,
    TOptScorer: Scorer,
{
    fn score(&mut self) -> Score {
        if self.doc() == TERMINATED {
            return 0.0;
        }
        self.score_and_freq().0
    }

    fn freq(&mut self) -> u32 {
        if self.doc() == TERMINATED {
            return 0;
        }
        self.score_and_freq().1
    }
}

#[cfg(test)]
mod tests {
    use super::RequiredOptionalScorer;
    use crate::docset::{DocSet, TERMINATED};
    use crate::query::coord::unit_coord_table;
    use crate::query::{ConstScorer, Scorer, VecDocSet};
    use crate::tests::{sample_with_seed, test_seek_against_unoptimized};

    fn const_scorer(docs: Vec<u32>, score: f32) -> ConstScorer<VecDocSet> {
        ConstScorer::new(VecDocSet::from(docs), score)
    }

    #[test]
    fn test_reqopt_scorer_empty() {
        let req = vec![1, 3, 7];
        let mut reqoptscorer = RequiredOptionalScorer::new(
            const_scorer(req.clone(), 1.0),
            const_scorer(vec![], 1.0),
            false,
            unit_coord_table(3),
        );
        let mut docs = vec![];
        while reqoptscorer.doc() != TERMINATED {
            docs.push(reqoptscorer.doc());
            reqoptscorer.advance();
        }
        assert_eq!(docs, req);
    }

    #[test]
    fn test_reqopt_scorer() {
        let mut reqoptscorer = RequiredOptionalScorer::new(
            const_scorer(vec![1, 3, 7, 8, 9, 10, 13, 15], 1.0),
            const_scorer(vec![1, 2, 7, 11, 12, 15], 1.0),
            false,
            unit_coord_table(3),
        );
        {
            assert_eq!(reqoptscorer.doc(), 1);
            assert_eq!(reqoptscorer.score(), 2.0);
            assert_eq!(reqoptscorer.freq(), 2);
        }
        {
            assert_eq!(reqoptscorer.advance(), 3);
            assert_eq!(reqoptscorer.doc(), 3);
            assert_eq!(reqoptscorer.score(), 1.0);
            assert_eq!(reqoptscorer.freq(), 1);
        }
        {
            assert_eq!(reqoptscorer.advance(), 7);
            assert_eq!(reqoptscorer.doc(), 7);
            assert_eq!(reqoptscorer.score(), 2.0);
        }
        {
            assert_eq!(reqoptscorer.advance(), 8);
            assert_eq!(reqoptscorer.doc(), 8);
            assert_eq!(reqoptscorer.score(), 1.0);
        }
        {
            assert_eq!(reqoptscorer.advance(), 9);
            assert_eq!(reqoptscorer.doc(), 9);
            assert_eq!(reqoptscorer.score(), 1.0);
        }
        {
            assert_eq!(reqoptscorer.advance(), 10);
            assert_eq!(reqoptscorer.doc(), 10);
            assert_eq!(reqoptscorer.score(), 1.0);
        }
        {
            assert_eq!(reqoptscorer.advance(), 13);
            assert_eq!(reqoptscorer.doc(), 13);
            assert_eq!(reqoptscorer.score(), 1.0);
        }
        {
            assert_eq!(reqoptscorer.advance(), 15);
            assert_eq!(reqoptscorer.doc(), 15);
            assert_eq!(reqoptscorer.score(), 2.0);
        }
        assert_eq!(reqoptscorer.advance(), TERMINATED);
    }

    #[test]
    fn test_reqopt_scorer_applies_coords() {
        let coords: std::sync::Arc<[f32]> = vec![0.0, 0.5, 1.0].into();
        let mut reqoptscorer = RequiredOptionalScorer::new(
            const_scorer(vec![1, 2], 1.0),
            const_scorer(vec![2], 3.0),
            false,
            coords,
        );
        assert_eq!(reqoptscorer.score(), 0.5);
        assert_eq!(reqoptscorer.advance(), 2);
        assert_eq!(reqoptscorer.score(), 4.0);
    }

    #[test]
    fn test_reqopt_scorer_optional_required() {
        let mut reqoptscorer = RequiredOptionalScorer::new(
            const_scorer(vec![1, 3, 7, 8, 9, 10, 13, 15], 1.0),
            const_scorer(vec![1, 2, 7, 11, 12, 15], 1.0),
            true,
            unit_coord_table(3),
        );
        let mut docs = vec![];
        while reqoptscorer.doc() != TERMINATED {
            assert_eq!(reqoptscorer.freq(), 2);
            docs.push(reqoptscorer.doc());
            reqoptscorer.advance();
        }
        assert_eq!(docs, vec![1, 7, 15]);
    }

    #[test]
    fn test_reqopt_scorer_seek() {
        let req_docs = sample_with_seed(10_000, 0.02, 1);
        let opt_docs = sample_with_seed(10_000, 0.05, 2);
        let skip_docs = sample_with_seed(10_000, 0.001, 3);
        for optional_required in [false, true] {
            test_seek_against_unoptimized(
                || {
                    Box::new(RequiredOptionalScorer::new(
                        const_scorer(req_docs.clone(), 1.0),
                        const_scorer(opt_docs.clone(), 1.0),
                        optional_required,
                        unit_coord_table(3),
                    ))
                },
                skip_docs.clone(),
            );
        }
    }
}
