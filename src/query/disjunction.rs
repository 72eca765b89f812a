use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::query::score_combiner::SumWithCoordsCombiner;
use crate::query::{Scorer, ScorerNode};
use crate::{DocId, DocSet, Score, TERMINATED};

/// Union of optional scorers, only emitting the documents matched by at
/// least `minimum_matches_required` of them.
///
/// The score of a document is the sum of the scores of the matching
/// scorers, multiplied by `coords[number of matching scorers]`. The
/// frequency of a match is the number of matching scorers.
pub struct DisjunctionScorer<TScorer = ScorerNode> {
    chains: MinHeap<TScorer>,
    minimum_matches_required: usize,
    coords: Arc<[Score]>,
    score_combiner: SumWithCoordsCombiner,

    doc: DocId,
    score: Score,
    freq: u32,
    is_end: bool,
}

type MinHeap<T> = BinaryHeap<Reverse<ScorerWrapper<T>>>;

#[repr(transparent)]
struct ScorerWrapper<T>(T);

impl<T: Scorer> PartialEq for ScorerWrapper<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.doc() == other.0.doc()
    }
}

impl<T: Scorer> Eq for ScorerWrapper<T> {}

impl<T: Scorer> PartialOrd for ScorerWrapper<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Scorer> Ord for ScorerWrapper<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.doc().cmp(&other.0.doc())
    }
}

impl<TScorer: Scorer> DisjunctionScorer<TScorer> {
    /// Creates a disjunction positioned on its first match.
    ///
    /// `minimum_matches_required` is raised to 1 if needed. The disjunction
    /// is empty if it exceeds the number of scorers. `coords` must hold at
    /// least `number of scorers + 1` factors.
    pub fn new<T: IntoIterator<Item = TScorer>>(
        docsets: T,
        minimum_matches_required: usize,
        coords: Arc<[Score]>,
    ) -> Self {
        let chains: MinHeap<_> = docsets
            .into_iter()
            .map(|doc| Reverse(ScorerWrapper(doc)))
            .collect();
        debug_assert!(coords.len() > chains.len());
        let mut disjunction = Self {
            chains,
            minimum_matches_required: minimum_matches_required.max(1),
            coords,
            score_combiner: SumWithCoordsCombiner::default(),
            doc: TERMINATED,
            score: 0.0,
            freq: 0,
            is_end: false,
        };
        if disjunction.minimum_matches_required > disjunction.chains.len() {
            // Mark it as empty.
            disjunction.is_end = true;
            return disjunction;
        }
        disjunction.advance();
        disjunction
    }

    fn set_match(&mut self) {
        let num_matches = self.score_combiner.num_matches();
        self.freq = num_matches;
        self.score = self.score_combiner.score() * self.coords[num_matches as usize];
    }
}

impl<TScorer: Scorer> DocSet for DisjunctionScorer<TScorer> {
    fn advance(&mut self) -> DocId {
        if self.is_end {
            return TERMINATED;
        }
        let mut votes = 0;
        while let Some(mut candidate) = self.chains.pop() {
            let next = candidate.0 .0.doc();
            if next == TERMINATED {
                // Exhausted chains are dropped.
                continue;
            }
            if self.doc != next {
                if votes >= self.minimum_matches_required {
                    self.chains.push(candidate);
                    self.set_match();
                    return self.doc;
                }
                // Reset votes and scores.
                votes = 0;
                self.doc = next;
                self.score_combiner.clear();
            }
            votes += 1;
            self.score_combiner.update(&mut candidate.0 .0);
            candidate.0 .0.advance();
            self.chains.push(candidate);
        }
        if votes < self.minimum_matches_required {
            self.doc = TERMINATED;
            self.is_end = true;
        } else {
            self.set_match();
        }
        self.doc
    }

    fn seek(&mut self, target: DocId) -> DocId {
        if self.is_end || self.doc >= target {
            return self.doc();
        }
        let chains = std::mem::take(&mut self.chains).into_vec();
        self.chains = chains
            .into_iter()
            .map(|mut chain| {
                if chain.0 .0.doc() < target {
                    chain.0 .0.seek(target);
                }
                chain
            })
            .collect();
        self.advance()
    }

    fn doc(&self) -> DocId {
        if self.is_end {
            return TERMINATED;
        }
        self.doc
    }

    fn size_hint(&self) -> u32 {
        self.chains
            .iter()
            .map(|docset| docset.0 .0.size_hint())
            .max()
            .unwrap_or(0u32)
    }
}

impl<TScorer: Scorer> Scorer for DisjunctionScorer<TScorer> {
    fn score(&mut self) -> Score {
        self.score
    }

    fn freq(&mut self) -> u32 {
        self.freq
    }
}
