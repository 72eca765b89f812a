use crate::docset::{DocSet, TERMINATED};
use crate::query::{Scorer, ScorerNode};
use crate::{DocId, Score};

/// Intersection of the scorers of required clauses.
///
/// The score of a document is the sum of the scores of the sub-scorers,
/// multiplied by the coordination factor given at construction. The
/// frequency of a match is the number of sub-scorers.
pub struct Conjunction<TScorer = ScorerNode> {
    scorers: Vec<TScorer>,
    coord: Score,
}

impl<TScorer: Scorer> Conjunction<TScorer> {
    /// Creates a new conjunction positioned on its first match.
    ///
    /// # Panics
    /// Panics if `scorers` is empty.
    pub fn new(mut scorers: Vec<TScorer>, coord: Score) -> Conjunction<TScorer> {
        assert!(!scorers.is_empty(), "A conjunction requires at least one scorer");
        // The rarest scorer drives the intersection.
        scorers.sort_by_key(|scorer| scorer.size_hint());
        let mut conjunction = Conjunction { scorers, coord };
        let candidate = conjunction.scorers[0].doc();
        conjunction.align(candidate);
        conjunction
    }

    /// Leapfrogs the scorers until all of them are positioned on the same
    /// document, greater or equal to `candidate`.
    fn align(&mut self, mut candidate: DocId) -> DocId {
        'outer: loop {
            for scorer in self.scorers.iter_mut() {
                let mut doc = scorer.doc();
                if doc < candidate {
                    doc = scorer.seek(candidate);
                }
                if doc > candidate {
                    candidate = doc;
                    continue 'outer;
                }
            }
            return candidate;
        }
    }
}

impl<TScorer: Scorer> DocSet for Conjunction<TScorer> {
    fn advance(&mut self) -> DocId {
        let candidate = self.scorers[0].advance();
        self.align(candidate)
    }

    fn seek(&mut self, target: DocId) -> DocId {
        let doc = self.doc();
        if doc >= target {
            return doc;
        }
        let candidate = self.scorers[0].seek(target);
        self.align(candidate)
    }

    #[inline]
    fn doc(&self) -> DocId {
        self.scorers[0].doc()
    }

    fn size_hint(&self) -> u32 {
        self.scorers[0].size_hint()
    }
}

impl<TScorer: Scorer> Scorer for Conjunction<TScorer> {
    fn score(&mut self) -> Score {
        if self.doc() == TERMINATED {
            return 0.0;
        }
        self.scorers
            .iter_mut()
            .map(|scorer| scorer.score())
            .sum::<Score>()
            * self.coord
    }

    fn freq(&mut self) -> u32 {
        self.scorers.len() as u32
    }
}
