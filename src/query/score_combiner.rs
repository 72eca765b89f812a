use crate::query::Scorer;
use crate::Score;

/// Sums the score of different scorers and keeps the count
/// of scorers which matched.
#[derive(Default, Clone, Copy, Debug)]
pub struct SumWithCoordsCombiner {
    num_matches: u32,
    score: Score,
}

impl SumWithCoordsCombiner {
    /// Aggregates the score combiner with the given scorer.
    #[inline]
    pub fn update<TScorer: Scorer + ?Sized>(&mut self, scorer: &mut TScorer) {
        self.add(scorer.score());
    }

    /// Aggregates a score that was already computed.
    #[inline]
    pub fn add(&mut self, score: Score) {
        self.score += score;
        self.num_matches += 1;
    }

    /// Clears the score combiner state back to its initial state.
    pub fn clear(&mut self) {
        self.score = 0.0;
        self.num_matches = 0;
    }

    /// Returns the aggregate score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Returns the number of scores aggregated since the last `.clear()`.
    pub fn num_matches(&self) -> u32 {
        self.num_matches
    }
}

#[cfg(test)]
mod tests {
    use super::SumWithCoordsCombiner;
    use crate::query::{ConstScorer, VecDocSet};

    #[test]
    fn test_sum_with_coords() {
        let mut combiner = SumWithCoordsCombiner::default();
        let mut scorer = ConstScorer::new(VecDocSet::from(vec![1]), 0.5);
        combiner.update(&mut scorer);
        combiner.add(0.25);
        assert_eq!(combiner.score(), 0.75);
        assert_eq!(combiner.num_matches(), 2);
        combiner.clear();
        assert_eq!(combiner.score(), 0.0);
        assert_eq!(combiner.num_matches(), 0);
    }
}
