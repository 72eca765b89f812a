mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::SlowMinShouldMatchScorer;
use occur::query::{
    ConstScorer, CoordinationPolicy, DefaultCoordination, DisjunctionScorer, Scorer, VecDocSet,
};
use occur::{DocId, DocSet, Score, TERMINATED};
use proptest::prelude::*;

const MAX_DOC: DocId = 300;

fn coords(num_clauses: usize) -> Vec<Score> {
    (0..=num_clauses as u32)
        .map(|overlap| DefaultCoordination.coord(overlap, num_clauses as u32))
        .collect()
}

fn fast_scorer(
    postings: &[Vec<DocId>],
    minimum_matches_required: usize,
) -> DisjunctionScorer<ConstScorer<VecDocSet>> {
    let coords: Arc<[Score]> = coords(postings.len()).into();
    DisjunctionScorer::new(
        postings
            .iter()
            .cloned()
            .map(|docs| ConstScorer::new(VecDocSet::from(docs), 1.0)),
        minimum_matches_required,
        coords,
    )
}

fn slow_scorer(postings: &[Vec<DocId>], minimum_matches_required: usize) -> SlowMinShouldMatchScorer {
    SlowMinShouldMatchScorer::new(
        postings.to_vec(),
        minimum_matches_required,
        coords(postings.len()),
        MAX_DOC,
    )
}

fn assert_same_position<L: Scorer, R: Scorer>(fast: &mut L, slow: &mut R) -> Result<(), TestCaseError> {
    prop_assert_eq!(fast.doc(), slow.doc());
    if fast.doc() != TERMINATED {
        prop_assert_eq!(fast.freq(), slow.freq());
        prop_assert!((fast.score() - slow.score()).abs() < 0.0001);
    }
    Ok(())
}

fn postings_strategy() -> impl Strategy<Value = Vec<Vec<DocId>>> {
    proptest::collection::vec(proptest::collection::btree_set(0u32..MAX_DOC, 0..80), 1..7)
        .prop_map(|sets: Vec<BTreeSet<DocId>>| {
            sets.into_iter()
                .map(|set| set.into_iter().collect())
                .collect()
        })
}

proptest! {
    #[test]
    fn test_min_should_match_advance_agrees_with_slow(
        postings in postings_strategy(),
        minimum_matches_required in 0usize..5,
    ) {
        let mut fast = fast_scorer(&postings, minimum_matches_required);
        let mut slow = slow_scorer(&postings, minimum_matches_required);
        loop {
            assert_same_position(&mut fast, &mut slow)?;
            if fast.doc() == TERMINATED {
                break;
            }
            fast.advance();
            slow.advance();
        }
    }

    #[test]
    fn test_min_should_match_seek_agrees_with_slow(
        postings in postings_strategy(),
        minimum_matches_required in 0usize..5,
        targets in proptest::collection::btree_set(0u32..MAX_DOC + 10, 0..40),
    ) {
        let mut fast = fast_scorer(&postings, minimum_matches_required);
        let mut slow = slow_scorer(&postings, minimum_matches_required);
        assert_same_position(&mut fast, &mut slow)?;
        for target in targets {
            if fast.doc() >= target {
                continue;
            }
            fast.seek(target);
            slow.seek(target);
            assert_same_position(&mut fast, &mut slow)?;
            if fast.doc() == TERMINATED {
                break;
            }
            // Alternate seek and advance.
            if target % 3 == 0 {
                fast.advance();
                slow.advance();
                assert_same_position(&mut fast, &mut slow)?;
            }
        }
    }
}

#[test]
fn test_min_should_match_above_number_of_clauses_is_empty() {
    let postings = vec![vec![1, 2, 3], vec![2, 3], vec![3]];
    let fast = fast_scorer(&postings, 4);
    assert_eq!(fast.doc(), TERMINATED);
    let slow = slow_scorer(&postings, 4);
    assert_eq!(slow.doc(), TERMINATED);
}

#[test]
fn test_min_should_match_freq_counts_matching_clauses() {
    let postings = vec![vec![1, 2, 3], vec![2, 3], vec![3]];
    let mut fast = fast_scorer(&postings, 2);
    assert_eq!(fast.doc(), 2);
    assert_eq!(fast.freq(), 2);
    occur::assert_nearly_equals!(fast.score(), 2.0 * 2.0 / 3.0);
    assert_eq!(fast.advance(), 3);
    assert_eq!(fast.freq(), 3);
    occur::assert_nearly_equals!(fast.score(), 3.0);
    assert_eq!(fast.advance(), TERMINATED);
}
