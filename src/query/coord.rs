use std::fmt;
use std::sync::Arc;

use crate::Score;

/// Computes the coordination factor of a boolean query: a multiplier
/// rewarding documents matching many of the query's clauses.
///
/// `overlap` is the number of clauses matching the document, and
/// `max_overlap` the number of non-prohibited clauses of the query.
/// A clause boosted to zero still counts in both.
pub trait CoordinationPolicy: Send + Sync + fmt::Debug {
    /// Returns the coordination factor.
    fn coord(&self, overlap: u32, max_overlap: u32) -> Score;
}

/// Coordination factor `overlap / max_overlap`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCoordination;

impl CoordinationPolicy for DefaultCoordination {
    fn coord(&self, overlap: u32, max_overlap: u32) -> Score {
        if max_overlap == 0 {
            return 1.0;
        }
        overlap as Score / max_overlap as Score
    }
}

/// Coordination policy that does not reward overlap: always `1.0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCoordination;

impl CoordinationPolicy for NoCoordination {
    fn coord(&self, _overlap: u32, _max_overlap: u32) -> Score {
        1.0
    }
}

/// Builds the table of coordination factors indexed by overlap, from 0 to
/// `max_overlap` included.
///
/// The factor is `1.0` when coordination is disabled or when the query has a
/// single scoring clause.
pub(crate) fn coord_table(
    policy: &dyn CoordinationPolicy,
    max_overlap: u32,
    disable_coord: bool,
) -> Arc<[Score]> {
    (0..=max_overlap)
        .map(|overlap| {
            if disable_coord || max_overlap == 1 {
                1.0
            } else {
                policy.coord(overlap, max_overlap)
            }
        })
        .collect()
}

/// Table of `len` factors equal to `1.0`.
pub(crate) fn unit_coord_table(len: usize) -> Arc<[Score]> {
    vec![1.0; len].into()
}
