#![doc(test(attr(allow(unused_variables), deny(warnings))))]
#![warn(missing_docs)]
#![allow(clippy::len_without_is_empty)]

//! # `occur`
//!
//! Boolean query matching and scoring.
//!
//! A [`BooleanQuery`](query::BooleanQuery) combines sub-queries with
//! [`Occur::Must`](query::Occur::Must), [`Occur::Should`](query::Occur::Should) and
//! [`Occur::MustNot`](query::Occur::MustNot) semantics. For every segment, its weight builds a
//! tree of scorers (conjunctions, disjunctions with a minimum number of matching optional
//! clauses, exclusions) or a bucketed bulk scorer, and pushes the matching documents with
//! their score to a [`Collector`](collector::Collector).
//!
//! ```rust
//! use occur::collector::TopDocs;
//! use occur::query::{BooleanQuery, Occur, QueryClone, TermQuery};
//! use occur::{DocAddress, Searcher, SegmentReader, Term};
//!
//! # fn main() -> occur::Result<()> {
//! let segment = SegmentReader::for_texts("body", &["w1 w2 w3", "w1 w3", "w1 xx w3"]);
//! let searcher = Searcher::new(vec![segment]);
//! let query = BooleanQuery::new(vec![
//!     (Occur::Must, TermQuery::new(Term::new("body", "w3")).box_clone()),
//!     (Occur::MustNot, TermQuery::new(Term::new("body", "xx")).box_clone()),
//! ]);
//! let top_docs = searcher.search(&query, &TopDocs::with_limit(10))?;
//! assert_eq!(top_docs.len(), 2);
//! assert!(top_docs.iter().all(|(_, doc)| *doc != DocAddress::new(0, 2)));
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate maplit;

/// Checks that two floats are close enough.
#[macro_export]
macro_rules! assert_nearly_equals {
    ($left:expr, $right:expr) => {{
        $crate::assert_nearly_equals!($left, $right, 0.0005)
    }};
    ($left:expr, $right:expr, $epsilon:expr) => {{
        match (&$left, &$right, &$epsilon) {
            (left_val, right_val, epsilon_val) => {
                let diff = (left_val - right_val).abs();

                if diff > *epsilon_val {
                    panic!(
                        "assertion failed: `abs(left-right)>epsilon`\n    left: `{:?}`,\n    \
                         right: `{:?}`,\n    epsilon: `{:?}`\n",
                        left_val, right_val, epsilon_val
                    )
                }
            }
        }
    }};
}

mod common;
mod core;
mod docset;
mod error;

pub mod collector;
pub mod postings;
pub mod query;

pub use crate::core::{
    Executor, SearchSettings, Searcher, SegmentBuilder, SegmentReader, Term,
    DEFAULT_BUCKETED_CLAUSE_THRESHOLD, DEFAULT_MAX_CLAUSE_COUNT,
};
pub use crate::docset::{DocSet, TERMINATED};
pub use crate::error::QueryError;

use serde::{Deserialize, Serialize};

/// Expose the current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `occur` result type.
pub type Result<T> = std::result::Result<T, QueryError>;

/// A `u32` identifying a document within a segment.
/// Documents have their `DocId` assigned incrementally,
/// as they are added in the segment.
pub type DocId = u32;

/// A f32 that represents the relevance of the document to the query.
pub type Score = f32;

/// A `SegmentOrdinal` identifies a segment, within a `Searcher`.
pub type SegmentOrdinal = u32;

/// `DocAddress` contains all the necessary information
/// to identify a document given a `Searcher` object.
///
/// It consists of an id identifying its segment, and
/// a segment-local `DocId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocAddress {
    /// The segment ordinal id that identifies the segment
    /// hosting the document in the `Searcher` it is called from.
    pub segment_ord: SegmentOrdinal,
    /// The segment-local `DocId`.
    pub doc_id: DocId,
}

impl DocAddress {
    /// Creates a new `DocAddress` from the segment/doc pair.
    pub fn new(segment_ord: SegmentOrdinal, doc_id: DocId) -> DocAddress {
        DocAddress {
            segment_ord,
            doc_id,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::distributions::{Bernoulli, Uniform};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::docset::{DocSet, TERMINATED};
    use crate::DocId;

    /// Checks that seeking a docset to each target (in increasing order)
    /// lands on the same documents as advancing it one doc at a time.
    pub fn test_seek_against_unoptimized<F>(docset_factory: F, targets: Vec<DocId>)
    where F: Fn() -> Box<dyn DocSet> {
        let mut docset = docset_factory();
        let mut reference = docset_factory();
        for target in targets {
            let mut doc = docset.doc();
            if doc < target {
                doc = docset.seek(target);
            }
            let mut reference_doc = reference.doc();
            while reference_doc < target {
                reference_doc = reference.advance();
            }
            assert_eq!(doc, reference_doc, "seek({target})");
            if doc == TERMINATED {
                return;
            }
        }
        loop {
            let (doc, reference_doc) = (docset.advance(), reference.advance());
            assert_eq!(doc, reference_doc);
            if doc == TERMINATED {
                break;
            }
        }
    }

    /// Returns a sorted sample of `[0, n)`, each doc being kept with probability `ratio`.
    pub fn sample_with_seed(n: u32, ratio: f64, seed_val: u8) -> Vec<DocId> {
        StdRng::from_seed([seed_val; 32])
            .sample_iter(&Bernoulli::new(ratio).unwrap())
            .take(n as usize)
            .enumerate()
            .filter_map(|(val, keep)| if keep { Some(val as u32) } else { None })
            .collect()
    }

    pub fn generate_nonunique_unsorted(max_value: u32, n_elems: usize) -> Vec<u32> {
        let seed: [u8; 32] = [1; 32];
        StdRng::from_seed(seed)
            .sample_iter(&Uniform::new(0u32, max_value))
            .take(n_elems)
            .collect::<Vec<u32>>()
    }

    #[test]
    fn test_sample_is_sorted_and_within_bounds() {
        let docs = sample_with_seed(1_000, 0.1, 3);
        assert!(docs.windows(2).all(|w| w[0] < w[1]));
        assert!(docs.iter().all(|&doc| doc < 1_000));
        assert!(!docs.is_empty());
    }
}
