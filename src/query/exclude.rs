use crate::docset::{DocSet, TERMINATED};
use crate::query::{Scorer, ScorerNode};
use crate::{DocId, Score};

/// Returns `true` if one of the excluding docsets contains `doc`.
///
/// Excluding docsets are only moved forward, so `doc` must not decrease
/// from one call to the next.
fn is_excluded<TDocSet: DocSet>(excluding_docsets: &mut [TDocSet], doc: DocId) -> bool {
    for docset in excluding_docsets.iter_mut() {
        let mut excluded_doc = docset.doc();
        if excluded_doc < doc {
            excluded_doc = docset.seek(doc);
        }
        if excluded_doc == doc {
            return true;
        }
    }
    false
}

/// Filters a given `DocSet` by removing the docs from a given `DocSet`.
///
/// The excluding docsets have no impact on scoring. Any number of
/// excluding docsets is supported.
pub struct Exclude<TDocSet = ScorerNode> {
    underlying_docset: TDocSet,
    excluding_docsets: Vec<TDocSet>,
}

impl<TDocSet: DocSet> Exclude<TDocSet> {
    /// Creates a new `ExcludeScorer`
    pub fn new(
        mut underlying_docset: TDocSet,
        mut excluding_docsets: Vec<TDocSet>,
    ) -> Exclude<TDocSet> {
        while underlying_docset.doc() != TERMINATED {
            let target = underlying_docset.doc();
            if !is_excluded(&mut excluding_docsets, target) {
                break;
            }
            underlying_docset.advance();
        }
        Exclude {
            underlying_docset,
            excluding_docsets,
        }
    }
}

impl<TDocSet: DocSet> DocSet for Exclude<TDocSet> {
    fn advance(&mut self) -> DocId {
        loop {
            let candidate = self.underlying_docset.advance();
            if candidate == TERMINATED {
                return TERMINATED;
            }
            if !is_excluded(&mut self.excluding_docsets, candidate) {
                return candidate;
            }
        }
    }

    fn seek(&mut self, target: DocId) -> DocId {
        let doc = self.doc();
        if doc >= target {
            return doc;
        }
        let candidate = self.underlying_docset.seek(target);
        if candidate == TERMINATED {
            return TERMINATED;
        }
        if !is_excluded(&mut self.excluding_docsets, candidate) {
            return candidate;
        }
        self.advance()
    }

    fn doc(&self) -> DocId {
        self.underlying_docset.doc()
    }

    /// `.size_hint()` directly returns the size
    /// of the underlying docset without taking in account
    /// the fact that docs might be excluded.
    fn size_hint(&self) -> u32 {
        self.underlying_docset.size_hint()
    }
}

impl<TScorer: Scorer> Scorer for Exclude<TScorer> {
    #[inline]
    fn score(&mut self) -> Score {
        self.underlying_docset.score()
    }

    #[inline]
    fn freq(&mut self) -> u32 {
        self.underlying_docset.freq()
    }
}
