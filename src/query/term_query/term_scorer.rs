use std::sync::Arc;

use crate::docset::DocSet;
use crate::postings::{Postings, SegmentPostings};
use crate::query::{Explanation, Scorer, Similarity};
use crate::{DocId, Score, Term};

/// Scorer of a term within a segment: iterates over its postings.
pub struct TermScorer<TPostings = SegmentPostings> {
    postings: TPostings,
    similarity: Arc<dyn Similarity>,
    weight: Score,
}

impl<TPostings: Postings> TermScorer<TPostings> {
    /// `weight` is the product of the `idf` and of the boost.
    pub fn new(
        postings: TPostings,
        similarity: Arc<dyn Similarity>,
        weight: Score,
    ) -> TermScorer<TPostings> {
        TermScorer {
            postings,
            similarity,
            weight,
        }
    }

    /// Number of occurrences of the term in the current document.
    pub fn term_freq(&self) -> u32 {
        self.postings.term_freq()
    }

    pub(crate) fn explain(&self, term: &Term) -> Explanation {
        let doc = self.doc();
        let term_freq = self.term_freq();
        let tf = self.similarity.tf(term_freq);
        let mut explanation = Explanation::new(
            format!("weight({term} in {doc}), product of:"),
            tf * self.weight,
        );
        explanation.add_const(format!("tf(freq={term_freq})"), tf);
        explanation
    }
}

impl<TPostings: Postings> DocSet for TermScorer<TPostings> {
    #[inline]
    fn advance(&mut self) -> DocId {
        self.postings.advance()
    }

    #[inline]
    fn seek(&mut self, target: DocId) -> DocId {
        self.postings.seek(target)
    }

    #[inline]
    fn doc(&self) -> DocId {
        self.postings.doc()
    }

    fn size_hint(&self) -> u32 {
        self.postings.size_hint()
    }
}

impl<TPostings: Postings> Scorer for TermScorer<TPostings> {
    #[inline]
    fn score(&mut self) -> Score {
        self.similarity.tf(self.postings.term_freq()) * self.weight
    }

    #[inline]
    fn freq(&mut self) -> u32 {
        self.postings.term_freq()
    }
}
