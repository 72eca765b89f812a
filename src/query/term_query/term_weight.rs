use std::sync::Arc;

use super::term_scorer::TermScorer;
use crate::core::SegmentReader;
use crate::docset::DocSet;
use crate::query::explanation::does_not_match;
use crate::query::{Explanation, ScorerNode, Similarity, Weight};
use crate::{DocId, Score, Term};

/// Weight of a [`TermQuery`](crate::query::TermQuery).
///
/// Holds the document frequency of the term across the searcher, from which
/// the `idf` factor is computed once.
pub struct TermWeight {
    term: Term,
    doc_freq: u64,
    num_docs: u64,
    idf: Score,
    similarity: Arc<dyn Similarity>,
}

impl TermWeight {
    pub(crate) fn new(
        term: Term,
        doc_freq: u64,
        num_docs: u64,
        similarity: Arc<dyn Similarity>,
    ) -> TermWeight {
        let idf = similarity.idf(doc_freq, num_docs);
        TermWeight {
            term,
            doc_freq,
            num_docs,
            idf,
            similarity,
        }
    }

    /// Returns the term scorer of the segment, or `None` if the term does
    /// not appear in it.
    pub fn specialized_scorer(&self, reader: &SegmentReader, boost: Score) -> Option<TermScorer> {
        let postings = reader.read_postings(&self.term)?;
        Some(TermScorer::new(
            postings,
            self.similarity.clone(),
            self.idf * boost,
        ))
    }
}

impl Weight for TermWeight {
    fn scorer(&self, reader: &SegmentReader, boost: Score) -> crate::Result<Option<ScorerNode>> {
        Ok(self.specialized_scorer(reader, boost).map(ScorerNode::leaf))
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let mut scorer = self
            .specialized_scorer(reader, 1.0)
            .ok_or_else(|| does_not_match(doc))?;
        if scorer.seek(doc) != doc {
            return Err(does_not_match(doc));
        }
        let mut explanation = scorer.explain(&self.term);
        explanation.add_const(
            format!(
                "idf(docFreq={}, numDocs={})",
                self.doc_freq, self.num_docs
            ),
            self.idf,
        );
        Ok(explanation)
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        Ok(reader.doc_freq(&self.term))
    }
}
