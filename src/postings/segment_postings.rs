use std::sync::Arc;

use crate::docset::{DocSet, TERMINATED};
use crate::postings::Postings;
use crate::DocId;

/// In-memory inverted list of a single term in a single segment.
///
/// Doc ids are strictly increasing, and `term_freqs[i]` is the number of
/// occurrences of the term in `doc_ids[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PostingList {
    doc_ids: Vec<DocId>,
    term_freqs: Vec<u32>,
}

impl PostingList {
    /// Builds a posting list from `(doc, term_freq)` pairs sorted by doc.
    pub fn from_pairs(pairs: Vec<(DocId, u32)>) -> PostingList {
        debug_assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));
        let (doc_ids, term_freqs) = pairs.into_iter().unzip();
        PostingList {
            doc_ids,
            term_freqs,
        }
    }

    /// Number of documents containing the term.
    pub fn doc_freq(&self) -> u32 {
        self.doc_ids.len() as u32
    }
}

/// Cursor over a [`PostingList`] of a segment.
///
/// The cursor is positioned on the first document right after creation.
#[derive(Clone)]
pub struct SegmentPostings {
    list: Arc<PostingList>,
    cursor: usize,
}

impl SegmentPostings {
    pub(crate) fn new(list: Arc<PostingList>) -> SegmentPostings {
        SegmentPostings { list, cursor: 0 }
    }

    /// Number of documents in the posting list.
    pub fn doc_freq(&self) -> u32 {
        self.list.doc_freq()
    }
}

impl DocSet for SegmentPostings {
    fn advance(&mut self) -> DocId {
        if self.cursor < self.list.doc_ids.len() {
            self.cursor += 1;
        }
        self.doc()
    }

    fn seek(&mut self, target: DocId) -> DocId {
        let remaining = &self.list.doc_ids[self.cursor..];
        self.cursor += remaining.partition_point(|&doc| doc < target);
        self.doc()
    }

    #[inline]
    fn doc(&self) -> DocId {
        self.list
            .doc_ids
            .get(self.cursor)
            .copied()
            .unwrap_or(TERMINATED)
    }

    fn size_hint(&self) -> u32 {
        self.list.doc_freq()
    }
}

impl Postings for SegmentPostings {
    fn term_freq(&self) -> u32 {
        self.list.term_freqs.get(self.cursor).copied().unwrap_or(0)
    }
}
