use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

use crate::core::Term;
use crate::postings::{PostingList, SegmentPostings};
use crate::DocId;

/// Entry point to access all of the datastructures of a segment.
///
/// The segment is held in memory: a term dictionary mapping each
/// [`Term`] to its posting list. Documents are added through a
/// [`SegmentBuilder`], their text being split on whitespace.
#[derive(Clone)]
pub struct SegmentReader {
    max_doc: DocId,
    postings: BTreeMap<Term, Arc<PostingList>>,
}

impl fmt::Debug for SegmentReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentReader")
            .field("max_doc", &self.max_doc)
            .field("num_terms", &self.postings.len())
            .finish()
    }
}

impl SegmentReader {
    /// Returns a builder for a new segment.
    pub fn builder() -> SegmentBuilder {
        SegmentBuilder::default()
    }

    /// Creates a segment with one document per text, all indexed in `field`.
    pub fn for_texts(field: &str, texts: &[&str]) -> SegmentReader {
        let mut builder = SegmentReader::builder();
        for text in texts {
            builder.add_document(&[(field, *text)]);
        }
        builder.build()
    }

    /// Returns one more than the highest document id.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Returns the number of documents.
    pub fn num_docs(&self) -> DocId {
        self.max_doc
    }

    /// Returns the number of documents containing the term.
    pub fn doc_freq(&self, term: &Term) -> u32 {
        self.postings
            .get(term)
            .map(|list| list.doc_freq())
            .unwrap_or(0u32)
    }

    /// Returns the postings of the term, or `None` if the term
    /// does not appear in the segment.
    pub fn read_postings(&self, term: &Term) -> Option<SegmentPostings> {
        self.postings
            .get(term)
            .map(|list| SegmentPostings::new(list.clone()))
    }

    /// Iterates, in order, over the terms of `field` within the given bounds.
    pub fn terms_in_range<'a>(
        &'a self,
        field: &'a str,
        lower: Bound<&'a str>,
        upper: Bound<&'a str>,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        let start = match lower {
            Bound::Included(text) => Bound::Included(Term::new(field, text)),
            Bound::Excluded(text) => Bound::Excluded(Term::new(field, text)),
            Bound::Unbounded => Bound::Included(Term::new(field, "")),
        };
        self.postings
            .range((start, Bound::Unbounded))
            .map(|(term, _)| term)
            .take_while(move |term| {
                term.field() == field
                    && match upper {
                        Bound::Included(text) => term.text() <= text,
                        Bound::Excluded(text) => term.text() < text,
                        Bound::Unbounded => true,
                    }
            })
    }
}

/// Accumulates documents and builds an in-memory [`SegmentReader`].
#[derive(Default)]
pub struct SegmentBuilder {
    max_doc: DocId,
    postings: BTreeMap<Term, Vec<(DocId, u32)>>,
}

impl SegmentBuilder {
    /// Adds a document made of `(field, text)` values and returns its doc id.
    ///
    /// Texts are split on whitespace, each token becoming a term.
    pub fn add_document(&mut self, field_values: &[(&str, &str)]) -> DocId {
        let doc = self.max_doc;
        for &(field, text) in field_values {
            for token in text.split_whitespace() {
                let doc_postings = self.postings.entry(Term::new(field, token)).or_default();
                match doc_postings.last_mut() {
                    Some((last_doc, term_freq)) if *last_doc == doc => *term_freq += 1,
                    _ => doc_postings.push((doc, 1)),
                }
            }
        }
        self.max_doc += 1;
        doc
    }

    /// Registers the term in the given documents, with a term frequency of 1.
    ///
    /// Documents up to the largest doc id are created if needed.
    pub fn add_term_postings(&mut self, term: Term, doc_ids: &[DocId]) -> &mut Self {
        let doc_postings = self.postings.entry(term).or_default();
        for &doc in doc_ids {
            match doc_postings.binary_search_by_key(&doc, |&(doc, _)| doc) {
                Ok(pos) => doc_postings[pos].1 += 1,
                Err(pos) => doc_postings.insert(pos, (doc, 1)),
            }
            self.max_doc = self.max_doc.max(doc + 1);
        }
        self
    }

    /// Finalizes the segment.
    pub fn build(self) -> SegmentReader {
        let postings = self
            .postings
            .into_iter()
            .map(|(term, pairs)| (term, Arc::new(PostingList::from_pairs(pairs))))
            .collect();
        SegmentReader {
            max_doc: self.max_doc,
            postings,
        }
    }
}
