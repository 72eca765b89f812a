use crate::docset::DocSet;

/// Postings (also called inverted list)
///
/// For a given term, it is the list of doc ids of the doc
/// containing the term. Optionally, for each document,
/// it may also give access to the term frequency.
///
/// Note that term frequencies are only meaningful while the
/// `Postings` is positioned on a document.
pub trait Postings: DocSet + 'static {
    /// The number of times the term appears in the document.
    fn term_freq(&self) -> u32;
}

impl<TPostings: Postings + ?Sized> Postings for Box<TPostings> {
    fn term_freq(&self) -> u32 {
        (**self).term_freq()
    }
}
