//! Postings module (also called inverted index)
//!
//! Postings, also called inverted lists, are the list of documents
//! containing a given term, along with the number of occurrences of the
//! term in each of these documents.

mod postings;
mod segment_postings;

pub use self::postings::Postings;
pub(crate) use self::segment_postings::PostingList;
pub use self::segment_postings::SegmentPostings;
