use std::fmt;

use crate::Score;

/// Relevance formula of a term within a document.
///
/// The score of a term query is `tf(term_freq) * idf(doc_freq, num_docs) * boost`.
pub trait Similarity: Send + Sync + fmt::Debug {
    /// Score factor of a term appearing `term_freq` times in the document.
    fn tf(&self, term_freq: u32) -> Score;

    /// Score factor of a term appearing in `doc_freq` of the `num_docs` documents.
    fn idf(&self, doc_freq: u64, num_docs: u64) -> Score;
}

/// `sqrt(term_freq) * (1 + ln(num_docs / (doc_freq + 1)))`
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSimilarity;

impl Similarity for DefaultSimilarity {
    fn tf(&self, term_freq: u32) -> Score {
        (term_freq as Score).sqrt()
    }

    fn idf(&self, doc_freq: u64, num_docs: u64) -> Score {
        let ratio = num_docs as f64 / (doc_freq + 1) as f64;
        (1.0 + ratio.ln()) as Score
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultSimilarity, Similarity};

    #[test]
    fn test_default_similarity() {
        assert_eq!(DefaultSimilarity.tf(4), 2.0);
        assert_eq!(DefaultSimilarity.tf(0), 0.0);
        assert_nearly_equals!(DefaultSimilarity.idf(1, 2), 1.0);
        assert_nearly_equals!(DefaultSimilarity.idf(0, 1), 1.0);
        assert!(DefaultSimilarity.idf(10, 10) > 0.0);
    }
}
