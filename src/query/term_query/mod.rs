mod term_query;
mod term_scorer;
mod term_weight;

pub use self::term_query::TermQuery;
pub use self::term_scorer::TermScorer;
pub use self::term_weight::TermWeight;

#[cfg(test)]
mod tests {
    use crate::collector::TopDocs;
    use crate::docset::{DocSet, TERMINATED};
    use crate::query::{EnableScoring, Query, Scorer, TermQuery};
    use crate::{DocAddress, Searcher, SegmentReader, Term};

    fn searcher() -> Searcher {
        Searcher::new(vec![SegmentReader::for_texts(
            "text",
            &["a b", "b c c c c", "d", "c"],
        )])
    }

    #[test]
    pub fn test_term_query_no_freq() {
        let searcher = searcher();
        let term_query = TermQuery::new(Term::new("text", "a"));
        let term_weight =
            term_query.specialized_weight(EnableScoring::enabled_from_searcher(&searcher));
        let segment_reader = searcher.segment_reader(0);
        let mut term_scorer = term_weight.specialized_scorer(segment_reader, 1.0).unwrap();
        assert_eq!(term_scorer.doc(), 0);
        assert_eq!(term_scorer.freq(), 1);
        assert_nearly_equals!(term_scorer.score(), 1.0 + (4.0f32 / 2.0).ln());
        assert_eq!(term_scorer.advance(), TERMINATED);
    }

    #[test]
    pub fn test_term_query_tf_and_boost() {
        let searcher = searcher();
        let term_query = TermQuery::new(Term::new("text", "c"));
        let term_weight =
            term_query.specialized_weight(EnableScoring::enabled_from_searcher(&searcher));
        let mut term_scorer = term_weight
            .specialized_scorer(searcher.segment_reader(0), 0.5)
            .unwrap();
        let idf = 1.0 + (4.0f32 / 3.0).ln();
        assert_eq!(term_scorer.doc(), 1);
        assert_eq!(term_scorer.freq(), 4);
        assert_nearly_equals!(term_scorer.score(), 2.0 * idf * 0.5);
        assert_eq!(term_scorer.advance(), 3);
        assert_nearly_equals!(term_scorer.score(), idf * 0.5);
    }

    #[test]
    pub fn test_term_query_unknown_term() -> crate::Result<()> {
        let searcher = searcher();
        let term_query = TermQuery::new(Term::new("text", "unknown"));
        assert_eq!(term_query.count(&searcher)?, 0);
        let weight = term_query.weight(EnableScoring::enabled_from_searcher(&searcher))?;
        assert!(weight.scorer(searcher.segment_reader(0), 1.0)?.is_none());
        // Same text, other field.
        let other_field = TermQuery::new(Term::new("title", "c"));
        assert_eq!(other_field.count(&searcher)?, 0);
        Ok(())
    }

    #[test]
    pub fn test_term_query_count_and_top_docs() -> crate::Result<()> {
        let searcher = searcher();
        let term_query = TermQuery::new(Term::new("text", "c"));
        assert_eq!(term_query.count(&searcher)?, 2);
        let top_docs = searcher.search(&term_query, &TopDocs::with_limit(2))?;
        assert_eq!(top_docs.len(), 2);
        assert_eq!(top_docs[0].1, DocAddress::new(0, 1));
        assert_eq!(top_docs[1].1, DocAddress::new(0, 3));
        Ok(())
    }

    #[test]
    pub fn test_term_query_explain() -> crate::Result<()> {
        let searcher = searcher();
        let term_query = TermQuery::new(Term::new("text", "c"));
        let explanation = term_query.explain(&searcher, DocAddress::new(0, 1))?;
        let idf = 1.0 + (4.0f32 / 3.0).ln();
        assert_nearly_equals!(explanation.value(), 2.0 * idf);
        assert_eq!(
            explanation.description(),
            "weight(text:c in 1), product of:"
        );
        assert_eq!(explanation.details().len(), 2);
        assert_eq!(explanation.details()[0].description(), "tf(freq=4)");
        assert_eq!(
            explanation.details()[1].description(),
            "idf(docFreq=2, numDocs=4)"
        );
        assert!(term_query.explain(&searcher, DocAddress::new(0, 2)).is_err());
        Ok(())
    }

    #[test]
    pub fn test_term_query_query_terms() {
        let term_query = TermQuery::new(Term::new("text", "c"));
        let mut terms = Vec::new();
        term_query.query_terms(&mut |term| terms.push(term.clone()));
        assert_eq!(terms, vec![Term::new("text", "c")]);
        assert_eq!(format!("{term_query:?}"), "TermQuery(text:c)");
    }
}
