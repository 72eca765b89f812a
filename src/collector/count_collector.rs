use super::Collector;
use crate::collector::SegmentCollector;
use crate::{DocId, Score, SegmentOrdinal, SegmentReader};

/// `CountCollector` collector only counts how many
/// documents match the query.
///
/// ```rust
/// use occur::collector::Count;
/// use occur::query::{BooleanQuery, Occur, QueryClone, TermQuery};
/// use occur::{Searcher, SegmentReader, Term};
///
/// let segment = SegmentReader::for_texts(
///     "title",
///     &["The Name of the Wind", "The Diary of Muadib", "A Dairy Cow", "The Diary of a Young Girl"],
/// );
/// let searcher = Searcher::new(vec![segment]);
/// let query = BooleanQuery::new(vec![
///     (Occur::Should, TermQuery::new(Term::new("title", "Diary")).box_clone()),
///     (Occur::Should, TermQuery::new(Term::new("title", "Cow")).box_clone()),
/// ]);
/// let count = searcher.search(&query, &Count).unwrap();
///
/// assert_eq!(count, 3);
/// ```
pub struct Count;

impl Collector for Count {
    type Fruit = usize;

    type Child = SegmentCountCollector;

    fn for_segment(
        &self,
        _: SegmentOrdinal,
        _: &SegmentReader,
    ) -> crate::Result<SegmentCountCollector> {
        Ok(SegmentCountCollector::default())
    }

    fn requires_scoring(&self) -> bool {
        false
    }

    fn accepts_docs_out_of_order(&self) -> bool {
        true
    }

    fn merge_fruits(&self, segment_counts: Vec<usize>) -> crate::Result<usize> {
        Ok(segment_counts.into_iter().sum())
    }
}

/// Segment collector associated to `Count`.
#[derive(Default)]
pub struct SegmentCountCollector {
    count: usize,
}

impl SegmentCollector for SegmentCountCollector {
    type Fruit = usize;

    fn collect(&mut self, _: DocId, _: Score) {
        self.count += 1;
    }

    fn harvest(self) -> usize {
        self.count
    }
}
